//! Debt simplification over a trip's expenses.
//!
//! Balances are accumulated per member from every expense, then matched
//! greedily: the largest debtor pays the largest creditor until one side
//! runs out. Both functions are pure and hold no state between calls.

use crate::domain::expense::{Expense, SplitType};
use crate::domain::member::{Member, MemberId};
use crate::domain::money::{EPSILON, Money};
use crate::domain::settlement::{Balance, Settlement};
use std::collections::HashMap;
use tracing::debug;

/// Computes the transfers that settle every member's net balance.
///
/// References to members missing from `members` are skipped. Shares are not
/// validated; inconsistent splits simply yield whatever imbalance they imply.
pub fn calculate_settlements(expenses: &[Expense], members: &[Member]) -> Vec<Settlement> {
    if members.is_empty() || expenses.is_empty() {
        return Vec::new();
    }

    let balances = net_balances(expenses, members);
    let settlements = settle(&balances);
    debug!(
        expenses = expenses.len(),
        members = members.len(),
        settlements = settlements.len(),
        "calculated settlements"
    );
    settlements
}

/// Net balance of every member, in roster order.
///
/// An equal split with no listed members resolves to the roster passed in
/// here, not the roster at the time the expense was logged. Adding or
/// removing a member therefore changes the outcome of earlier expenses.
pub fn net_balances(expenses: &[Expense], members: &[Member]) -> Vec<Balance> {
    let mut ledger = Ledger::new(members);
    for expense in expenses {
        ledger.apply(expense);
    }
    ledger.into_balances()
}

/// Greedy largest-debtor/largest-creditor matching over net balances.
///
/// Ties keep roster order, so the output is reproducible.
pub fn settle(balances: &[Balance]) -> Vec<Settlement> {
    let mut debtors = positions(balances, |amount| amount < -EPSILON, |amount| -amount);
    let mut creditors = positions(balances, |amount| amount > EPSILON, |amount| amount);

    let mut settlements = Vec::new();
    let (mut d, mut c) = (0, 0);
    while d < debtors.len() && c < creditors.len() {
        let transfer = debtors[d].remaining.min(creditors[c].remaining);
        if transfer > EPSILON {
            let (from, to) = (debtors[d].balance, creditors[c].balance);
            settlements.push(Settlement {
                from_id: from.member_id.clone(),
                from: from.name.clone(),
                to_id: to.member_id.clone(),
                to: to.name.clone(),
                amount: transfer,
            });
        }

        debtors[d].remaining -= transfer;
        creditors[c].remaining -= transfer;
        if debtors[d].remaining <= EPSILON {
            d += 1;
        }
        if creditors[c].remaining <= EPSILON {
            c += 1;
        }
    }
    settlements
}

struct Position<'a> {
    balance: &'a Balance,
    remaining: Money,
}

fn positions<'a>(
    balances: &'a [Balance],
    side: impl Fn(Money) -> bool,
    magnitude: impl Fn(Money) -> Money,
) -> Vec<Position<'a>> {
    let mut positions: Vec<Position<'a>> = balances
        .iter()
        .filter(|balance| side(balance.amount))
        .map(|balance| Position {
            balance,
            remaining: magnitude(balance.amount),
        })
        .collect();
    // Stable: equal amounts stay in roster order.
    positions.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    positions
}

/// Per-invocation accumulator keyed by member id.
struct Ledger<'a> {
    members: &'a [Member],
    index: HashMap<&'a MemberId, usize>,
    balances: Vec<Money>,
}

impl<'a> Ledger<'a> {
    fn new(members: &'a [Member]) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            index.entry(&member.id).or_insert(position);
        }
        Self {
            members,
            index,
            balances: vec![Money::ZERO; members.len()],
        }
    }

    fn apply(&mut self, expense: &Expense) {
        let total = Money::from(expense.amount);
        self.adjust(expense, &expense.paid_by_id, total);

        match expense.split_type {
            SplitType::Equally if !expense.split_details.is_empty() => {
                let pool: Vec<&MemberId> = expense
                    .split_details
                    .iter()
                    .map(|detail| &detail.member_id)
                    .collect();
                self.split_equally(expense, total, &pool);
            }
            SplitType::Equally => self.split_across_roster(expense, total),
            SplitType::ByAmount => {
                for detail in &expense.split_details {
                    if let Some(share) = detail.amount {
                        self.adjust(expense, &detail.member_id, -Money::new(share));
                    }
                }
            }
            SplitType::ByPercentage => {
                for detail in &expense.split_details {
                    if let Some(percentage) = detail.percentage {
                        self.adjust(expense, &detail.member_id, -total.percent(percentage));
                    }
                }
            }
            SplitType::Unrecognized => {
                debug!(expense = %expense.id, "unrecognized split type, splitting across all members");
                self.split_across_roster(expense, total);
            }
        }
    }

    fn split_across_roster(&mut self, expense: &Expense, total: Money) {
        let members = self.members;
        let pool: Vec<&MemberId> = members.iter().map(|member| &member.id).collect();
        self.split_equally(expense, total, &pool);
    }

    /// The divisor is the whole pool, including ids no longer on the roster.
    fn split_equally(&mut self, expense: &Expense, total: Money, pool: &[&MemberId]) {
        let Some(share) = total.split(pool.len()) else {
            return;
        };
        for member_id in pool {
            self.adjust(expense, member_id, -share);
        }
    }

    fn adjust(&mut self, expense: &Expense, member_id: &MemberId, delta: Money) {
        match self.index.get(member_id) {
            Some(&position) => self.balances[position] += delta,
            None => debug!(
                expense = %expense.id,
                member = %member_id,
                "skipping unknown member"
            ),
        }
    }

    fn into_balances(self) -> Vec<Balance> {
        self.members
            .iter()
            .zip(self.balances)
            .map(|(member, amount)| Balance {
                member_id: member.id.clone(),
                name: member.name.clone(),
                amount,
            })
            .collect()
    }
}
