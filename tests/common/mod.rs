use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tripsplit::domain::expense::{Expense, SplitDetail, SplitType};
use tripsplit::domain::member::Member;
use tripsplit::domain::money::Amount;

/// Builds a reproducible trip with well-formed shares that only reference
/// roster members.
pub fn random_trip(seed: u64) -> (Vec<Member>, Vec<Expense>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let member_count = rng.gen_range(2..=6);
    let members: Vec<Member> = (0..member_count)
        .map(|i| Member::new(format!("m{i}"), format!("Member {i}")))
        .collect();

    let expense_count = rng.gen_range(0..=30);
    let expenses = (0..expense_count)
        .map(|i| random_expense(&mut rng, format!("e{i}"), &members))
        .collect();

    (members, expenses)
}

fn random_expense(rng: &mut StdRng, id: String, members: &[Member]) -> Expense {
    let cents: i64 = rng.gen_range(1..=100_000);
    let amount = Amount::new(Decimal::new(cents, 2)).expect("positive amount");
    let payer = members.choose(rng).expect("non-empty roster").id.as_str().to_string();

    let k = rng.gen_range(1..=members.len());
    let participants: Vec<&Member> = members.choose_multiple(rng, k).collect();

    match rng.gen_range(0..3) {
        0 => {
            let details = if rng.gen_bool(0.3) {
                Vec::new()
            } else {
                participants
                    .iter()
                    .map(|m| SplitDetail::member(m.id.as_str()))
                    .collect()
            };
            Expense::new(id, amount, payer, SplitType::Equally, details)
        }
        1 => {
            let details = partition(rng, cents, participants.len())
                .into_iter()
                .zip(&participants)
                .map(|(share, m)| SplitDetail::amount(m.id.as_str(), Decimal::new(share, 2)))
                .collect();
            Expense::new(id, amount, payer, SplitType::ByAmount, details)
        }
        _ => {
            let details = partition(rng, 100, participants.len())
                .into_iter()
                .zip(&participants)
                .map(|(share, m)| SplitDetail::percentage(m.id.as_str(), Decimal::from(share)))
                .collect();
            Expense::new(id, amount, payer, SplitType::ByPercentage, details)
        }
    }
}

/// Random non-negative parts that sum to `total`.
fn partition(rng: &mut StdRng, total: i64, parts: usize) -> Vec<i64> {
    let mut remaining = total;
    let mut shares = Vec::with_capacity(parts);
    for _ in 1..parts {
        let share = rng.gen_range(0..=remaining);
        shares.push(share);
        remaining -= share;
    }
    shares.push(remaining);
    shares
}
