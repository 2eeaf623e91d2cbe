use super::expense::{Expense, ExpenseCategory, SplitDetail, SplitType};
use super::member::MemberId;
use super::money::{Amount, Money};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A member's net position after all expenses: positive when owed money,
/// negative when owing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub member_id: MemberId,
    pub name: String,
    pub amount: Money,
}

/// One directed transfer that moves outstanding balances toward zero.
///
/// Computed fresh from the current expenses on every request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub from_id: MemberId,
    pub from: String,
    pub to_id: MemberId,
    pub to: String,
    pub amount: Money,
}

impl Settlement {
    /// Records this transfer as a payment from the debtor that the creditor
    /// owes in full, which cancels the transfer on the next calculation.
    pub fn to_expense(&self, id: impl Into<String>) -> Result<Expense> {
        let amount = Amount::new(self.amount.value())?;
        let mut expense = Expense::new(
            id,
            amount,
            self.from_id.as_str(),
            SplitType::ByAmount,
            vec![SplitDetail::amount(self.to_id.as_str(), amount.value())],
        );
        expense.description = format!("{} paid {}", self.from, self.to);
        expense.category = ExpenseCategory::SettlementPayment;
        Ok(expense)
    }
}
