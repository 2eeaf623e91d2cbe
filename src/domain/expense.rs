use super::member::MemberId;
use super::money::{Amount, Money};
use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an expense's cost is divided among members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitType {
    /// Equal shares across the listed members, or across every member of
    /// the trip when no members are listed.
    Equally,
    /// Each detail's `amount` is the exact share owed.
    ByAmount,
    /// Each detail's `percentage` (0-100) of the total is owed.
    ByPercentage,
    /// Split types written by older clients. Settled as an equal split
    /// across all current members.
    #[serde(other)]
    Unrecognized,
}

/// One member's part in a split. Which field matters depends on the
/// expense's `SplitType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDetail {
    pub member_id: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

impl SplitDetail {
    pub fn member(member_id: impl Into<String>) -> Self {
        Self {
            member_id: MemberId::new(member_id),
            amount: None,
            percentage: None,
        }
    }

    pub fn amount(member_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Self::member(member_id)
        }
    }

    pub fn percentage(member_id: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            percentage: Some(percentage),
            ..Self::member(member_id)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    #[default]
    General,
    /// A recorded transfer between two members.
    SettlementPayment,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub amount: Amount,
    pub paid_by_id: MemberId,
    pub split_type: SplitType,
    #[serde(default)]
    pub split_details: Vec<SplitDetail>,
    #[serde(default)]
    pub category: ExpenseCategory,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        amount: Amount,
        paid_by_id: impl Into<String>,
        split_type: SplitType,
        split_details: Vec<SplitDetail>,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            amount,
            paid_by_id: MemberId::new(paid_by_id),
            split_type,
            split_details,
            category: ExpenseCategory::General,
        }
    }

    /// Whether the member pays for or takes part in this expense explicitly.
    pub fn references(&self, member_id: &MemberId) -> bool {
        self.paid_by_id == *member_id
            || self.split_details.iter().any(|d| d.member_id == *member_id)
    }

    /// Checks that the split shares are well-formed.
    ///
    /// Settlement calculation never calls this: it accepts whatever it is
    /// given. Callers that create expenses use it to reject bad input up front.
    pub fn check_shares(&self) -> Result<()> {
        match self.split_type {
            SplitType::Equally => Ok(()),
            SplitType::ByAmount => {
                let shares = self.shares_of(|d| d.amount, "amount")?;
                self.check_total(shares, self.amount.value(), "amounts")
            }
            SplitType::ByPercentage => {
                let shares = self.shares_of(|d| d.percentage, "percentage")?;
                if let Some(over) = shares.iter().find(|p| **p > Decimal::ONE_HUNDRED) {
                    return Err(SplitError::ValidationError(format!(
                        "Expense {}: percentage {over} exceeds 100",
                        self.id
                    )));
                }
                self.check_total(shares, Decimal::ONE_HUNDRED, "percentages")
            }
            SplitType::Unrecognized => Err(SplitError::ValidationError(format!(
                "Expense {}: unsupported split type",
                self.id
            ))),
        }
    }

    fn shares_of(
        &self,
        field: impl Fn(&SplitDetail) -> Option<Decimal>,
        name: &str,
    ) -> Result<Vec<Decimal>> {
        if self.split_details.is_empty() {
            return Err(SplitError::ValidationError(format!(
                "Expense {}: split details are required",
                self.id
            )));
        }
        self.split_details
            .iter()
            .map(|detail| match field(detail) {
                Some(value) if value >= Decimal::ZERO => Ok(value),
                Some(value) => Err(SplitError::ValidationError(format!(
                    "Expense {}: negative {name} {value} for {}",
                    self.id, detail.member_id
                ))),
                None => Err(SplitError::ValidationError(format!(
                    "Expense {}: missing {name} for {}",
                    self.id, detail.member_id
                ))),
            })
            .collect()
    }

    fn check_total(&self, shares: Vec<Decimal>, expected: Decimal, what: &str) -> Result<()> {
        let total = shares
            .into_iter()
            .fold(Money::ZERO, |acc, share| acc + Money::new(share));
        if (total - Money::new(expected)).is_settled() {
            Ok(())
        } else {
            Err(SplitError::ValidationError(format!(
                "Expense {}: {what} sum to {total}, expected {expected}",
                self.id
            )))
        }
    }
}
