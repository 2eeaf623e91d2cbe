use super::expense::Expense;
use super::member::{Member, MemberId};
use crate::error::Result;
use async_trait::async_trait;

/// Storage for a single trip's roster and expenses.
///
/// Implementations return members and expenses in insertion order; the
/// settlement tie-break depends on member order. Inserts must check and
/// write atomically so an id is never stored twice or overwritten by one.
/// Guards spanning several calls (such as refusing to remove a member an
/// expense references) are not atomic against concurrent writers.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn members(&self) -> Result<Vec<Member>>;
    async fn expenses(&self) -> Result<Vec<Expense>>;
    /// Returns `false`, leaving the roster untouched, if the id is taken.
    async fn insert_member(&self, member: Member) -> Result<bool>;
    /// Returns whether a member was removed.
    async fn delete_member(&self, member_id: &MemberId) -> Result<bool>;
    /// Returns `false`, leaving the expenses untouched, if the id is taken.
    async fn insert_expense(&self, expense: Expense) -> Result<bool>;
    /// Replaces the expense with the same id in place. Returns `false` if
    /// there is none.
    async fn replace_expense(&self, expense: Expense) -> Result<bool>;
    /// Returns whether an expense was removed.
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

pub type TripStoreBox = Box<dyn TripStore>;
