use crate::domain::expense::Expense;
use crate::domain::member::{Member, MemberId};
use crate::domain::ports::TripStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Trip {
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

/// A thread-safe in-memory trip store.
///
/// Uses `Arc<RwLock<..>>` so clones share the same trip. Members and expenses
/// are kept in `Vec`s to preserve insertion order.
#[derive(Default, Clone)]
pub struct InMemoryTripStore {
    trip: Arc<RwLock<Trip>>,
}

impl InMemoryTripStore {
    /// Creates a new, empty in-memory trip store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a snapshot.
    pub fn with_snapshot(members: Vec<Member>, expenses: Vec<Expense>) -> Self {
        Self {
            trip: Arc::new(RwLock::new(Trip { members, expenses })),
        }
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn members(&self) -> Result<Vec<Member>> {
        Ok(self.trip.read().await.members.clone())
    }

    async fn expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.trip.read().await.expenses.clone())
    }

    async fn insert_member(&self, member: Member) -> Result<bool> {
        let mut trip = self.trip.write().await;
        if trip.members.iter().any(|m| m.id == member.id) {
            return Ok(false);
        }
        trip.members.push(member);
        Ok(true)
    }

    async fn delete_member(&self, member_id: &MemberId) -> Result<bool> {
        let mut trip = self.trip.write().await;
        let before = trip.members.len();
        trip.members.retain(|m| m.id != *member_id);
        Ok(trip.members.len() != before)
    }

    async fn insert_expense(&self, expense: Expense) -> Result<bool> {
        let mut trip = self.trip.write().await;
        if trip.expenses.iter().any(|e| e.id == expense.id) {
            return Ok(false);
        }
        trip.expenses.push(expense);
        Ok(true)
    }

    async fn replace_expense(&self, expense: Expense) -> Result<bool> {
        let mut trip = self.trip.write().await;
        match trip.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let mut trip = self.trip.write().await;
        let before = trip.expenses.len();
        trip.expenses.retain(|e| e.id != expense_id);
        Ok(trip.expenses.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::SplitType;
    use crate::domain::money::Amount;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_members_keep_order() {
        let store = InMemoryTripStore::new();
        assert!(store.insert_member(Member::new("b", "Bob")).await.unwrap());
        assert!(store.insert_member(Member::new("a", "Alice")).await.unwrap());
        assert!(!store.insert_member(Member::new("b", "Robert")).await.unwrap());

        let members = store.members().await.unwrap();
        assert_eq!(members, vec![Member::new("b", "Bob"), Member::new("a", "Alice")]);

        assert!(store.delete_member(&MemberId::from("b")).await.unwrap());
        assert!(!store.delete_member(&MemberId::from("b")).await.unwrap());
        assert_eq!(store.members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_expenses() {
        let store = InMemoryTripStore::new();
        let expense = Expense::new(
            "e1",
            Amount::new(dec!(100.0)).unwrap(),
            "a",
            SplitType::Equally,
            vec![],
        );

        assert!(store.insert_expense(expense.clone()).await.unwrap());
        assert_eq!(store.expenses().await.unwrap(), vec![expense.clone()]);

        let mut renamed = expense.clone();
        renamed.description = "Dinner".to_string();
        assert!(!store.insert_expense(renamed.clone()).await.unwrap());
        assert_eq!(store.expenses().await.unwrap(), vec![expense]);

        assert!(store.replace_expense(renamed.clone()).await.unwrap());
        assert_eq!(store.expenses().await.unwrap(), vec![renamed]);

        assert!(store.delete_expense("e1").await.unwrap());
        assert!(store.expenses().await.unwrap().is_empty());

        let missing = Expense::new(
            "e2",
            Amount::new(dec!(5.0)).unwrap(),
            "a",
            SplitType::Equally,
            vec![],
        );
        assert!(!store.replace_expense(missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryTripStore::with_snapshot(vec![Member::new("a", "Alice")], vec![]);
        let shared = store.clone();

        let handle = tokio::spawn(async move {
            shared.insert_member(Member::new("b", "Bob")).await.unwrap();
        });
        handle.await.unwrap();

        assert_eq!(store.members().await.unwrap().len(), 2);
    }
}
