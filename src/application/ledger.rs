use crate::application::engine;
use crate::domain::expense::Expense;
use crate::domain::member::{Member, MemberId};
use crate::domain::ports::TripStoreBox;
use crate::domain::settlement::{Balance, Settlement};
use crate::error::{Result, SplitError};
use tracing::info;

/// Entry point for a trip's roster, expenses and settlements.
///
/// `TripLedger` owns the storage backend and guards its writes: members
/// cannot be duplicated or removed while expenses reference them, and new
/// expenses must be well-formed. Settlements are recalculated from the
/// current snapshot on every call.
pub struct TripLedger {
    store: TripStoreBox,
}

impl TripLedger {
    pub fn new(store: TripStoreBox) -> Self {
        Self { store }
    }

    pub async fn settlements(&self) -> Result<Vec<Settlement>> {
        let (expenses, members) = self.snapshot().await?;
        Ok(engine::calculate_settlements(&expenses, &members))
    }

    pub async fn balances(&self) -> Result<Vec<Balance>> {
        let (expenses, members) = self.snapshot().await?;
        Ok(engine::net_balances(&expenses, &members))
    }

    pub async fn add_member(&self, member: Member) -> Result<()> {
        let member_id = member.id.clone();
        if !self.store.insert_member(member).await? {
            return Err(SplitError::DuplicateMember(member_id.to_string()));
        }
        info!(member = %member_id, "added member");
        Ok(())
    }

    /// Removes a member no expense refers to by id.
    ///
    /// Members who only take part through a default equal split are not
    /// protected; removing them shifts those expenses onto the rest.
    pub async fn remove_member(&self, member_id: &MemberId) -> Result<()> {
        let expenses = self.store.expenses().await?;
        if expenses.iter().any(|e| e.references(member_id)) {
            return Err(SplitError::MemberInUse(member_id.to_string()));
        }
        if !self.store.delete_member(member_id).await? {
            return Err(SplitError::UnknownMember(member_id.to_string()));
        }
        info!(member = %member_id, "removed member");
        Ok(())
    }

    /// Adds a new expense after checking its payer and shares. An existing
    /// expense with the same id is never overwritten.
    pub async fn add_expense(&self, expense: Expense) -> Result<()> {
        self.check_expense(&expense).await?;
        let expense_id = expense.id.clone();
        if !self.store.insert_expense(expense).await? {
            return Err(SplitError::DuplicateExpense(expense_id));
        }
        info!(expense = %expense_id, "added expense");
        Ok(())
    }

    /// Replaces an existing expense, checked the same way as a new one.
    pub async fn update_expense(&self, expense: Expense) -> Result<()> {
        self.check_expense(&expense).await?;
        let expense_id = expense.id.clone();
        if !self.store.replace_expense(expense).await? {
            return Err(SplitError::UnknownExpense(expense_id));
        }
        info!(expense = %expense_id, "updated expense");
        Ok(())
    }

    async fn check_expense(&self, expense: &Expense) -> Result<()> {
        let members = self.store.members().await?;
        if !members.iter().any(|m| m.id == expense.paid_by_id) {
            return Err(SplitError::UnknownMember(expense.paid_by_id.to_string()));
        }
        if let Some(detail) = expense
            .split_details
            .iter()
            .find(|d| !members.iter().any(|m| m.id == d.member_id))
        {
            return Err(SplitError::UnknownMember(detail.member_id.to_string()));
        }
        expense.check_shares()
    }

    pub async fn remove_expense(&self, expense_id: &str) -> Result<()> {
        if !self.store.delete_expense(expense_id).await? {
            return Err(SplitError::UnknownExpense(expense_id.to_string()));
        }
        info!(expense = expense_id, "removed expense");
        Ok(())
    }

    /// Stores a settlement as a new payment so it drops out of later results.
    /// Fails with `DuplicateExpense` if `expense_id` is already in use.
    pub async fn record_settlement(
        &self,
        expense_id: impl Into<String>,
        settlement: &Settlement,
    ) -> Result<Expense> {
        let expense = settlement.to_expense(expense_id)?;
        self.add_expense(expense.clone()).await?;
        Ok(expense)
    }

    async fn snapshot(&self) -> Result<(Vec<Expense>, Vec<Member>)> {
        let expenses = self.store.expenses().await?;
        let members = self.store.members().await?;
        Ok((expenses, members))
    }
}
