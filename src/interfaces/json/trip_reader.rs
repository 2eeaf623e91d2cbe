use crate::domain::expense::Expense;
use crate::domain::member::Member;
use crate::error::{Result, SplitError};
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
struct RawTrip {
    members: Vec<Member>,
    #[serde(default)]
    expenses: Vec<serde_json::Value>,
}

/// Reads a trip snapshot: `{ "members": [..], "expenses": [..] }`.
///
/// The document and its roster must be well-formed, but each expense is
/// decoded on its own so that one bad record does not hide the rest.
pub struct TripReader {
    members: Vec<Member>,
    expenses: Vec<serde_json::Value>,
}

impl TripReader {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let raw: RawTrip = serde_json::from_reader(source)?;
        Ok(Self {
            members: raw.members,
            expenses: raw.expenses,
        })
    }

    /// Splits into the roster and a lazy iterator over decoded expenses.
    pub fn into_parts(self) -> (Vec<Member>, impl Iterator<Item = Result<Expense>>) {
        let expenses = self
            .expenses
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(SplitError::from));
        (self.members, expenses)
    }
}
