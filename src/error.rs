use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Unknown member: {0}")]
    UnknownMember(String),
    #[error("Duplicate member: {0}")]
    DuplicateMember(String),
    #[error("Member {0} is referenced by existing expenses")]
    MemberInUse(String),
    #[error("Duplicate expense: {0}")]
    DuplicateExpense(String),
    #[error("Unknown expense: {0}")]
    UnknownExpense(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;
