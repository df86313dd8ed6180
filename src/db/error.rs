//! Database error types.

use derive_more::{Display, Error};

/// Broad classification of a database failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// A uniqueness constraint was violated (e.g. duplicate username).
    Conflict,
    /// The connection could not be established.
    Connection,
    /// Any other query or migration failure.
    Query,
}

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Classification of the failure.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        self.kind == DbErrorKind::Conflict
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        let kind = match &err {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => DbErrorKind::Conflict,
            _ => DbErrorKind::Query,
        };
        Self::new(kind, format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, format!("Connection error: {}", err))
    }
}
