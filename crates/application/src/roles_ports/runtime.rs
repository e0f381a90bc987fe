use chrono::{DateTime, Utc};

/// Kind of record an identifier is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Role identifier.
    Role,
    /// Role assignment identifier.
    Assignment,
}

impl IdKind {
    /// Returns the identifier prefix for this kind.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Assignment => "assignment",
        }
    }
}

/// Source of unique record identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns an identifier never returned before by this generator.
    fn next_id(&self, kind: IdKind) -> String;
}

/// Source of the current time for audit stamps.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
