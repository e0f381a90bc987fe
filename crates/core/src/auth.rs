use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppResult, NonEmptyString};

/// Identity of the caller performing a mutation, recorded in audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    display_name: NonEmptyString,
}

impl ActorIdentity {
    /// Creates an actor identity from the authenticated user's display name.
    pub fn new(display_name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            display_name: NonEmptyString::for_field("actor", display_name)?,
        })
    }

    /// Returns the display name recorded in audit entries.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

impl Display for ActorIdentity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.display_name())
    }
}
