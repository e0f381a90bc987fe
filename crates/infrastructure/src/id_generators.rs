use std::sync::atomic::{AtomicU64, Ordering};

use staffdesk_application::{IdGenerator, IdKind};
use uuid::Uuid;

/// Identifier generator producing `<kind>-<uuid v4>` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }
}

/// Identifier generator producing `<kind>-<n>` values from a shared counter.
///
/// Intended for fixtures and demos where stable ids are easier to read.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    last: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id ends in `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator whose first id ends in `last + 1`.
    #[must_use]
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        let value = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{value}", kind.prefix())
    }
}
