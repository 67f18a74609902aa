//! Identifier allocation for new records.
//!
//! # Responsibility
//! - Supply fresh opaque ids to the services that create records.
//!
//! # Invariants
//! - Ids are unique per provider; no provider ever hands out an id twice.
//! - Ids are opaque strings; callers must not rely on their structure.

use uuid::Uuid;

/// Capability for allocating record ids.
pub trait IdProvider {
    /// Returns a fresh id, never previously returned by this provider.
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids, the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-NNNN` ids for tests and demos.
#[derive(Debug, Clone)]
pub struct SequenceIdProvider {
    prefix: String,
    next: u64,
}

impl SequenceIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdProvider for SequenceIdProvider {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{}-{:04}", self.prefix, self.next)
    }
}
