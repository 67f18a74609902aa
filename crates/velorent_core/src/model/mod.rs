//! Domain model for the rental inventory.
//!
//! # Responsibility
//! - Define the canonical user, bicycle and rental-record shapes plus the
//!   operation payloads that create them.
//! - Own required-field validation shared by all payloads and records.
//!
//! # Invariants
//! - Every record is keyed by an opaque string id allocated externally; the
//!   model never inspects id structure.
//! - Wire field names follow the external contract (camelCase, bicycle kind
//!   serialized as `type`).

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod bicycle;
pub mod renter;
pub mod user;

/// Payload or record validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty. The field name uses the wire
    /// spelling (`userName`, `bicycleId`, ...).
    MissingField { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "required field `{field}` is missing or empty")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty required values, mirroring the external contract's notion
/// of a missing field. Whitespace is not trimmed; only `""` is absent.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

/// Current time in epoch milliseconds, the timestamp unit used throughout.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
