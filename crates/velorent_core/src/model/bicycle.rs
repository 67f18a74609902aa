//! Fleet bicycle record and its add payload.
//!
//! # Invariants
//! - An unavailable bicycle names its holder in `renter_id`; an available
//!   one carries the empty string there, never a stale user id.
//! - New bicycles are persisted exactly as supplied, including a
//!   caller-chosen `is_available`/`renter_id` combination.

use crate::model::{now_epoch_ms, require, ValidationError};
use serde::{Deserialize, Serialize};

/// Payload accepted by the add-bicycle operation.
///
/// `is_available` and `renter_id` are structurally required by the payload
/// shape; only `kind` additionally carries a non-empty rule, so an
/// unassigned bicycle is added with `renter_id: ""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BicycleDraft {
    /// Bicycle category, e.g. `"road"` or `"cargo"`. Required, non-empty.
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial availability chosen by the caller.
    pub is_available: bool,
    /// Initial holder id; empty for an unassigned bicycle.
    pub renter_id: String,
}

impl BicycleDraft {
    /// Checks that every required payload field is present and non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("type", &self.kind)
    }
}

/// A bicycle in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bicycle {
    /// Opaque unique id allocated at creation.
    pub bicycle_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_available: bool,
    /// Id of the user currently holding this bicycle; empty when available.
    pub renter_id: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation time in epoch milliseconds; `None` until first mutation.
    pub updated_at: Option<i64>,
}

impl Bicycle {
    /// Builds a record from a validated payload under a freshly allocated id.
    pub fn from_draft(bicycle_id: impl Into<String>, draft: BicycleDraft) -> Self {
        Self {
            bicycle_id: bicycle_id.into(),
            kind: draft.kind,
            is_available: draft.is_available,
            renter_id: draft.renter_id,
            created_at: now_epoch_ms(),
            updated_at: None,
        }
    }

    /// Marks the bicycle as held by `user_id`.
    pub fn mark_rented(&mut self, user_id: impl Into<String>) {
        self.is_available = false;
        self.renter_id = user_id.into();
    }

    /// Marks the bicycle as available again and clears the holder.
    pub fn mark_returned(&mut self) {
        self.is_available = true;
        self.renter_id.clear();
    }

    /// Checks record integrity before persistence. `renter_id` may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("bicycleId", &self.bicycle_id)?;
        require("type", &self.kind)
    }
}
