//! Registered-user record and its creation payload.
//!
//! # Invariants
//! - Users are immutable after creation: no update or delete operation
//!   exists, so `updated_at` stays `None` for the record's lifetime.

use crate::model::{now_epoch_ms, require, ValidationError};
use serde::{Deserialize, Serialize};

/// Payload accepted by the create-user operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Display name. Required, non-empty.
    pub user_name: String,
    /// Postal address. Required, non-empty.
    pub user_address: String,
    /// Age, carried as an opaque string per the external contract.
    pub user_age: String,
}

impl UserDraft {
    /// Checks that every required payload field is present and non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("userName", &self.user_name)?;
        require("userAddress", &self.user_address)?;
        require("userAge", &self.user_age)
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique id allocated at creation.
    pub user_id: String,
    pub user_name: String,
    pub user_address: String,
    pub user_age: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation time in epoch milliseconds; `None` until first mutation.
    pub updated_at: Option<i64>,
}

impl User {
    /// Builds a record from a validated payload under a freshly allocated id.
    pub fn from_draft(user_id: impl Into<String>, draft: UserDraft) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: draft.user_name,
            user_address: draft.user_address,
            user_age: draft.user_age,
            created_at: now_epoch_ms(),
            updated_at: None,
        }
    }

    /// Checks record integrity before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("userId", &self.user_id)?;
        require("userName", &self.user_name)?;
        require("userAddress", &self.user_address)?;
        require("userAge", &self.user_age)
    }
}
