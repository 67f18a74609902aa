//! Rental-ledger record and the rent payload.
//!
//! # Invariants
//! - Ledger records are append-only: once written they are never mutated or
//!   deleted, so a record reflects the rental as it was opened.
//! - `renter_id` is the record's own unique id; the holding user lives in
//!   `renter_user_id`.

use crate::model::{require, ValidationError};
use serde::{Deserialize, Serialize};

/// Payload accepted by the rent-bicycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRequest {
    /// Caller-supplied rental start time, carried as an opaque string.
    pub rent_time: String,
    /// Id of the bicycle to rent. Required, non-empty.
    pub bicycle_id: String,
}

impl RentRequest {
    /// Checks that every required payload field is present and non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("rentTime", &self.rent_time)?;
        require("bicycleId", &self.bicycle_id)
    }
}

/// One entry in the rental ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renter {
    /// Opaque unique id of this ledger record.
    pub renter_id: String,
    /// Id of the user who rented the bicycle.
    pub renter_user_id: String,
    /// Caller-supplied rental start time, echoed from the payload.
    pub rent_time: String,
    /// Id of the rented bicycle.
    pub bicycle_id: String,
}

impl Renter {
    /// Builds a ledger record from a validated payload under a freshly
    /// allocated id, on behalf of `renter_user_id`.
    pub fn from_request(
        renter_id: impl Into<String>,
        renter_user_id: impl Into<String>,
        request: RentRequest,
    ) -> Self {
        Self {
            renter_id: renter_id.into(),
            renter_user_id: renter_user_id.into(),
            rent_time: request.rent_time,
            bicycle_id: request.bicycle_id,
        }
    }

    /// Checks record integrity before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("renterId", &self.renter_id)?;
        require("renterUserId", &self.renter_user_id)?;
        require("rentTime", &self.rent_time)?;
        require("bicycleId", &self.bicycle_id)
    }
}
