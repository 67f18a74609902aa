//! Rental lifecycle coordinator.
//!
//! # Responsibility
//! - Orchestrate rent and return across the user, fleet and ledger stores.
//! - Enforce existence, availability and holder checks before any mutation.
//!
//! # Invariants
//! - A bicycle is unavailable exactly while a user holds it; returning
//!   restores availability and clears the holder in the same overwrite.
//! - Every appended ledger record names a bicycle that was available
//!   immediately before the append.
//! - Renting performs two sequential single-key writes (ledger append,
//!   then bicycle overwrite) with no rollback. Callers must drive each
//!   operation to completion before starting the next; a concurrent host
//!   needs per-bicycle mutual exclusion around rent and return.

use crate::id::IdProvider;
use crate::model::renter::{RentRequest, Renter};
use crate::model::{require, ValidationError};
use crate::repo::bicycle_repo::BicycleRepository;
use crate::repo::renter_repo::RenterRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RentalResult<T> = Result<T, RentalError>;

/// Coordinator error: payload, lookup, availability and holder failures.
#[derive(Debug)]
pub enum RentalError {
    /// A required input field is missing or empty; storage is untouched.
    Validation(ValidationError),
    /// No user exists under the supplied id.
    UserNotFound(String),
    /// No bicycle exists under the supplied id.
    BicycleNotFound(String),
    /// The bicycle is already held by a user.
    BicycleUnavailable(String),
    /// The caller is not the user recorded as the current holder.
    NotCurrentRenter { bicycle_id: String, user_id: String },
    /// Underlying store failure.
    Repo(RepoError),
}

impl Display for RentalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user `{id}` does not exist"),
            Self::BicycleNotFound(id) => write!(f, "bicycle `{id}` does not exist"),
            Self::BicycleUnavailable(id) => write!(f, "bicycle `{id}` is currently unavailable"),
            Self::NotCurrentRenter {
                bicycle_id,
                user_id,
            } => write!(
                f,
                "user `{user_id}` does not have the right to return bicycle `{bicycle_id}`"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RentalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RentalError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for RentalError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Coordinator over the three stores plus an id provider for ledger ids.
pub struct RentalService<U, B, L, I>
where
    U: UserRepository,
    B: BicycleRepository,
    L: RenterRepository,
    I: IdProvider,
{
    users: U,
    fleet: B,
    ledger: L,
    ids: I,
}

impl<U, B, L, I> RentalService<U, B, L, I>
where
    U: UserRepository,
    B: BicycleRepository,
    L: RenterRepository,
    I: IdProvider,
{
    /// Creates a coordinator over the provided stores and id provider.
    pub fn new(users: U, fleet: B, ledger: L, ids: I) -> Self {
        Self {
            users,
            fleet,
            ledger,
            ids,
        }
    }

    /// Rents a bicycle to `user_id`.
    ///
    /// # Contract
    /// - `userId`, `rentTime` and `bicycleId` must all be non-empty.
    /// - The user and the bicycle must exist, and the bicycle must be
    ///   available; any failed check leaves both stores unchanged.
    /// - On success the ledger gains one record and the bicycle is
    ///   overwritten as held by `user_id`, in that order.
    pub fn rent_bicycle(&mut self, user_id: &str, request: RentRequest) -> RentalResult<Renter> {
        require("userId", user_id)?;
        request.validate()?;

        let user = self
            .users
            .get_user(user_id)?
            .ok_or_else(|| RentalError::UserNotFound(user_id.to_string()))?;

        let bicycle = self
            .fleet
            .get_bicycle(&request.bicycle_id)?
            .ok_or_else(|| RentalError::BicycleNotFound(request.bicycle_id.clone()))?;

        if !bicycle.is_available {
            warn!(
                "event=rent_bicycle module=service status=error error_code=bicycle_unavailable user_id={} bicycle_id={}",
                user.user_id, bicycle.bicycle_id
            );
            return Err(RentalError::BicycleUnavailable(bicycle.bicycle_id));
        }

        let renter = Renter::from_request(self.ids.next_id(), user.user_id, request);
        self.ledger.append_renter(&renter)?;

        let mut held = bicycle;
        held.mark_rented(renter.renter_user_id.as_str());
        self.fleet.replace_bicycle(&held)?;

        info!(
            "event=rent_bicycle module=service status=ok user_id={} bicycle_id={} renter_id={}",
            renter.renter_user_id, renter.bicycle_id, renter.renter_id
        );
        Ok(renter)
    }

    /// Returns a bicycle currently held by `user_id`.
    ///
    /// # Contract
    /// - `userId` and `bicycleId` must be non-empty.
    /// - The bicycle must exist and its recorded holder must equal
    ///   `user_id`; availability itself is not consulted, so returning an
    ///   unheld bicycle fails the holder check.
    /// - On success the bicycle is overwritten as available with the
    ///   holder cleared; the ledger record from the rent stays untouched.
    pub fn return_bicycle(&mut self, user_id: &str, bicycle_id: &str) -> RentalResult<bool> {
        require("userId", user_id)?;
        require("bicycleId", bicycle_id)?;

        let bicycle = self
            .fleet
            .get_bicycle(bicycle_id)?
            .ok_or_else(|| RentalError::BicycleNotFound(bicycle_id.to_string()))?;

        if bicycle.renter_id != user_id {
            warn!(
                "event=return_bicycle module=service status=error error_code=not_current_renter user_id={user_id} bicycle_id={bicycle_id}"
            );
            return Err(RentalError::NotCurrentRenter {
                bicycle_id: bicycle.bicycle_id,
                user_id: user_id.to_string(),
            });
        }

        let mut released = bicycle;
        released.mark_returned();
        self.fleet.replace_bicycle(&released)?;

        info!("event=return_bicycle module=service status=ok user_id={user_id} bicycle_id={bicycle_id}");
        Ok(true)
    }

    /// Gets one ledger record by id.
    pub fn get_renter(&self, renter_id: &str) -> RentalResult<Option<Renter>> {
        Ok(self.ledger.get_renter(renter_id)?)
    }
}
