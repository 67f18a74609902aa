//! Fleet management use-case service.
//!
//! # Responsibility
//! - Validate add-bicycle payloads and persist new fleet records.
//!
//! # Invariants
//! - Records are persisted exactly as supplied; the service never
//!   second-guesses a caller-chosen `is_available`/`renter_id` pair.

use crate::id::IdProvider;
use crate::model::bicycle::{Bicycle, BicycleDraft};
use crate::repo::bicycle_repo::BicycleRepository;
use crate::repo::RepoResult;

/// Use-case service for fleet registration and lookup.
pub struct FleetService<R: BicycleRepository, I: IdProvider> {
    repo: R,
    ids: I,
}

impl<R: BicycleRepository, I: IdProvider> FleetService<R, I> {
    /// Creates a service using the provided repository and id provider.
    pub fn new(repo: R, ids: I) -> Self {
        Self { repo, ids }
    }

    /// Adds a new bicycle to the fleet.
    ///
    /// # Contract
    /// - `type` must be non-empty; `isAvailable` and `renterId` are taken
    ///   verbatim, so a bicycle may enter the fleet already assigned.
    /// - Returns the persisted record under a freshly allocated
    ///   `bicycle_id`, with `created_at` stamped and `updated_at` unset.
    pub fn add_bicycle(&mut self, draft: BicycleDraft) -> RepoResult<Bicycle> {
        draft.validate()?;

        let bicycle = Bicycle::from_draft(self.ids.next_id(), draft);
        self.repo.create_bicycle(&bicycle)?;
        Ok(bicycle)
    }

    /// Gets one bicycle by id.
    pub fn get_bicycle(&self, bicycle_id: &str) -> RepoResult<Option<Bicycle>> {
        self.repo.get_bicycle(bicycle_id)
    }
}
