//! Core domain logic for velorent, a bicycle rental inventory.
//! This crate is the single source of truth for rental business invariants.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use id::{IdProvider, SequenceIdProvider, UuidIdProvider};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bicycle::{Bicycle, BicycleDraft};
pub use model::renter::{RentRequest, Renter};
pub use model::user::{User, UserDraft};
pub use model::ValidationError;
pub use repo::bicycle_repo::{BicycleRepository, MemoryBicycleRepository, SqliteBicycleRepository};
pub use repo::renter_repo::{MemoryRenterRepository, RenterRepository, SqliteRenterRepository};
pub use repo::user_repo::{MemoryUserRepository, SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::fleet_service::FleetService;
pub use service::rental_service::{RentalError, RentalResult, RentalService};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
