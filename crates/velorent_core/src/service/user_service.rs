//! User registration use-case service.
//!
//! # Responsibility
//! - Validate create-user payloads before any storage access.
//! - Allocate ids, stamp creation time and persist through the repository.
//!
//! # Invariants
//! - A rejected payload leaves storage untouched.
//! - Id allocation happens only after the payload passes validation.

use crate::id::IdProvider;
use crate::model::user::{User, UserDraft};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;

/// Use-case service for user registration and lookup.
pub struct UserService<R: UserRepository, I: IdProvider> {
    repo: R,
    ids: I,
}

impl<R: UserRepository, I: IdProvider> UserService<R, I> {
    /// Creates a service using the provided repository and id provider.
    pub fn new(repo: R, ids: I) -> Self {
        Self { repo, ids }
    }

    /// Registers a new user from a creation payload.
    ///
    /// # Contract
    /// - `userName`, `userAddress` and `userAge` must all be non-empty.
    /// - Returns the persisted record under a freshly allocated `user_id`,
    ///   with `created_at` stamped and `updated_at` unset.
    pub fn create_user(&mut self, draft: UserDraft) -> RepoResult<User> {
        draft.validate()?;

        let user = User::from_draft(self.ids.next_id(), draft);
        self.repo.create_user(&user)?;
        Ok(user)
    }

    /// Gets one user by id.
    pub fn get_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        self.repo.get_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequenceIdProvider;
    use crate::model::ValidationError;
    use crate::repo::user_repo::MemoryUserRepository;
    use crate::repo::RepoError;

    fn draft() -> UserDraft {
        UserDraft {
            user_name: "Alice".to_string(),
            user_address: "1 Main St".to_string(),
            user_age: "30".to_string(),
        }
    }

    #[test]
    fn create_user_allocates_id_and_stamps_creation() {
        let mut repo = MemoryUserRepository::new();
        let mut service = UserService::new(&mut repo, SequenceIdProvider::new("user"));

        let user = service.create_user(draft()).unwrap();
        assert_eq!(user.user_id, "user-0001");
        assert_eq!(user.user_name, "Alice");
        assert!(user.created_at > 0);
        assert_eq!(user.updated_at, None);

        drop(service);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get_user("user-0001").unwrap().unwrap(), user);
    }

    #[test]
    fn create_user_rejects_empty_field_before_any_write() {
        let mut repo = MemoryUserRepository::new();
        let mut service = UserService::new(&mut repo, SequenceIdProvider::new("user"));

        let mut bad = draft();
        bad.user_address = String::new();
        let err = service.create_user(bad).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::MissingField {
                field: "userAddress"
            })
        ));

        drop(service);
        assert!(repo.is_empty());
    }

    #[test]
    fn rejected_payload_does_not_burn_an_id() {
        let mut repo = MemoryUserRepository::new();
        let mut service = UserService::new(&mut repo, SequenceIdProvider::new("user"));

        let mut bad = draft();
        bad.user_name = String::new();
        assert!(service.create_user(bad).is_err());

        let user = service.create_user(draft()).unwrap();
        assert_eq!(user.user_id, "user-0001");
    }

    #[test]
    fn get_user_returns_none_for_unknown_id() {
        let repo = MemoryUserRepository::new();
        let service = UserService::new(repo, SequenceIdProvider::new("user"));
        assert_eq!(service.get_user("user-0001").unwrap(), None);
    }
}
