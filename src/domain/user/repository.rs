use async_trait::async_trait;

use super::schema::{validate_candidate, UserCandidate};
use super::{FindUsers, FoundUsers, NewUser, User};
use crate::shared::DomainResult;

/// Persistent record store for users.
///
/// Implementations own id and timestamp assignment and must enforce email
/// uniqueness themselves: a duplicate insert fails with
/// [`DomainError::Conflict`](crate::shared::DomainError::Conflict) on `email`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Applies the record schema to a candidate.
    fn validate(&self, candidate: UserCandidate) -> DomainResult<NewUser> {
        validate_candidate(candidate)
    }

    async fn insert(&self, user: NewUser) -> DomainResult<User>;

    /// Exact match on the stored (normalised) email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Malformed ids fail with `InvalidIdentifier`; unknown ids return `None`.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find(&self, query: FindUsers) -> DomainResult<FoundUsers>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}
