pub mod user;

pub use user::{
    normalize_email, FindUsers, FoundUsers, NewUser, ProfileSummary, User, UserCandidate,
    UserFilter, UserSort, UserStore, UserType,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::{DomainError, DomainResult};
