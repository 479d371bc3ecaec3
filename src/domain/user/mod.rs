//! User aggregate
//!
//! Contains the User entity, the record schema, query types and the store
//! interface.

pub mod model;
pub mod query;
pub mod repository;
pub mod schema;

pub use model::{NewUser, ProfileSummary, User, UserType};
pub use query::{FindUsers, FoundUsers, UserFilter, UserSort};
pub use repository::UserStore;
pub use schema::{normalize_email, validate_candidate, UserCandidate};
