//! Accounts module: the user operation dispatcher
//!
//! Routes one typed [`Action`] to its behaviour against an injected
//! [`UserStore`](crate::domain::UserStore) and returns an [`Outcome`].

pub mod action;
pub mod dispatcher;
pub mod error;

pub use action::{
    Action, CreateUserInput, GetUserInput, ListUsersInput, LoginInput, ACTION_NAMES,
};
pub use dispatcher::{Outcome, UserDispatcher, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
pub use error::OperationError;
