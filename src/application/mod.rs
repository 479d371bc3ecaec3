//! Application layer - use cases orchestrating the domain

pub mod accounts;

pub use accounts::{Action, OperationError, Outcome, UserDispatcher};
