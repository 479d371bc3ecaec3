//! Route modules: one directory per resource, plus cross-cutting middleware

pub mod health;
pub mod metrics;
pub mod request_id;
pub mod users;
