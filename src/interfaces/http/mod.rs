//! HTTP REST API interfaces
//!
//! - `common`: response envelope and JSON extractor
//! - `modules`: route handlers and middleware (users, health, metrics, request id)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
