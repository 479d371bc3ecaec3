//! # SafeDrive Accounts
//!
//! User account service for the SafeDrive platform: stores user records and
//! serves list/search, create, login and lookup through one action-tagged
//! HTTP endpoint (`POST /api/users/operations`).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: the user record, its schema and the `UserStore` port
//! - **application**: the operation dispatcher (all per-action decisions)
//! - **infrastructure**: SeaORM and in-memory stores, migrations
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle shared by the binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryUserStore, SeaOrmUserStore};

// Re-export API router
pub use interfaces::http::create_api_router;
