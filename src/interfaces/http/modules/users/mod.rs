//! Users module: the multiplexed user operations endpoint

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
