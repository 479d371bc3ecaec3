//! Shared HTTP building blocks: the response envelope and JSON extractor

pub mod envelope;
pub mod json;

pub use envelope::*;
pub use json::{EnvelopeJson, EnvelopeJsonRejection};
