//! Data models: configuration and extraction results.

pub mod config;
pub mod fields;

pub use config::{ExtractionConfig, InvexConfig, ProviderConfig};
pub use fields::{DocumentFields, NOT_FOUND};
