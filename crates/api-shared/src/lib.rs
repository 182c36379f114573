//! # API Shared
//!
//! Shared wire definitions for the Leadflow APIs.
//!
//! Contains:
//! - Fixture record types (leads, analytics, nurture flows) in their JSON shape
//! - Request and response envelopes for the REST API (`types` module)
//! - Shared services like `HealthService`
//!
//! Used by `leadflow-core`, `api-rest` and the CLI for common functionality.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
