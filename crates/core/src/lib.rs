//! # Leadflow Core
//!
//! Core business logic for the Leadflow CRM demo.
//!
//! This crate contains pure data operations over static fixtures and the suggestion pipeline:
//! - AI follow-up suggestions with scripted fallbacks (`suggestion`)
//! - Fixture loading (`fixtures`), lead queries (`leads`), channel analytics (`analytics`)
//! - The nurture flow catalog (`nurture`) and display helpers (`format`)
//!
//! **No API concerns**: HTTP servers, routing and OpenAPI belong in `api-rest`; wire types are
//! shared through `api-shared`.

pub mod analytics;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod leads;
pub mod nurture;
pub mod suggestion;

// Use the shared api-shared crate for wire types.
pub use api_shared as types;

pub use config::{CoreConfig, UpstreamCredential};
pub use error::{CoreError, CoreResult};
pub use fixtures::FixtureStore;
pub use leads::LeadFilter;
pub use nurture::NurtureCatalog;
pub use suggestion::{FallbackKind, SuggestionService};
