//! Constants used throughout the Leadflow core crate.
//!
//! Upstream defaults, fixture filenames and the post-processing thresholds of the
//! suggestion pipeline live here so there is a single place to tune them.

use std::time::Duration;

/// Default upstream text-generation endpoint.
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

/// Credential value shipped in sample `.env` files; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "your_hugging_face_api_key_here";

/// Deadline for one upstream exchange.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// User agent sent to the inference service.
pub const USER_AGENT: &str = concat!("leadflow/", env!("CARGO_PKG_VERSION"));

/// Generated text shorter than this (after trimming) is discarded.
pub const MIN_GENERATED_CHARS: usize = 20;

/// A replacement line for echoed output must be longer than this.
pub const MIN_REPLACEMENT_LINE_CHARS: usize = 30;

/// Lower-cased instruction fragment whose presence marks an echoed template.
pub const TEMPLATE_ECHO_MARKER: &str = "create a personalized";

/// Lower-cased fragments that disqualify a line from being selected.
pub const TEMPLATE_ECHO_FRAGMENTS: [&str; 2] = ["create a personalized", "crm lead scenario"];

/// Filename of the lead fixture.
pub const LEADS_FIXTURE_FILENAME: &str = "leads.json";

/// Filename of the analytics fixture.
pub const ANALYTICS_FIXTURE_FILENAME: &str = "analytics.json";

/// Default number of channels returned by rankings.
pub const DEFAULT_RANKING_LIMIT: usize = 5;

/// Upper bound on the number of channels returned by rankings.
pub const MAX_RANKING_LIMIT: usize = 20;
