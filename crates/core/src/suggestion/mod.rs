//! AI-assisted follow-up suggestions.
//!
//! A prompt goes through a fixed chain of stages: validation, credential check, one upstream
//! generation call under a deadline, body decoding, error classification, text extraction and
//! post-processing. Every stage that fails ends the chain with a scripted [`FallbackKind`]
//! message, so a caller always receives a usable `{ message }`.

pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod response;
pub mod upstream;

pub use fallback::FallbackKind;
pub use generator::SuggestionService;
pub use prompt::{GenerationParameters, GenerationRequest, Prompt};
pub use response::GeneratedText;
pub use upstream::{HuggingFaceClient, InferenceClient, TransportError, UpstreamReply};
