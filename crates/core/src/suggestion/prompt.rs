//! Prompt validation and the upstream request body.

use serde::Serialize;

/// A prompt that is guaranteed to contain non-whitespace text.
///
/// The input is trimmed during construction; the trimmed text is what gets sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Returns `None` if `input` is absent, empty or whitespace-only.
    pub fn new(input: Option<&str>) -> Option<Self> {
        let trimmed = input?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap the prompt in the instruction template that steers tone and structure.
    pub fn instruction(&self) -> String {
        format!(
            "Create a personalized follow-up message for this CRM lead scenario: {}. \
             Be professional, specific, and include clear next steps.",
            self.0
        )
    }
}

/// Sampling parameters. Fixed per call; callers cannot change them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl GenerationParameters {
    pub const FIXED: Self = Self {
        max_new_tokens: 150,
        temperature: 0.7,
        do_sample: true,
        return_full_text: false,
    };
}

/// JSON body of one text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self {
            inputs: prompt.instruction(),
            parameters: GenerationParameters::FIXED,
        }
    }
}
