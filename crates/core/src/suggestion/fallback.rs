//! Scripted fallback messages, one per failure stage.
//!
//! Each message reads as a plausible suggestion on its own; responses do not reveal whether the
//! text was generated or scripted.

/// Stage at which the suggestion chain stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackKind {
    /// Prompt missing, not a string, or blank.
    InvalidInput,
    /// Credential missing or still the placeholder.
    NoCredential,
    /// Transport error or deadline exceeded.
    NetworkFailure,
    /// Upstream body is not JSON.
    ParseFailure,
    /// Non-success status or an `error` field in the body.
    UpstreamError,
    /// No usable generated text.
    ExtractionFailure,
    /// Anything else.
    UnclassifiedFault,
}

const INVALID_INPUT: &str = "Please provide a valid prompt to generate AI suggestions.";

const NO_CREDENTIAL: &str = "For Series B FinTech leads asking about pricing and implementation: \"Thanks for the great questions! Based on our conversation, I can see you're evaluating speed-to-market. Here's what I'd recommend: 1) Let's schedule a 30-minute technical deep-dive this week to show you our 2-week implementation process, 2) I'll send you our FinTech ROI calculator showing typical 6-month payback, 3) Given your Series B timeline, I can connect you directly with our CTO for architecture discussions. Are you available Thursday 2 PM for a founder-to-founder call to discuss pricing tiers?\"";

const NETWORK_FAILURE: &str = "Smart suggestion for your FinTech lead: \"Hi [Name], Great questions on pricing and implementation speed! For Series B companies like yours, we typically see 2-week implementation with 6-month ROI. I'd love to show you our FinTech-specific case study and discuss custom pricing. Are you free for a 30-minute call this week? I can also connect you with our CTO for technical architecture questions.\"";

const PARSE_FAILURE: &str = "Follow-up recommendation: Address pricing transparency and implementation timeline directly. \"Thanks for your interest! For Series B FinTech companies, our standard implementation is 2-3 weeks with dedicated support. I'll send you our pricing guide and FinTech case studies. When would be a good time for a brief call to discuss your specific requirements?\"";

const UPSTREAM_ERROR: &str = "Strategic follow-up approach: Since they asked about pricing and speed, lead with value: \"Hi [Name], Following up on your pricing and implementation questions - I wanted to share that most Series B FinTech companies see ROI within 6 months, with implementation typically taking 2-3 weeks. I'd love to show you our calculator and timeline. Are you available for a brief call this week?\"";

const EXTRACTION_FAILURE: &str = "Personalized follow-up suggestion: \"Hi [Name], Thank you for the insightful questions about pricing and implementation speed during our demo. For Series B FinTech companies like yours, we typically see 2-week implementation with strong ROI within 6 months. I'd love to share our FinTech-specific pricing guide and connect you with a technical architect. Would you be available for a 30-minute follow-up call this week?\"";

const UNCLASSIFIED_FAULT: &str = "Expert recommendation for FinTech follow-up: Lead with pricing transparency and implementation confidence. \"Thanks for your questions! For Series B FinTech companies, we offer flexible pricing tiers and 2-3 week implementation. I'll send you our ROI calculator and implementation timeline. When would be good for a brief call to discuss your specific needs?\"";

impl FallbackKind {
    pub const ALL: [FallbackKind; 7] = [
        FallbackKind::InvalidInput,
        FallbackKind::NoCredential,
        FallbackKind::NetworkFailure,
        FallbackKind::ParseFailure,
        FallbackKind::UpstreamError,
        FallbackKind::ExtractionFailure,
        FallbackKind::UnclassifiedFault,
    ];

    /// The scripted text served for this stage.
    pub fn message(self) -> &'static str {
        match self {
            FallbackKind::InvalidInput => INVALID_INPUT,
            FallbackKind::NoCredential => NO_CREDENTIAL,
            FallbackKind::NetworkFailure => NETWORK_FAILURE,
            FallbackKind::ParseFailure => PARSE_FAILURE,
            FallbackKind::UpstreamError => UPSTREAM_ERROR,
            FallbackKind::ExtractionFailure => EXTRACTION_FAILURE,
            FallbackKind::UnclassifiedFault => UNCLASSIFIED_FAULT,
        }
    }

    /// Stable name for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackKind::InvalidInput => "invalid_input",
            FallbackKind::NoCredential => "no_credential",
            FallbackKind::NetworkFailure => "network_failure",
            FallbackKind::ParseFailure => "parse_failure",
            FallbackKind::UpstreamError => "upstream_error",
            FallbackKind::ExtractionFailure => "extraction_failure",
            FallbackKind::UnclassifiedFault => "unclassified_fault",
        }
    }
}
