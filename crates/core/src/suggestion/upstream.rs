//! Client for the upstream text-generation service.
//!
//! Uses reqwest with Bearer token auth. The client returns the raw status and body; decoding
//! and classification happen in the generator so that every failure maps to one fallback.

use super::prompt::GenerationRequest;
use crate::constants::USER_AGENT;
use crate::{CoreError, CoreResult};
use async_trait::async_trait;

/// Status and undecoded body of one upstream exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("inference request failed: {0}")]
    Other(String),
}

/// One text-generation call. Implementations must not retry.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<UpstreamReply, TransportError>;
}

/// Hugging Face Inference API client.
#[derive(Clone, Debug)]
pub struct HuggingFaceClient {
    http: reqwest::Client,
    url: String,
}

impl HuggingFaceClient {
    /// # Errors
    /// Returns `CoreError::HttpClient` if the TLS backend cannot be initialised.
    pub fn new(url: impl Into<String>) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CoreError::HttpClient)?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<UpstreamReply, TransportError> {
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        tracing::debug!(status, bytes = body.len(), "inference reply received");

        Ok(UpstreamReply::new(status, body.to_vec()))
    }
}
