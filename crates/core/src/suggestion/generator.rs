//! The suggestion pipeline.
//!
//! [`SuggestionService::generate`] runs the stage chain and reports which stage stopped it;
//! [`SuggestionService::suggest`] and [`SuggestionService::suggest_raw`] turn that outcome
//! into the `{ message }` returned to callers. The latter two never fail.

use super::fallback::FallbackKind;
use super::prompt::{GenerationRequest, Prompt};
use super::response::{self, GeneratedText};
use super::upstream::{HuggingFaceClient, InferenceClient};
use crate::config::{CoreConfig, UpstreamCredential};
use crate::CoreResult;
use api_shared::SuggestionRes;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Stateless suggestion generator.
///
/// Holds only read-only configuration and a shared client, so clones are cheap and concurrent
/// calls need no coordination.
#[derive(Clone)]
pub struct SuggestionService {
    client: Arc<dyn InferenceClient>,
    credential: UpstreamCredential,
    deadline: Duration,
}

impl SuggestionService {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        credential: UpstreamCredential,
        deadline: Duration,
    ) -> Self {
        Self {
            client,
            credential,
            deadline,
        }
    }

    /// Build a service backed by [`HuggingFaceClient`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        let client = HuggingFaceClient::new(cfg.inference_url())?;
        tracing::info!("inference endpoint: {}", client.url());
        Ok(Self::new(
            Arc::new(client),
            cfg.credential().clone(),
            cfg.upstream_timeout(),
        ))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Handle a raw request body of the form `{ "prompt": "..." }`.
    ///
    /// A body that is not JSON (or is JSON `null`) is an unclassified fault; any other JSON
    /// without a string `prompt` is invalid input.
    pub async fn suggest_raw(&self, body: &[u8]) -> SuggestionRes {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Null) => Self::fallback(FallbackKind::UnclassifiedFault),
            Ok(value) => {
                self.suggest(value.get("prompt").and_then(Value::as_str))
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "suggestion request body is not JSON");
                Self::fallback(FallbackKind::UnclassifiedFault)
            }
        }
    }

    /// Produce a suggestion for `prompt`, substituting scripted text on any failure.
    ///
    /// The chain runs in its own task so that a panic anywhere inside it still yields a
    /// message.
    pub async fn suggest(&self, prompt: Option<&str>) -> SuggestionRes {
        let this = self.clone();
        let prompt = prompt.map(str::to_owned);
        let outcome = tokio::spawn(async move { this.generate(prompt.as_deref()).await })
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "suggestion task failed");
                Err(FallbackKind::UnclassifiedFault)
            });

        match outcome {
            Ok(message) => SuggestionRes { message },
            Err(kind) => Self::fallback(kind),
        }
    }

    /// Run the stage chain.
    ///
    /// # Returns
    /// * `Ok(text)` - cleaned generated text
    /// * `Err(kind)` - the stage that stopped the chain
    pub async fn generate(&self, prompt: Option<&str>) -> Result<String, FallbackKind> {
        let prompt = Prompt::new(prompt).ok_or(FallbackKind::InvalidInput)?;
        let api_key = self.credential.key().ok_or(FallbackKind::NoCredential)?;

        let request = GenerationRequest::for_prompt(&prompt);
        let reply =
            match tokio::time::timeout(self.deadline, self.client.generate(api_key, &request))
                .await
            {
                Ok(Ok(reply)) => reply,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "inference request failed");
                    return Err(FallbackKind::NetworkFailure);
                }
                Err(_) => {
                    tracing::warn!(
                        deadline_ms = self.deadline.as_millis() as u64,
                        "inference request timed out"
                    );
                    return Err(FallbackKind::NetworkFailure);
                }
            };

        let body = response::parse_body(&reply.body)?;
        response::classify(reply.status, &body)?;

        GeneratedText::decode(&body)
            .and_then(|generated| response::clean_generated(generated.text()))
            .ok_or(FallbackKind::ExtractionFailure)
    }

    fn fallback(kind: FallbackKind) -> SuggestionRes {
        match kind {
            FallbackKind::InvalidInput | FallbackKind::NoCredential => {
                tracing::info!(kind = kind.as_str(), "serving scripted suggestion")
            }
            _ => tracing::warn!(kind = kind.as_str(), "serving scripted suggestion"),
        }
        SuggestionRes {
            message: kind.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::upstream::{TransportError, UpstreamReply};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const DEADLINE: Duration = Duration::from_secs(15);

    /// Returns the same reply every time and records what it was sent.
    struct Scripted {
        reply: Result<UpstreamReply, String>,
        calls: AtomicUsize,
        last_inputs: Mutex<Option<String>>,
    }

    impl Scripted {
        fn ok(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(UpstreamReply::new(status, body.as_bytes())),
                calls: AtomicUsize::new(0),
                last_inputs: Mutex::new(None),
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(reason.to_string()),
                calls: AtomicUsize::new(0),
                last_inputs: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl InferenceClient for Scripted {
        async fn generate(
            &self,
            _api_key: &str,
            request: &GenerationRequest,
        ) -> Result<UpstreamReply, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_inputs.lock().unwrap() = Some(request.inputs.clone());
            self.reply.clone().map_err(TransportError::Other)
        }
    }

    struct Hanging;

    #[async_trait]
    impl InferenceClient for Hanging {
        async fn generate(
            &self,
            _api_key: &str,
            _request: &GenerationRequest,
        ) -> Result<UpstreamReply, TransportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(UpstreamReply::new(200, r#"[{"generated_text":"far too late"}]"#))
        }
    }

    struct Panicking;

    #[async_trait]
    impl InferenceClient for Panicking {
        async fn generate(
            &self,
            _api_key: &str,
            _request: &GenerationRequest,
        ) -> Result<UpstreamReply, TransportError> {
            panic!("client bug");
        }
    }

    fn service(client: Arc<dyn InferenceClient>) -> SuggestionService {
        SuggestionService::new(
            client,
            UpstreamCredential::Present("hf_test".into()),
            DEADLINE,
        )
    }

    const GOOD_TEXT: &str = "Hi Priya, thanks for the pricing questions. Shall we book a demo Thursday?";

    #[tokio::test]
    async fn blank_or_missing_prompt_is_invalid_input() {
        let client = Scripted::ok(200, "[]");
        let svc = service(client.clone());
        for prompt in [None, Some(""), Some("   \n ")] {
            let res = svc.suggest(prompt).await;
            assert_eq!(res.message, FallbackKind::InvalidInput.message());
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_string_prompt_is_invalid_input() {
        let svc = service(Scripted::ok(200, "[]"));
        for body in [r#"{"prompt": 42}"#, r#"{"prompt": null}"#, r#"{}"#, r#"[1, 2]"#] {
            let res = svc.suggest_raw(body.as_bytes()).await;
            assert_eq!(res.message, FallbackKind::InvalidInput.message(), "{body}");
        }
    }

    #[tokio::test]
    async fn missing_or_placeholder_credential_uses_sample() {
        for credential in [UpstreamCredential::Missing, UpstreamCredential::Placeholder] {
            let client = Scripted::ok(200, "[]");
            let svc = SuggestionService::new(client.clone(), credential, DEADLINE);
            let res = svc.suggest(Some("FinTech lead asked about pricing")).await;
            assert_eq!(res.message, FallbackKind::NoCredential.message());
            assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn transport_error_is_network_failure() {
        let svc = service(Scripted::failing("connection refused"));
        assert_eq!(
            svc.generate(Some("pricing follow-up")).await,
            Err(FallbackKind::NetworkFailure)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hung_upstream_is_abandoned_at_the_deadline() {
        let svc = service(Arc::new(Hanging));
        let started = tokio::time::Instant::now();
        let res = svc.suggest(Some("pricing follow-up")).await;
        let elapsed = started.elapsed();

        assert_eq!(res.message, FallbackKind::NetworkFailure.message());
        assert!(elapsed >= DEADLINE);
        assert!(elapsed < DEADLINE + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn undecodable_body_is_parse_failure() {
        let svc = service(Scripted::ok(502, "<html>Bad Gateway</html>"));
        let res = svc.suggest(Some("pricing follow-up")).await;
        assert_eq!(res.message, FallbackKind::ParseFailure.message());
    }

    #[tokio::test]
    async fn reported_error_is_upstream_error() {
        let loading = service(Scripted::ok(
            200,
            r#"{"error":"Model is currently loading","estimated_time":20.0}"#,
        ));
        assert_eq!(
            loading.generate(Some("pricing follow-up")).await,
            Err(FallbackKind::UpstreamError)
        );

        let unavailable = service(Scripted::ok(503, r#"{"estimated_time":20.0}"#));
        assert_eq!(
            unavailable.generate(Some("pricing follow-up")).await,
            Err(FallbackKind::UpstreamError)
        );
    }

    #[tokio::test]
    async fn generated_text_is_returned_trimmed() {
        let body = format!(r#"[{{"generated_text":"  {GOOD_TEXT}\n"}}]"#);
        let client = Scripted::ok(200, &body);
        let svc = service(client.clone());

        let res = svc.suggest(Some("  Series B FinTech lead  ")).await;
        assert_eq!(res.message, GOOD_TEXT);

        let sent = client.last_inputs.lock().unwrap().clone().expect("request sent");
        assert!(sent.contains("CRM lead scenario: Series B FinTech lead. Be professional"));
    }

    #[tokio::test]
    async fn object_and_bare_replies_are_accepted() {
        let object = service(Scripted::ok(
            200,
            &format!(r#"{{"generated_text":"{GOOD_TEXT}"}}"#),
        ));
        assert_eq!(object.generate(Some("p")).await.as_deref(), Ok(GOOD_TEXT));

        let bare = service(Scripted::ok(200, &format!(r#""{GOOD_TEXT}""#)));
        assert_eq!(bare.generate(Some("p")).await.as_deref(), Ok(GOOD_TEXT));
    }

    #[tokio::test]
    async fn echoed_template_is_replaced_by_clean_line() {
        let body = r#"[{"generated_text":"Create a personalized follow-up message for this CRM lead scenario: x.\nHi Priya, great speaking with you about real-time payments."}]"#;
        let svc = service(Scripted::ok(200, body));
        assert_eq!(
            svc.generate(Some("x")).await.as_deref(),
            Ok("Hi Priya, great speaking with you about real-time payments.")
        );
    }

    #[tokio::test]
    async fn short_or_unrecognised_output_is_extraction_failure() {
        for body in [
            r#"[{"generated_text":"Sure!"}]"#,
            r#"{"choices":[{"text":"a long enough answer but the wrong shape"}]}"#,
            r#"[]"#,
            r#"17"#,
        ] {
            let svc = service(Scripted::ok(200, body));
            let res = svc.suggest(Some("pricing follow-up")).await;
            assert_eq!(res.message, FallbackKind::ExtractionFailure.message(), "{body}");
        }
    }

    #[tokio::test]
    async fn non_json_request_body_is_unclassified() {
        let svc = service(Scripted::ok(200, "[]"));
        for body in ["not json", "", "null"] {
            let res = svc.suggest_raw(body.as_bytes()).await;
            assert_eq!(res.message, FallbackKind::UnclassifiedFault.message(), "{body:?}");
        }
    }

    #[tokio::test]
    async fn panicking_client_is_contained() {
        let svc = service(Arc::new(Panicking));
        let res = svc.suggest(Some("pricing follow-up")).await;
        assert_eq!(res.message, FallbackKind::UnclassifiedFault.message());
    }

    #[tokio::test]
    async fn identical_calls_give_identical_results() {
        let body = format!(r#"[{{"generated_text":"{GOOD_TEXT}"}}]"#);
        let client = Scripted::ok(200, &body);
        let svc = service(client.clone());

        let first = svc.suggest(Some("same prompt")).await;
        let second = svc.suggest(Some("same prompt")).await;
        assert_eq!(first, second);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn every_path_returns_a_non_empty_message() {
        let clients: Vec<Arc<dyn InferenceClient>> = vec![
            Scripted::ok(200, &format!(r#"[{{"generated_text":"{GOOD_TEXT}"}}]"#)),
            Scripted::ok(200, "nope"),
            Scripted::ok(500, "{}"),
            Scripted::ok(200, "[]"),
            Scripted::failing("dns"),
            Arc::new(Panicking),
        ];
        for client in clients {
            let res = service(client).suggest(Some("pricing follow-up")).await;
            assert!(!res.message.trim().is_empty());
        }
    }
}
