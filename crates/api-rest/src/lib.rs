//! # API REST
//!
//! REST API implementation for Leadflow.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (query parsing, JSON serialisation, CORS)
//!
//! Uses `leadflow-core` for all data operations and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AssignFlowReq, AssignFlowRes, ChannelPerformance, ChannelRanking, ChannelTotals, ChannelsRes,
    FlowLeadsRes, FlowOverview, FlowStep, FunnelRes, FunnelStage, HealthRes, HealthService,
    IntentLevel, Lead, LeadSort, LeadSummaryRes, ListFlowsRes, ListLeadsRes, MarketingChannel,
    MonthlyRes, MonthlyStats, NurtureFlow, Stage, StageCount, SuggestionReq, SuggestionRes,
    TopChannelsRes, UnknownVariant,
};
use leadflow_core::{
    analytics, leads, nurture, CoreError, FixtureStore, LeadFilter, NurtureCatalog,
    SuggestionService,
};

type ApiError = (StatusCode, &'static str);

/// Application state shared across REST API handlers.
///
/// Fixtures and the nurture catalog are loaded once at startup and only ever read.
#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<FixtureStore>,
    pub catalog: Arc<NurtureCatalog>,
    pub suggestions: SuggestionService,
}

impl AppState {
    pub fn new(fixtures: FixtureStore, suggestions: SuggestionService) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
            catalog: Arc::new(NurtureCatalog::standard()),
            suggestions,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        generate,
        list_leads,
        lead_summary,
        funnel,
        channels,
        top_channels,
        monthly,
        list_flows,
        flow_leads,
        assign_flow,
    ),
    components(schemas(
        HealthRes,
        SuggestionReq,
        SuggestionRes,
        Lead,
        Stage,
        IntentLevel,
        LeadSort,
        ListLeadsRes,
        StageCount,
        LeadSummaryRes,
        FunnelStage,
        FunnelRes,
        MarketingChannel,
        ChannelPerformance,
        ChannelTotals,
        ChannelsRes,
        ChannelRanking,
        TopChannelsRes,
        MonthlyStats,
        MonthlyRes,
        FlowStep,
        NurtureFlow,
        FlowOverview,
        ListFlowsRes,
        FlowLeadsRes,
        AssignFlowReq,
        AssignFlowRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .route("/leads", get(list_leads))
        .route("/leads/summary", get(lead_summary))
        .route("/analytics/funnel", get(funnel))
        .route("/analytics/channels", get(channels))
        .route("/analytics/channels/top", get(top_channels))
        .route("/analytics/monthly", get(monthly))
        .route("/nurture/flows", get(list_flows))
        .route("/nurture/flows/:id/leads", get(flow_leads))
        .route("/nurture/flows/:id/assign", post(assign_flow))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse an optional dashboard choice where blank or `All` means "no constraint".
fn parse_choice<T>(value: Option<&str>) -> Result<Option<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn bad_request(message: &'static str) -> impl FnOnce(UnknownVariant) -> ApiError {
    move |e| {
        tracing::warn!("rejected query: {}", e);
        (StatusCode::BAD_REQUEST, message)
    }
}

fn core_error(e: CoreError) -> ApiError {
    match e {
        CoreError::UnknownFlow(_) => (StatusCode::NOT_FOUND, "Unknown nurture flow"),
        CoreError::UnknownLead(_) => (StatusCode::NOT_FOUND, "Unknown lead"),
        other => {
            tracing::error!("core error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = SuggestionReq,
    responses(
        (status = 200, description = "Suggestion text, generated or scripted", body = SuggestionRes)
    )
)]
/// Generate a follow-up suggestion for a free-text prompt.
///
/// Always answers `200` with a non-empty `message`. The raw body is taken as bytes so that a
/// malformed request still receives a scripted suggestion rather than an extractor rejection.
#[axum::debug_handler]
async fn generate(State(state): State<AppState>, body: Bytes) -> Json<SuggestionRes> {
    Json(state.suggestions.suggest_raw(&body).await)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct LeadsQuery {
    /// Funnel stage, or `All`.
    stage: Option<String>,
    /// Intent level, or `All`.
    intent_level: Option<String>,
    /// Exact industry name, or `All`.
    industry: Option<String>,
    /// Case-insensitive substring over name, company, email and industry.
    search: Option<String>,
    /// `last_engaged` (default) or `name`.
    sort: Option<String>,
}

#[utoipa::path(
    get,
    path = "/leads",
    params(LeadsQuery),
    responses(
        (status = 200, description = "Filtered leads", body = ListLeadsRes),
        (status = 400, description = "Unknown stage, intent level or sort")
    )
)]
/// List leads matching the dashboard filters.
///
/// # Errors
/// Returns `400 Bad Request` if a stage, intent level or sort value is not recognised.
#[axum::debug_handler]
async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadsQuery>,
) -> Result<Json<ListLeadsRes>, ApiError> {
    let filter = LeadFilter {
        stage: parse_choice(query.stage.as_deref()).map_err(bad_request("Invalid stage"))?,
        intent_level: parse_choice(query.intent_level.as_deref())
            .map_err(bad_request("Invalid intent level"))?,
        industry: query
            .industry
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty() && !i.eq_ignore_ascii_case("all")),
        search: query.search,
    };
    let sort: LeadSort = parse_choice(query.sort.as_deref())
        .map_err(bad_request("Invalid sort"))?
        .unwrap_or_default();

    let all = state.fixtures.leads();
    let matched = leads::query_leads(all, &filter, sort);
    Ok(Json(ListLeadsRes {
        shown: matched.len(),
        total: all.len(),
        leads: matched,
    }))
}

#[utoipa::path(
    get,
    path = "/leads/summary",
    responses(
        (status = 200, description = "Stage counts and pipeline summary", body = LeadSummaryRes)
    )
)]
#[axum::debug_handler]
async fn lead_summary(State(state): State<AppState>) -> Json<LeadSummaryRes> {
    Json(leads::summarise(state.fixtures.leads()))
}

#[utoipa::path(
    get,
    path = "/analytics/funnel",
    responses(
        (status = 200, description = "Funnel stages", body = FunnelRes)
    )
)]
#[axum::debug_handler]
async fn funnel(State(state): State<AppState>) -> Json<FunnelRes> {
    Json(FunnelRes {
        stages: state.fixtures.analytics().funnel.stages.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/analytics/channels",
    responses(
        (status = 200, description = "Per-channel metrics with ROI, and totals", body = ChannelsRes)
    )
)]
#[axum::debug_handler]
async fn channels(State(state): State<AppState>) -> Json<ChannelsRes> {
    let channels = &state.fixtures.analytics().marketing_channels;
    Json(ChannelsRes {
        channels: analytics::channel_performance(channels),
        totals: analytics::channel_totals(channels),
    })
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct TopChannelsQuery {
    /// `roi` (default) or `leads`.
    by: Option<String>,
    /// Number of channels, clamped to 1..=20. Defaults to 5.
    limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/analytics/channels/top",
    params(TopChannelsQuery),
    responses(
        (status = 200, description = "Best channels first", body = TopChannelsRes),
        (status = 400, description = "Unknown ranking")
    )
)]
/// Rank marketing channels by ROI or lead volume.
///
/// # Errors
/// Returns `400 Bad Request` if `by` is not `roi` or `leads`.
#[axum::debug_handler]
async fn top_channels(
    State(state): State<AppState>,
    Query(query): Query<TopChannelsQuery>,
) -> Result<Json<TopChannelsRes>, ApiError> {
    let by: ChannelRanking = parse_choice(query.by.as_deref())
        .map_err(bad_request("Invalid ranking"))?
        .unwrap_or_default();
    let limit = analytics::ranking_limit(query.limit);
    Ok(Json(TopChannelsRes {
        by,
        channels: analytics::top_channels(
            &state.fixtures.analytics().marketing_channels,
            by,
            limit,
        ),
    }))
}

#[utoipa::path(
    get,
    path = "/analytics/monthly",
    responses(
        (status = 200, description = "Monthly stage counts", body = MonthlyRes)
    )
)]
#[axum::debug_handler]
async fn monthly(State(state): State<AppState>) -> Json<MonthlyRes> {
    Json(MonthlyRes {
        months: state.fixtures.analytics().monthly.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/nurture/flows",
    responses(
        (status = 200, description = "Nurture flows with eligible lead counts", body = ListFlowsRes)
    )
)]
#[axum::debug_handler]
async fn list_flows(State(state): State<AppState>) -> Json<ListFlowsRes> {
    Json(ListFlowsRes {
        flows: state.catalog.overview(state.fixtures.leads()),
    })
}

#[utoipa::path(
    get,
    path = "/nurture/flows/{id}/leads",
    params(("id" = String, Path, description = "Nurture flow id")),
    responses(
        (status = 200, description = "Leads eligible for the flow", body = FlowLeadsRes),
        (status = 404, description = "Unknown nurture flow")
    )
)]
/// Leads with the flow's intent level that are not yet customers.
///
/// # Errors
/// Returns `404 Not Found` if the flow does not exist.
#[axum::debug_handler]
async fn flow_leads(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FlowLeadsRes>, ApiError> {
    let flow = state.catalog.find(&id).map_err(core_error)?;
    let leads = nurture::eligible_leads(flow, state.fixtures.leads())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(FlowLeadsRes {
        flow_id: flow.id.clone(),
        intent: flow.intent,
        leads,
    }))
}

#[utoipa::path(
    post,
    path = "/nurture/flows/{id}/assign",
    params(("id" = String, Path, description = "Nurture flow id")),
    request_body = AssignFlowReq,
    responses(
        (status = 200, description = "Assignment acknowledged (not stored)", body = AssignFlowRes),
        (status = 404, description = "Unknown nurture flow or lead")
    )
)]
/// Acknowledge assigning a lead to a nurture flow.
///
/// This is a mock action: nothing is persisted and no steps are scheduled.
///
/// # Errors
/// Returns `404 Not Found` if the flow or the lead does not exist.
#[axum::debug_handler]
async fn assign_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignFlowReq>,
) -> Result<Json<AssignFlowRes>, ApiError> {
    state
        .catalog
        .assign(&id, &req.lead_id, &state.fixtures)
        .map(Json)
        .map_err(core_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use leadflow_core::suggestion::{
        GenerationRequest, InferenceClient, TransportError, UpstreamReply,
    };
    use leadflow_core::{FallbackKind, UpstreamCredential};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    struct Canned(&'static str);

    #[async_trait]
    impl InferenceClient for Canned {
        async fn generate(
            &self,
            _api_key: &str,
            _request: &GenerationRequest,
        ) -> Result<UpstreamReply, TransportError> {
            Ok(UpstreamReply::new(200, self.0))
        }
    }

    fn app_with(credential: UpstreamCredential, reply: &'static str) -> Router {
        let suggestions =
            SuggestionService::new(Arc::new(Canned(reply)), credential, Duration::from_secs(15));
        let fixtures = FixtureStore::embedded().expect("embedded fixtures");
        router(AppState::new(fixtures, suggestions))
    }

    fn app() -> Router {
        app_with(UpstreamCredential::Missing, "[]")
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.expect("response");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, json) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn generate_without_credential_returns_sample() {
        let (status, json) = send(
            app(),
            post_json("/api/generate", r#"{"prompt":"FinTech lead asked about pricing"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], FallbackKind::NoCredential.message());
    }

    #[tokio::test]
    async fn generate_with_blank_prompt_is_still_ok() {
        let (status, json) = send(app(), post_json("/api/generate", r#"{"prompt":"  "}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], FallbackKind::InvalidInput.message());
    }

    #[tokio::test]
    async fn generate_with_garbage_body_is_still_ok() {
        let (status, json) = send(app(), post_json("/api/generate", "{{{")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], FallbackKind::UnclassifiedFault.message());
    }

    #[tokio::test]
    async fn generate_returns_upstream_text() {
        let app = app_with(
            UpstreamCredential::Present("hf_test".into()),
            r#"[{"generated_text":"Hi Priya, let's book the technical deep-dive for Thursday."}]"#,
        );
        let (status, json) =
            send(app, post_json("/api/generate", r#"{"prompt":"pricing follow-up"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["message"],
            "Hi Priya, let's book the technical deep-dive for Thursday."
        );
    }

    #[tokio::test]
    async fn leads_filter_by_stage_and_all() {
        let (status, json) = send(app(), get("/leads?stage=mql&intent_level=All")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["shown"], 3);
        assert_eq!(json["total"], 14);
        assert!(json["leads"]
            .as_array()
            .expect("leads")
            .iter()
            .all(|l| l["stage"] == "MQL"));
    }

    #[tokio::test]
    async fn leads_search_and_sort() {
        let (status, json) = send(app(), get("/leads?industry=FinTech&sort=name")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["shown"], 4);
        assert_eq!(json["leads"][0]["name"], "Arjun Mehta");
    }

    #[tokio::test]
    async fn leads_reject_unknown_stage() {
        let (status, _) = send(app(), get("/leads?stage=Prospect")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_counts() {
        let (status, json) = send(app(), get("/leads/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 14);
        assert_eq!(json["activePipeline"], 9);
        assert_eq!(json["conversionRate"], 14.3);
    }

    #[tokio::test]
    async fn top_channels_by_leads() {
        let (status, json) = send(app(), get("/analytics/channels/top?by=leads&limit=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["by"], "leads");
        let channels = json["channels"].as_array().expect("channels");
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0]["metrics"]["channel"], "Google Ads");
    }

    #[tokio::test]
    async fn channels_include_totals() {
        let (status, json) = send(app(), get("/analytics/channels")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totals"]["leads"], 1795);
        assert_eq!(json["channels"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn flow_leads_and_unknown_flow() {
        let (status, json) = send(app(), get("/nurture/flows/low-intent/leads")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["intent"], "Low");
        assert_eq!(json["leads"].as_array().map(Vec::len), Some(4));

        let (status, _) = send(app(), get("/nurture/flows/vip/leads")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn assign_flow_is_mock_acknowledged() {
        let body = r#"{"leadId":"3f2a6c1e-8b7d-4e2a-9c1f-5d6e7a8b9c0d"}"#;
        let (status, json) = send(app(), post_json("/nurture/flows/high-intent/assign", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["accepted"], true);
        assert_eq!(json["mock"], true);

        let (status, _) = send(
            app(),
            post_json("/nurture/flows/high-intent/assign", r#"{"leadId":"nobody"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, json) = send(app(), get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/generate"].is_object());
    }
}
