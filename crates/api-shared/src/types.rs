//! Wire types shared across the Leadflow crates.
//!
//! Fixture records are (de)serialised in the camelCase shape of the dashboard's JSON fixtures,
//! so the same types read `leads.json`/`analytics.json` and are returned by the REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Returned when a query value does not name a known variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

fn parse_variant<T: Copy>(
    kind: &'static str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
    input: &str,
) -> Result<T, UnknownVariant> {
    let wanted = input.trim();
    all.iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownVariant {
            kind,
            value: input.to_string(),
        })
}

// ============================================================================
// Fixture records
// ============================================================================

/// Funnel stage of a lead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Stage {
    Lead,
    #[serde(rename = "MQL")]
    Mql,
    #[serde(rename = "SQL")]
    Sql,
    Customer,
    Nurtured,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Lead,
        Stage::Mql,
        Stage::Sql,
        Stage::Customer,
        Stage::Nurtured,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Lead => "Lead",
            Stage::Mql => "MQL",
            Stage::Sql => "SQL",
            Stage::Customer => "Customer",
            Stage::Nurtured => "Nurtured",
        }
    }

    /// Whether the stage counts towards the active pipeline (Lead, MQL, SQL).
    pub fn is_active_pipeline(self) -> bool {
        matches!(self, Stage::Lead | Stage::Mql | Stage::Sql)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("stage", &Stage::ALL, Stage::as_str, s)
    }
}

/// Behavioural intent classification of a lead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IntentLevel {
    High,
    Mid,
    Low,
}

impl IntentLevel {
    pub const ALL: [IntentLevel; 3] = [IntentLevel::High, IntentLevel::Mid, IntentLevel::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            IntentLevel::High => "High",
            IntentLevel::Mid => "Mid",
            IntentLevel::Low => "Low",
        }
    }
}

impl fmt::Display for IntentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("intent level", &IntentLevel::ALL, IntentLevel::as_str, s)
    }
}

/// A prospective customer record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub industry: String,
    pub stage: Stage,
    pub intent_level: IntentLevel,
    pub lead_source: String,
    pub last_engaged: DateTime<Utc>,
}

/// One row of the conversion funnel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStage {
    pub name: String,
    pub count: u64,
    /// Pipeline value in USD.
    pub value: f64,
    /// Percentage, 0-100.
    pub conversion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
}

/// Spend and outcome metrics for one marketing channel. Amounts are in INR.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingChannel {
    pub channel: String,
    pub leads: u64,
    pub cost_incurred: f64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
    #[serde(rename = "avgLTV")]
    pub avg_ltv: f64,
}

/// Stage counts for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStats {
    pub month: String,
    pub leads: u64,
    pub mqls: u64,
    pub sqls: u64,
    pub customers: u64,
}

/// The analytics fixture as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub funnel: Funnel,
    pub marketing_channels: Vec<MarketingChannel>,
    pub monthly: Vec<MonthlyStats>,
}

/// One outreach step of a nurture flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub order: u32,
    pub action: String,
    /// Days after enrolment.
    pub delay_days: u32,
}

/// A predefined outreach sequence for one intent level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NurtureFlow {
    pub id: String,
    pub name: String,
    pub intent: IntentLevel,
    pub description: String,
    pub steps: Vec<FlowStep>,
}

// ============================================================================
// Query parameters
// ============================================================================

/// Ordering applied to lead listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadSort {
    /// Most recently engaged first.
    #[default]
    LastEngaged,
    /// Alphabetical by name.
    Name,
}

impl LeadSort {
    pub const ALL: [LeadSort; 2] = [LeadSort::LastEngaged, LeadSort::Name];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSort::LastEngaged => "last_engaged",
            LeadSort::Name => "name",
        }
    }
}

impl FromStr for LeadSort {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("sort", &LeadSort::ALL, LeadSort::as_str, s)
    }
}

/// Key used to rank marketing channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChannelRanking {
    #[default]
    Roi,
    Leads,
}

impl ChannelRanking {
    pub const ALL: [ChannelRanking; 2] = [ChannelRanking::Roi, ChannelRanking::Leads];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelRanking::Roi => "roi",
            ChannelRanking::Leads => "leads",
        }
    }
}

impl FromStr for ChannelRanking {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("ranking", &ChannelRanking::ALL, ChannelRanking::as_str, s)
    }
}

// ============================================================================
// Request / response envelopes
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of `POST /api/generate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionReq {
    pub prompt: Option<String>,
}

/// Always-populated suggestion text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListLeadsRes {
    pub leads: Vec<Lead>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StageCount {
    pub stage: Stage,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummaryRes {
    pub total: usize,
    pub stages: Vec<StageCount>,
    /// Customers as a percentage of all leads, one decimal place.
    pub conversion_rate: f64,
    pub active_pipeline: usize,
    pub industries: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FunnelRes {
    pub stages: Vec<FunnelStage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelPerformance {
    pub metrics: MarketingChannel,
    /// Return on spend as a percentage; absent when the channel had no cost.
    pub roi: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTotals {
    pub leads: u64,
    pub conversions: u64,
    pub cost_incurred: f64,
    pub conversion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelsRes {
    pub channels: Vec<ChannelPerformance>,
    pub totals: ChannelTotals,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopChannelsRes {
    pub by: ChannelRanking,
    pub channels: Vec<ChannelPerformance>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRes {
    pub months: Vec<MonthlyStats>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowOverview {
    pub flow: NurtureFlow,
    pub eligible_leads: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListFlowsRes {
    pub flows: Vec<FlowOverview>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowLeadsRes {
    pub flow_id: String,
    pub intent: IntentLevel,
    pub leads: Vec<Lead>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignFlowReq {
    pub lead_id: String,
}

/// Acknowledgement of a flow assignment. Assignments are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignFlowRes {
    pub flow_id: String,
    pub lead_id: String,
    pub accepted: bool,
    pub mock: bool,
    pub message: String,
}
