//! Nurture flow catalog.
//!
//! Flows are static reference data: one outreach sequence per intent level. Nothing here
//! schedules or executes steps, and assigning a flow to a lead is acknowledged without being
//! stored anywhere.

use crate::fixtures::FixtureStore;
use crate::{CoreError, CoreResult};
use api_shared::{AssignFlowRes, FlowOverview, FlowStep, IntentLevel, Lead, NurtureFlow, Stage};

/// The three standard flows and their steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NurtureCatalog {
    flows: Vec<NurtureFlow>,
}

fn flow(
    id: &str,
    name: &str,
    intent: IntentLevel,
    description: &str,
    steps: &[(&str, u32)],
) -> NurtureFlow {
    NurtureFlow {
        id: id.into(),
        name: name.into(),
        intent,
        description: description.into(),
        steps: steps
            .iter()
            .zip(1u32..)
            .map(|(&(action, delay_days), order)| FlowStep {
                order,
                action: action.into(),
                delay_days,
            })
            .collect(),
    }
}

impl NurtureCatalog {
    pub fn standard() -> Self {
        Self::new(vec![
            flow(
                "high-intent",
                "High Intent Flow",
                IntentLevel::High,
                "Aggressive follow-up for hot leads",
                &[
                    ("Send personalized demo invitation", 0),
                    ("Follow-up call within 24h", 1),
                    ("Send case study relevant to industry", 2),
                    ("Executive meeting invitation", 5),
                    ("Custom proposal preparation", 7),
                ],
            ),
            flow(
                "mid-intent",
                "Mid Intent Flow",
                IntentLevel::Mid,
                "Educational nurturing sequence",
                &[
                    ("Send welcome email with resources", 0),
                    ("Educational webinar invitation", 3),
                    ("Industry report download", 7),
                    ("Product comparison guide", 14),
                    ("Schedule consultation call", 21),
                ],
            ),
            flow(
                "low-intent",
                "Low Intent Flow",
                IntentLevel::Low,
                "Long-term relationship building",
                &[
                    ("Add to newsletter subscription", 0),
                    ("Monthly industry insights", 7),
                    ("Educational blog content", 14),
                    ("Quarterly check-in email", 30),
                    ("Re-engagement campaign", 90),
                ],
            ),
        ])
    }

    pub fn new(flows: Vec<NurtureFlow>) -> Self {
        Self { flows }
    }

    pub fn flows(&self) -> &[NurtureFlow] {
        &self.flows
    }

    /// # Errors
    /// Returns `CoreError::UnknownFlow` if no flow has this id.
    pub fn find(&self, flow_id: &str) -> CoreResult<&NurtureFlow> {
        self.flows
            .iter()
            .find(|flow| flow.id == flow_id)
            .ok_or_else(|| CoreError::UnknownFlow(flow_id.to_string()))
    }

    /// Each flow with the number of leads it could take.
    pub fn overview(&self, leads: &[Lead]) -> Vec<FlowOverview> {
        self.flows
            .iter()
            .map(|flow| FlowOverview {
                eligible_leads: eligible_leads(flow, leads).len(),
                flow: flow.clone(),
            })
            .collect()
    }

    /// Acknowledge assigning `lead_id` to `flow_id`.
    ///
    /// Both ids are validated; the assignment itself is not persisted, and the response says so.
    ///
    /// # Errors
    /// Returns `CoreError::UnknownFlow` or `CoreError::UnknownLead`.
    pub fn assign(
        &self,
        flow_id: &str,
        lead_id: &str,
        store: &FixtureStore,
    ) -> CoreResult<AssignFlowRes> {
        let flow = self.find(flow_id)?;
        let lead = store
            .find_lead(lead_id)
            .ok_or_else(|| CoreError::UnknownLead(lead_id.to_string()))?;

        tracing::info!(flow_id = %flow.id, lead_id = %lead.id, "flow assignment requested (mock, not stored)");

        Ok(AssignFlowRes {
            flow_id: flow.id.clone(),
            lead_id: lead.id.clone(),
            accepted: true,
            mock: true,
            message: format!("{} assigned to {} (mock action)", flow.name, lead.name),
        })
    }
}

impl Default for NurtureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Leads with the flow's intent that have not yet converted.
pub fn eligible_leads<'a>(flow: &NurtureFlow, leads: &'a [Lead]) -> Vec<&'a Lead> {
    leads
        .iter()
        .filter(|lead| lead.intent_level == flow.intent && lead.stage != Stage::Customer)
        .collect()
}

/// Prompt used when the dashboard requests a suggestion without custom text.
pub fn default_prompt(intent: IntentLevel) -> String {
    format!(
        "Suggest a personalized follow-up message for a {}-intent FinTech lead who has shown \
         interest in our CRM platform. Include specific value propositions and next steps.",
        intent.as_str().to_lowercase()
    )
}
