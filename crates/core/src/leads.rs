//! Lead filtering, ordering and summary statistics.
//!
//! Everything here is a pure function over a lead slice. Results are always a subset or a
//! permutation of the input.

use crate::format::round_one_decimal;
use api_shared::{IntentLevel, Lead, LeadSort, LeadSummaryRes, Stage, StageCount};

/// Dashboard filter. A `None` field means "All".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub stage: Option<Stage>,
    pub intent_level: Option<IntentLevel>,
    pub industry: Option<String>,
    /// Case-insensitive substring over name, company, email and industry.
    pub search: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.stage.is_some_and(|stage| lead.stage != stage) {
            return false;
        }
        if self.intent_level.is_some_and(|level| lead.intent_level != level) {
            return false;
        }
        if self
            .industry
            .as_deref()
            .is_some_and(|industry| lead.industry != industry)
        {
            return false;
        }
        match self.search_term() {
            Some(term) => [&lead.name, &lead.company, &lead.email, &lead.industry]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    /// Whether any constraint is set.
    pub fn is_active(&self) -> bool {
        self.stage.is_some()
            || self.intent_level.is_some()
            || self.industry.is_some()
            || self.search_term().is_some()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Apply `filter` then order by `sort`.
pub fn query_leads(leads: &[Lead], filter: &LeadFilter, sort: LeadSort) -> Vec<Lead> {
    let mut matched: Vec<Lead> = leads
        .iter()
        .filter(|lead| filter.matches(lead))
        .cloned()
        .collect();
    match sort {
        LeadSort::LastEngaged => matched.sort_by(|a, b| b.last_engaged.cmp(&a.last_engaged)),
        LeadSort::Name => matched.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
    matched
}

/// Distinct industries in first-seen order.
pub fn industries(leads: &[Lead]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for lead in leads {
        if !seen.iter().any(|industry| *industry == lead.industry) {
            seen.push(lead.industry.clone());
        }
    }
    seen
}

pub fn count_in_stage(leads: &[Lead], stage: Stage) -> usize {
    leads.iter().filter(|lead| lead.stage == stage).count()
}

/// Stage counts, conversion rate and active pipeline size for the dashboard header.
pub fn summarise(leads: &[Lead]) -> LeadSummaryRes {
    let stages: Vec<StageCount> = Stage::ALL
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: count_in_stage(leads, stage),
        })
        .collect();

    let total = leads.len();
    let customers = count_in_stage(leads, Stage::Customer);
    let conversion_rate = if total == 0 {
        0.0
    } else {
        round_one_decimal(customers as f64 / total as f64 * 100.0)
    };
    let active_pipeline = stages
        .iter()
        .filter(|sc| sc.stage.is_active_pipeline())
        .map(|sc| sc.count)
        .sum();

    LeadSummaryRes {
        total,
        stages,
        conversion_rate,
        active_pipeline,
        industries: industries(leads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureStore;

    fn leads() -> Vec<Lead> {
        FixtureStore::embedded()
            .expect("embedded fixtures")
            .leads()
            .to_vec()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let all = leads();
        let result = query_leads(&all, &LeadFilter::default(), LeadSort::LastEngaged);
        assert_eq!(result.len(), all.len());
        assert!(!LeadFilter::default().is_active());
    }

    #[test]
    fn default_sort_is_most_recent_first() {
        let result = query_leads(&leads(), &LeadFilter::default(), LeadSort::default());
        assert_eq!(result.first().map(|l| l.name.as_str()), Some("Nadia Rahman"));
        assert_eq!(result.last().map(|l| l.name.as_str()), Some("Liam Novak"));
        assert!(result
            .windows(2)
            .all(|w| w[0].last_engaged >= w[1].last_engaged));
    }

    #[test]
    fn name_sort_is_alphabetical() {
        let result = query_leads(&leads(), &LeadFilter::default(), LeadSort::Name);
        assert_eq!(result.first().map(|l| l.name.as_str()), Some("Amelia Hart"));
        assert_eq!(result.last().map(|l| l.name.as_str()), Some("Zara Ellison"));
    }

    #[test]
    fn equality_filters_combine() {
        let filter = LeadFilter {
            industry: Some("FinTech".into()),
            intent_level: Some(IntentLevel::High),
            ..LeadFilter::default()
        };
        let result = query_leads(&leads(), &filter, LeadSort::Name);
        let names: Vec<&str> = result.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Arjun Mehta", "Nadia Rahman", "Priya Raman"]);
        assert!(filter.is_active());
    }

    #[test]
    fn search_is_case_insensitive_over_company_and_email() {
        let filter = LeadFilter {
            search: Some("  LEDGER ".into()),
            ..LeadFilter::default()
        };
        let result = query_leads(&leads(), &filter, LeadSort::Name);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].company, "Ledgerline");
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = LeadFilter {
            search: Some("   ".into()),
            ..LeadFilter::default()
        };
        assert!(!filter.is_active());
        assert_eq!(query_leads(&leads(), &filter, LeadSort::Name).len(), 14);
    }

    #[test]
    fn stage_filter_matches_counts() {
        let all = leads();
        for stage in Stage::ALL {
            let filter = LeadFilter {
                stage: Some(stage),
                ..LeadFilter::default()
            };
            let result = query_leads(&all, &filter, LeadSort::Name);
            assert_eq!(result.len(), count_in_stage(&all, stage));
            assert!(result.iter().all(|l| l.stage == stage));
        }
    }

    #[test]
    fn summary_of_fixtures() {
        let summary = summarise(&leads());
        assert_eq!(summary.total, 14);
        assert_eq!(summary.stages.iter().map(|s| s.count).sum::<usize>(), 14);
        assert_eq!(summary.conversion_rate, 14.3);
        assert_eq!(summary.active_pipeline, 9);
        assert_eq!(
            summary.industries,
            vec![
                "FinTech",
                "SaaS",
                "HealthTech",
                "E-commerce",
                "EdTech",
                "Manufacturing"
            ]
        );
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarise(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.conversion_rate, 0.0);
        assert_eq!(summary.stages.len(), 5);
        assert!(summary.industries.is_empty());
    }
}
