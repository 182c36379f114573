//! Static fixture store.
//!
//! Leads and analytics are read once at startup and then shared read-only. The JSON copies
//! compiled into this crate are used unless a fixture directory override is configured, in
//! which case both files must be present in that directory.

use crate::constants::{ANALYTICS_FIXTURE_FILENAME, LEADS_FIXTURE_FILENAME};
use crate::{CoreError, CoreResult};
use api_shared::{Analytics, Lead};
use std::fs;
use std::path::Path;

const EMBEDDED_LEADS: &str = include_str!("../fixtures/leads.json");
const EMBEDDED_ANALYTICS: &str = include_str!("../fixtures/analytics.json");

/// Immutable lead and analytics collections.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureStore {
    leads: Vec<Lead>,
    analytics: Analytics,
}

impl FixtureStore {
    /// Load from `dir` when given, otherwise from the embedded fixtures.
    pub fn load(dir: Option<&Path>) -> CoreResult<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Fixtures compiled into the crate.
    pub fn embedded() -> CoreResult<Self> {
        Self::from_json(EMBEDDED_LEADS, EMBEDDED_ANALYTICS)
    }

    /// Read `leads.json` and `analytics.json` from `dir`.
    ///
    /// # Errors
    /// Returns `CoreError::FixtureRead` if either file cannot be read and
    /// `CoreError::FixtureParse` if either is not valid fixture JSON.
    pub fn from_dir(dir: &Path) -> CoreResult<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CoreError::FixtureRead { path, source })
        };
        let leads = read(LEADS_FIXTURE_FILENAME)?;
        let analytics = read(ANALYTICS_FIXTURE_FILENAME)?;
        tracing::info!("loading fixtures from {}", dir.display());
        Self::from_json(&leads, &analytics)
    }

    pub fn from_json(leads_json: &str, analytics_json: &str) -> CoreResult<Self> {
        let leads = serde_json::from_str(leads_json).map_err(|source| CoreError::FixtureParse {
            name: LEADS_FIXTURE_FILENAME.into(),
            source,
        })?;
        let analytics =
            serde_json::from_str(analytics_json).map_err(|source| CoreError::FixtureParse {
                name: ANALYTICS_FIXTURE_FILENAME.into(),
                source,
            })?;
        Ok(Self::new(leads, analytics))
    }

    pub fn new(leads: Vec<Lead>, analytics: Analytics) -> Self {
        Self { leads, analytics }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn find_lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }
}
