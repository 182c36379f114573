use crate::types::HealthRes;

/// Simple health service backing the REST `/health` endpoint.
///
/// Provides a standardised way to check the health status of the Leadflow service.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Leadflow is alive".into(),
        }
    }
}
