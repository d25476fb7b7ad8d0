//! The "try live, fall back to synthetic" wrapper shared by every provider.

use std::future::Future;
use std::time::Duration;

use risk_insight_risk_models::Provenance;

use crate::SourceError;

/// A value tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    /// The data.
    pub value: T,
    /// Live or synthetic.
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    /// Wraps live data.
    pub const fn live(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Live,
        }
    }

    /// Wraps synthetic data.
    pub const fn synthetic(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Synthetic,
        }
    }
}

/// Runs `live`, bounded by `timeout`; on any error or timeout returns the
/// output of `synthetic` instead.
///
/// `synthetic` is only invoked when the live call fails. The live future is
/// dropped on timeout, which is safe because fetches are read-only.
pub async fn try_live_else_synthetic<T, F, S>(
    label: &str,
    timeout: Duration,
    live: F,
    synthetic: S,
) -> Sourced<T>
where
    F: Future<Output = Result<T, SourceError>>,
    S: FnOnce() -> T,
{
    match tokio::time::timeout(timeout, live).await {
        Ok(Ok(value)) => {
            log::debug!("{label}: using live data");
            Sourced::live(value)
        }
        Ok(Err(SourceError::NotConfigured { service })) => {
            log::debug!("{label}: '{service}' not configured, using synthetic data");
            Sourced::synthetic(synthetic())
        }
        Ok(Err(e)) => {
            log::warn!("{label}: {e}, using synthetic data");
            Sourced::synthetic(synthetic())
        }
        Err(_) => {
            log::warn!(
                "{label}: {}, using synthetic data",
                SourceError::Timeout(timeout)
            );
            Sourced::synthetic(synthetic())
        }
    }
}
