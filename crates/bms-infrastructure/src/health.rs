//! Readiness report
//!
//! Turns the result map of a registry health sweep into a serializable
//! report for readiness probes and the CLI.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use bms_domain::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logging::log_health_check;
use crate::probe::ProbeContext;
use crate::registry::Registry;

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Serving correctly
    Up,
    /// Not serving
    Down,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Outcome of one instance's probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness of the whole registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// `Up` iff every check passed
    pub status: HealthStatus,
    /// Per-instance results keyed by qualified name
    pub checks: BTreeMap<String, CheckResult>,
    /// Wall time of the sweep in milliseconds
    pub response_time_ms: u64,
    /// When the sweep finished
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    /// Build a report from a sweep's result map, logging every check
    pub fn from_results(results: BTreeMap<String, Result<()>>, elapsed: Duration) -> Self {
        let checks: BTreeMap<String, CheckResult> = results
            .into_iter()
            .map(|(name, outcome)| {
                let check = match outcome {
                    Ok(()) => CheckResult {
                        status: HealthStatus::Up,
                        error: None,
                    },
                    Err(err) => CheckResult {
                        status: HealthStatus::Down,
                        error: Some(err.to_string()),
                    },
                };
                log_health_check(&name, check.status.is_healthy(), check.error.as_deref());
                (name, check)
            })
            .collect();

        let status = if checks.values().all(|check| check.status.is_healthy()) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };

        Self {
            status,
            checks,
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            timestamp: Utc::now(),
        }
    }

    /// Run a sweep over `registry` and report on it
    pub async fn collect(registry: &Registry, ctx: &ProbeContext) -> Self {
        let started = Instant::now();
        let results = registry.health_check(ctx).await;
        Self::from_results(results, started.elapsed())
    }

    /// True iff every check passed
    pub fn is_ready(&self) -> bool {
        self.status.is_healthy()
    }

    /// Names of the failed checks, sorted
    pub fn failed_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|(_, check)| !check.status.is_healthy())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
