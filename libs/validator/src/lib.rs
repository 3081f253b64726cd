//! # Omniroute Route Validator
//!
//! ## Purpose
//!
//! Independent quality control on solver output: the validator re-runs the
//! AMM and bridge math step by step (it never trusts the amounts a solver
//! recorded), then grades the route against caller limits and distills a
//! 0-100 quality score.
//!
//! ## Contract
//!
//! Quality problems are data, not errors: failed checks land in
//! `failures[]` with a severity and a recoverable flag, soft findings in
//! `warnings[]`, and `is_valid` is simply "no critical failures". The same
//! inputs always produce the bit-identical report.

pub mod checks;
pub mod score;

pub use checks::{FailureKind, RouteFailure, RouteWarning, Severity, ValidationLimits};
pub use score::QualityMetrics;

use omniroute_config::EngineSettings;
use omniroute_types::RouteResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Full validation report for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub is_valid: bool,
    /// Weighted quality score in [0, 100], one decimal.
    pub overall_score: f64,
    pub failures: Vec<RouteFailure>,
    pub warnings: Vec<RouteWarning>,
    pub quality_metrics: QualityMetrics,
}

/// Validates routes against engine settings and caller limits.
#[derive(Debug, Clone)]
pub struct RouteValidator {
    settings: EngineSettings,
}

impl RouteValidator {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Grade a route for a trade of `input_amount`, with gas converted to
    /// USD at `native_price_usd`.
    pub fn validate(
        &self,
        route: &RouteResult,
        input_amount: f64,
        native_price_usd: f64,
        limits: &ValidationLimits,
    ) -> Validation {
        let walk = checks::walk_route(route, input_amount, native_price_usd, limits, &self.settings);
        let quality_metrics = score::compute_metrics(input_amount, &walk.traces);
        let overall_score = score::overall_score(&quality_metrics);
        let is_valid = !walk
            .failures
            .iter()
            .any(|f| f.severity == Severity::Critical);

        debug!(
            is_valid,
            overall_score,
            failures = walk.failures.len(),
            warnings = walk.warnings.len(),
            "route validated"
        );
        Validation {
            is_valid,
            overall_score,
            failures: walk.failures,
            warnings: walk.warnings,
            quality_metrics,
        }
    }
}
