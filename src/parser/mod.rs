mod normalize;
mod sanitize;
mod shape;

pub use normalize::normalize_plan;
pub use sanitize::sanitize_response;

use crate::error::ParserError;
use crate::planner::{fallback_plan, Plan, PlanRequest};
use tracing::warn;

/// How a plan came to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    Generated,
    Fallback { reason: String },
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanSource::Generated => write!(f, "generated"),
            PlanSource::Fallback { reason } => write!(f, "fallback: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub source: PlanSource,
}

/// Sanitize, strictly parse, then normalize a raw model response
pub fn parse_plan(
    raw: &str,
    request: &PlanRequest,
    weeks_per_month: usize,
) -> Result<Plan, ParserError> {
    let cleaned = sanitize_response(raw);
    let value: serde_json::Value = serde_json::from_str(&cleaned)?;
    normalize_plan(&value, request, weeks_per_month)
}

/// Like [`parse_plan`], but any failure yields the fallback plan instead
pub fn parse_or_fallback(raw: &str, request: &PlanRequest, weeks_per_month: usize) -> PlanOutcome {
    match parse_plan(raw, request, weeks_per_month) {
        Ok(plan) => PlanOutcome {
            plan,
            source: PlanSource::Generated,
        },
        Err(e) => {
            warn!(
                "Could not parse roadmap from model output ({}), using fallback plan. Output started with: {}",
                e,
                raw.chars().take(200).collect::<String>()
            );
            PlanOutcome {
                plan: fallback_plan(request),
                source: PlanSource::Fallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}
