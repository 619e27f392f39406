use super::enrich::{EnrichReport, Enricher};
use crate::config::{EnrichPolicy, LayoutConfig};
use crate::error::ProviderError;
use crate::parser::{parse_or_fallback, PlanOutcome, PlanSource};
use crate::planner::{fallback_plan, Plan, PlanRequest};
use crate::provider::Generator;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug)]
pub struct PipelineReport {
    pub plan: Plan,
    pub source: PlanSource,
    pub enrichment: EnrichReport,
    pub duration: Duration,
}

/// generate -> parse (or fall back) -> enrich
pub struct Pipeline {
    generator: Arc<dyn Generator>,
    enricher: Enricher,
    layout: LayoutConfig,
    policy: EnrichPolicy,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn Generator>,
        enricher: Enricher,
        layout: LayoutConfig,
        policy: EnrichPolicy,
    ) -> Self {
        Self {
            generator,
            enricher,
            layout,
            policy,
        }
    }

    /// Build an enriched plan for `request`.
    ///
    /// Only transport-level generation failures are returned. A response
    /// that cannot be understood yields the fallback plan instead.
    pub async fn run(&self, request: &PlanRequest) -> Result<PipelineReport, ProviderError> {
        let start = Instant::now();

        info!(
            "Generating roadmap for '{}' via {}",
            request.goal,
            self.generator.name()
        );

        let outcome = match self.generator.generate(request).await {
            Ok(raw) => parse_or_fallback(&raw, request, self.layout.weeks_per_month),
            Err(e @ ProviderError::InvalidResponse { .. }) => {
                warn!("Generation returned an unusable response ({}), using fallback plan", e);
                PlanOutcome {
                    plan: fallback_plan(request),
                    source: PlanSource::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
            Err(e) => return Err(e),
        };

        let mut plan = outcome.plan;
        plan.reset_progress();

        let enrichment = self.enricher.enrich(&mut plan, self.policy).await;

        let duration = start.elapsed();
        info!(
            "Pipeline finished in {:?}: {} months, {} tasks ({})",
            duration,
            plan.roadmap.len(),
            plan.task_count(),
            outcome.source
        );

        Ok(PipelineReport {
            plan,
            source: outcome.source,
            enrichment,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Video;
    use crate::provider::{DisabledSearch, VideoSearch};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedGenerator {
        raw: String,
        error: Mutex<Option<ProviderError>>,
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate(&self, _request: &PlanRequest) -> Result<String, ProviderError> {
            if let Some(e) = self.error.lock().unwrap().take() {
                return Err(e);
            }
            Ok(self.raw.clone())
        }
    }

    struct OneVideo;

    #[async_trait]
    impl VideoSearch for OneVideo {
        fn name(&self) -> &'static str {
            "one"
        }

        async fn search(
            &self,
            query: &str,
            _max_results: usize,
        ) -> Result<Vec<Video>, ProviderError> {
            Ok(vec![Video {
                title: format!("{} tutorial", query),
                url: "https://www.youtube.com/watch?v=x".to_string(),
                duration: "PT5M".to_string(),
                views: "10".to_string(),
                channel: "c".to_string(),
            }])
        }
    }

    fn pipeline(raw: &str, error: Option<ProviderError>, search: Arc<dyn VideoSearch>) -> Pipeline {
        Pipeline::new(
            Arc::new(CannedGenerator {
                raw: raw.to_string(),
                error: Mutex::new(error),
            }),
            Enricher::new(search, 2, 5),
            LayoutConfig::default(),
            EnrichPolicy::SkipIfPresent,
        )
    }

    fn request() -> PlanRequest {
        PlanRequest::new("Frontend developer", "Build products", "2 months")
    }

    #[tokio::test]
    async fn test_flat_response_is_regrouped_and_enriched() {
        let weeks: Vec<String> = (1..=5)
            .map(|n| format!(r#"{{"week": {}, "tasks": [{{"title": "Task {}"}}]}}"#, n, n))
            .collect();
        let raw = format!("```json\n{{\"roadmap\": [{}]}}\n```", weeks.join(","));

        let report = pipeline(&raw, None, Arc::new(OneVideo))
            .run(&request())
            .await
            .unwrap();

        assert_eq!(report.source, PlanSource::Generated);
        assert_eq!(report.plan.roadmap.len(), 2);
        assert_eq!(report.plan.roadmap[0].weeks.len(), 4);
        assert_eq!(report.plan.roadmap[1].weeks.len(), 1);
        assert_eq!(report.enrichment.searched, 5);
        assert!(report.plan.tasks().all(|t| t.has_videos()));
    }

    #[tokio::test]
    async fn test_garbage_response_uses_fallback() {
        let report = pipeline("I cannot help with that", None, Arc::new(DisabledSearch::default()))
            .run(&request())
            .await
            .unwrap();

        assert!(matches!(report.source, PlanSource::Fallback { .. }));
        assert_eq!(report.plan.roadmap[0].focus.as_deref(), Some("Foundation"));
        assert!(report
            .plan
            .tasks()
            .all(|t| t.videos.as_deref() == Some(&[][..])));
    }

    #[tokio::test]
    async fn test_unusable_envelope_uses_fallback() {
        let report = pipeline(
            "",
            Some(ProviderError::InvalidResponse {
                service: "generation",
                reason: "no choices".to_string(),
            }),
            Arc::new(DisabledSearch::default()),
        )
        .run(&request())
        .await
        .unwrap();

        assert!(matches!(report.source, PlanSource::Fallback { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned() {
        let err = pipeline(
            "",
            Some(ProviderError::Connection {
                service: "generation",
                reason: "refused".to_string(),
            }),
            Arc::new(DisabledSearch::default()),
        )
        .run(&request())
        .await
        .unwrap_err();

        assert!(err.is_retriable());
    }

    #[tokio::test]
    async fn test_done_flags_from_model_are_cleared() {
        let raw = r#"{"roadmap": [{"month": 1, "weeks": [{"week": 1, "tasks": [{"title": "A", "done": true}]}]}]}"#;

        let report = pipeline(raw, None, Arc::new(DisabledSearch::default()))
            .run(&request())
            .await
            .unwrap();

        assert_eq!(report.plan.progress().done, 0);
    }
}
