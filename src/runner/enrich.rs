use crate::config::EnrichPolicy;
use crate::planner::{Plan, Task, Video};
use crate::provider::VideoSearch;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Tasks the search collaborator was asked about
    pub searched: usize,
    /// Tasks left alone under `SkipIfPresent`
    pub skipped: usize,
    /// Lookups that failed and were recorded as zero results
    pub failed: usize,
    pub duration: Duration,
}

/// Attaches search results to every task that needs them
pub struct Enricher {
    search: Arc<dyn VideoSearch>,
    semaphore: Arc<Semaphore>,
    max_results: usize,
}

/// Position of a task inside `Plan::roadmap`
type TaskPath = (usize, usize, usize);

impl Enricher {
    pub fn new(search: Arc<dyn VideoSearch>, concurrency: usize, max_results: usize) -> Self {
        Self {
            search,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            max_results,
        }
    }

    /// Run the enrichment pass over `plan` in place.
    ///
    /// Only the `videos` field of a task is ever written. A failed lookup
    /// leaves an empty list behind so the remaining tasks still get theirs.
    pub async fn enrich(&self, plan: &mut Plan, policy: EnrichPolicy) -> EnrichReport {
        let start = Instant::now();
        let mut report = EnrichReport::default();

        let mut pending: Vec<(TaskPath, String)> = Vec::new();
        for (m, month) in plan.roadmap.iter().enumerate() {
            for (w, week) in month.weeks.iter().enumerate() {
                for (t, task) in week.tasks.iter().enumerate() {
                    if needs_search(task, policy) {
                        pending.push(((m, w, t), task.title.clone()));
                    } else {
                        report.skipped += 1;
                    }
                }
            }
        }

        if pending.is_empty() {
            debug!("Nothing to enrich ({} tasks skipped)", report.skipped);
            report.duration = start.elapsed();
            return report;
        }

        debug!(
            "Enriching {} tasks via {} with concurrency {}",
            pending.len(),
            self.search.name(),
            self.semaphore.available_permits()
        );

        let mut futures = FuturesUnordered::new();
        for (path, query) in pending {
            let search = self.search.clone();
            let semaphore = self.semaphore.clone();
            let max_results = self.max_results;

            futures.push(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => search.search(&query, max_results).await,
                    Err(e) => Err(crate::error::ProviderError::Request {
                        service: "search",
                        reason: e.to_string(),
                    }),
                };
                (path, query, result)
            });
        }

        let mut results: Vec<(TaskPath, Vec<Video>)> = Vec::new();
        while let Some((path, query, result)) = futures.next().await {
            report.searched += 1;
            match result {
                Ok(videos) => results.push((path, videos)),
                Err(e) => {
                    warn!("Video search for '{}' failed: {}", query, e);
                    report.failed += 1;
                    results.push((path, Vec::new()));
                }
            }
        }

        for ((m, w, t), videos) in results {
            if let Some(task) = plan
                .roadmap
                .get_mut(m)
                .and_then(|month| month.weeks.get_mut(w))
                .and_then(|week| week.tasks.get_mut(t))
            {
                task.videos = Some(videos);
            }
        }

        report.duration = start.elapsed();
        info!(
            "Enrichment finished: {} searched, {} skipped, {} failed in {:?}",
            report.searched, report.skipped, report.failed, report.duration
        );
        report
    }
}

fn needs_search(task: &Task, policy: EnrichPolicy) -> bool {
    match policy {
        EnrichPolicy::AlwaysRefetch => true,
        EnrichPolicy::SkipIfPresent => !task.has_videos(),
    }
}
