mod enrich;
mod pipeline;

pub use enrich::{EnrichReport, Enricher};
pub use pipeline::{Pipeline, PipelineReport};

use crate::config::Config;
use crate::error::NaviError;
use crate::provider::{create_generator, create_search};
use std::sync::Arc;

/// Enricher wired to the configured search collaborator
pub fn build_enricher(config: &Config) -> Result<Enricher, NaviError> {
    Ok(Enricher::new(
        create_search(config)?,
        config.concurrency,
        config.search.max_results,
    ))
}

/// Full pipeline; fails when generation credentials are missing
pub fn build_pipeline(config: &Config) -> Result<Arc<Pipeline>, NaviError> {
    Ok(Arc::new(Pipeline::new(
        create_generator(config)?,
        build_enricher(config)?,
        config.layout.clone(),
        config.enrich_policy,
    )))
}
