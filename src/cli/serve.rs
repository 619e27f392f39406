use crate::cli::ServeArgs;
use crate::provider::create_search;
use crate::runner::build_pipeline;
use crate::server::{run_serve, AppState};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = Arc::new(args.store.open_store(&config)?);

    let pipeline = match build_pipeline(&config) {
        Ok(pipeline) => Some(pipeline),
        Err(e) => {
            warn!("Roadmap generation disabled: {}", e);
            None
        }
    };
    let search = create_search(&config)?;
    let search_configured = config.search.api_key().is_some();
    if !search_configured {
        warn!("Video search disabled: {} is not set", config.search.api_key_env);
    }

    info!(
        "Serving {} stored plans from {:?}",
        store.len().await,
        config.store_path
    );

    let state = AppState {
        store,
        pipeline,
        search,
        search_configured,
    };

    let bind = args.bind.unwrap_or(config.server.bind);
    let port = args.port.unwrap_or(config.server.port);
    run_serve(state, &bind, port).await
}
