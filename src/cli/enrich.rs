use crate::cli::EnrichArgs;
use crate::config::EnrichPolicy;
use crate::runner::build_enricher;

pub async fn execute(args: EnrichArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = args.store.open_store(&config)?;
    let enricher = build_enricher(&config)?;

    let policy = if args.refetch {
        EnrichPolicy::AlwaysRefetch
    } else {
        config.enrich_policy
    };

    let report = store.enrich(&args.id, &enricher, policy).await?;
    println!(
        "Enriched plan {} ({}): {} searched, {} skipped, {} failed",
        args.id, policy, report.searched, report.skipped, report.failed
    );
    Ok(())
}
