use crate::cli::InitArgs;
use crate::config::Config;
use anyhow::bail;
use tracing::info;

pub fn execute(args: InitArgs) -> anyhow::Result<()> {
    if args.config.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
    }

    let config = Config::default();
    config.write(&args.config)?;
    info!("Wrote default config to {:?}", args.config);

    println!("Wrote {}", args.config.display());
    println!(
        "Set {} (and optionally {}) in your environment or a .env file.",
        config.generation.api_key_env, config.search.api_key_env
    );
    Ok(())
}
