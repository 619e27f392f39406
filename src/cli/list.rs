use crate::cli::StoreArgs;
use crate::output::format_plan_list;

pub async fn execute(args: StoreArgs) -> anyhow::Result<()> {
    let config = args.load_config()?;
    let store = args.open_store(&config)?;

    print!("{}", format_plan_list(&store.list().await));
    Ok(())
}
