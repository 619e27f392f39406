use crate::cli::ShowArgs;
use crate::output::{format_plan_outline, render_plan_markdown};

pub async fn execute(args: ShowArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = args.store.open_store(&config)?;
    let record = store.get(&args.id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record.plan)?);
    } else if args.markdown {
        print!(
            "{}",
            render_plan_markdown(&record.plan, config.layout.months_per_year)
        );
    } else {
        println!("Plan {} (created {})", record.id, record.created_at.format("%Y-%m-%d %H:%M"));
        print!("{}", format_plan_outline(&record.plan));
    }
    Ok(())
}
