use crate::cli::DoneArgs;
use crate::output::format_progress;
use crate::planner::TaskRef;

pub async fn execute(args: DoneArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = args.store.open_store(&config)?;

    let task = match (args.month, args.week, args.task) {
        (Some(month), Some(week), Some(task)) => {
            store
                .mark_done_at(&args.id, TaskRef { month, week, task })
                .await?
        }
        _ => store.mark_next_done(&args.id).await?,
    };

    let progress = store.get(&args.id).await?.plan.progress();
    println!("Marked done: {}", task.title);
    println!("Progress: {}", format_progress(&progress));
    Ok(())
}
