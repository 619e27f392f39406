use crate::cli::NextArgs;
use crate::error::{QueueError, StoreError};

pub async fn execute(args: NextArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = args.store.open_store(&config)?;

    let task = match store.peek_next(&args.id).await {
        Ok(task) => task,
        Err(StoreError::Queue(QueueError::NoPendingTask)) => {
            println!("All tasks completed");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }

    println!("{} ({})", task.title, task.estimated_time);
    println!("  Goal: {}", task.goal);
    if !task.why.is_empty() {
        println!("  Why: {}", task.why);
    }
    for video in &task.videos {
        println!("  - {} <{}>", video.title, video.url);
    }
    Ok(())
}
