use crate::cli::GenerateArgs;
use crate::output::{build_run_summary, format_run_summary, write_plan_report};
use crate::planner::PlanRequest;
use crate::runner::build_pipeline;
use tracing::info;

pub async fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.store.load_config()?;
    let store = args.store.open_store(&config)?;
    let pipeline = build_pipeline(&config)?;

    let request = PlanRequest {
        goal: args.goal,
        target_role: args.target_role,
        why: args.why,
        timeframe: args.timeframe,
        hours_per_week: args.hours_per_week,
        skills: args.skills,
        learning_style: args.learning_style,
        learning_speed: args.learning_speed,
        skill_level: args.skill_level,
    };

    let report = pipeline.run(&request).await?;
    let id = store.insert(report.plan.clone()).await?;
    info!("Stored plan {} in {:?}", id, config.store_path);

    if let Some(path) = &args.report {
        write_plan_report(path, &report.plan, config.layout.months_per_year)?;
        info!("Wrote roadmap report to {:?}", path);
    }

    let summary = build_run_summary(&id, &report);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_run_summary(&summary));
    }
    Ok(())
}
