use crate::parser::PlanSource;
use crate::planner::{Plan, Progress};
use crate::runner::PipelineReport;
use crate::store::PlanSummary;
use serde::Serialize;

/// Machine-readable outcome of one `navi generate`
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub id: String,
    pub goal: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub months: usize,
    pub tasks: usize,
    pub videos_searched: usize,
    pub videos_skipped: usize,
    pub videos_failed: usize,
    pub duration_sec: f64,
}

pub fn build_run_summary(id: &str, report: &PipelineReport) -> RunSummary {
    let (source, fallback_reason) = match &report.source {
        PlanSource::Generated => ("generated".to_string(), None),
        PlanSource::Fallback { reason } => ("fallback".to_string(), Some(reason.clone())),
    };

    RunSummary {
        id: id.to_string(),
        goal: report.plan.goal.clone(),
        source,
        fallback_reason,
        months: report.plan.roadmap.len(),
        tasks: report.plan.task_count(),
        videos_searched: report.enrichment.searched,
        videos_skipped: report.enrichment.skipped,
        videos_failed: report.enrichment.failed,
        duration_sec: report.duration.as_secs_f64(),
    }
}

pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Plan {} ({})\n", summary.id, summary.goal));
    out.push_str(&format!(
        "  {} months, {} tasks, {}\n",
        summary.months, summary.tasks, summary.source
    ));
    if let Some(reason) = &summary.fallback_reason {
        out.push_str(&format!("  fallback reason: {}\n", reason));
    }
    out.push_str(&format!(
        "  videos: {} searched, {} skipped, {} failed\n",
        summary.videos_searched, summary.videos_skipped, summary.videos_failed
    ));
    out.push_str(&format!("  took {:.1}s\n", summary.duration_sec));
    out
}

pub fn format_progress(progress: &Progress) -> String {
    let percent = if progress.total == 0 {
        100
    } else {
        progress.done * 100 / progress.total
    };
    format!("{}/{} done ({}%)", progress.done, progress.total, percent)
}

/// Table of stored plans for `navi list`
pub fn format_plan_list(plans: &[PlanSummary]) -> String {
    if plans.is_empty() {
        return "No plans stored\n".to_string();
    }

    let mut out = String::new();
    for plan in plans {
        out.push_str(&format!(
            "{}  {}  {}  {}\n",
            plan.id,
            plan.created_at.format("%Y-%m-%d %H:%M"),
            format_progress(&plan.progress),
            plan.goal
        ));
    }
    out
}

/// Short multi-line outline of a plan
pub fn format_plan_outline(plan: &Plan) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", plan.goal, plan.timeframe));
    out.push_str(&format!("  {}\n", format_progress(&plan.progress())));
    for month in &plan.roadmap {
        let done = month
            .weeks
            .iter()
            .flat_map(|w| w.tasks.iter())
            .filter(|t| t.done)
            .count();
        let total: usize = month.weeks.iter().map(|w| w.tasks.len()).sum();
        match &month.focus {
            Some(focus) => out.push_str(&format!(
                "  Month {}: {} [{}/{}]\n",
                month.month, focus, done, total
            )),
            None => out.push_str(&format!("  Month {} [{}/{}]\n", month.month, done, total)),
        }
    }
    out
}
