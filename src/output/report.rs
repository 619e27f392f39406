use crate::error::OutputError;
use crate::planner::{regroup_by_year, Month, Plan, Task};
use std::fs;
use std::path::Path;

/// Write a plan as a markdown checklist
pub fn write_plan_report(
    path: &Path,
    plan: &Plan,
    months_per_year: usize,
) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(OutputError::CreateDir)?;
    }
    fs::write(path, render_plan_markdown(plan, months_per_year)).map_err(OutputError::WriteReport)
}

/// Render a plan as markdown. Plans longer than `months_per_year` months
/// get an extra year heading level.
pub fn render_plan_markdown(plan: &Plan, months_per_year: usize) -> String {
    let mut content = String::new();

    content.push_str(&format!("# {}\n\n", plan.goal));

    let progress = plan.progress();
    content.push_str("| Field | Value |\n");
    content.push_str("|-------|-------|\n");
    content.push_str(&format!("| Why | {} |\n", plan.why));
    content.push_str(&format!("| Timeframe | {} |\n", plan.timeframe));
    content.push_str(&format!("| Learning speed | {} |\n", plan.learning_speed));
    content.push_str(&format!("| Skill level | {} |\n", plan.skill_level));
    content.push_str(&format!(
        "| Progress | {}/{} tasks |\n",
        progress.done, progress.total
    ));
    content.push_str("\n---\n\n");

    if plan.roadmap.is_empty() {
        content.push_str("*Empty roadmap*\n");
        return content;
    }

    if plan.roadmap.len() > months_per_year.max(1) {
        for year in regroup_by_year(plan.roadmap.clone(), months_per_year) {
            content.push_str(&format!("## Year {}\n\n", year.year));
            for month in &year.months {
                push_month(&mut content, month, "###");
            }
        }
    } else {
        for month in &plan.roadmap {
            push_month(&mut content, month, "##");
        }
    }

    content
}

fn push_month(content: &mut String, month: &Month, heading: &str) {
    match &month.focus {
        Some(focus) => {
            content.push_str(&format!("{} Month {}: {}\n\n", heading, month.month, focus))
        }
        None => content.push_str(&format!("{} Month {}\n\n", heading, month.month)),
    }

    for week in &month.weeks {
        match &week.focus {
            Some(focus) => {
                content.push_str(&format!("{}# Week {}: {}\n\n", heading, week.week, focus))
            }
            None => content.push_str(&format!("{}# Week {}\n\n", heading, week.week)),
        }
        for task in &week.tasks {
            push_task(content, task);
        }
        content.push('\n');
    }
}

fn push_task(content: &mut String, task: &Task) {
    let check = if task.done { "x" } else { " " };
    content.push_str(&format!(
        "- [{}] **{}** ({})\n",
        check, task.title, task.estimated_time
    ));
    content.push_str(&format!("  {}\n", task.description));

    if let Some(videos) = &task.videos {
        for video in videos {
            if video.channel.is_empty() {
                content.push_str(&format!("  - [{}]({})\n", video.title, video.url));
            } else {
                content.push_str(&format!(
                    "  - [{}]({}) by {}\n",
                    video.title, video.url, video.channel
                ));
            }
        }
    }
}
