mod report;
mod summary;

pub use report::{render_plan_markdown, write_plan_report};
pub use summary::{
    build_run_summary, format_plan_list, format_plan_outline, format_progress,
    format_run_summary,
};
