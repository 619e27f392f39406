//! Roadmap model and the operations that shape and consume it
//!
//! - `types`: the canonical Month -> Week -> Task hierarchy
//! - `regroup`: chunking flat weeks into months and months into years
//! - `fallback`: the plan used when a generated response is unusable
//! - `queue`: treating a plan as an ordered queue of work

pub mod fallback;
pub mod queue;
pub mod regroup;
pub mod types;

pub use fallback::fallback_plan;
pub use queue::{DailyTask, Progress, TaskRef};
pub use regroup::regroup_by_year;
pub use types::{LearningSpeed, Month, Plan, PlanRequest, SkillLevel, Task, Video, Week};
