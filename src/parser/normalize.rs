//! Normalizer: loosely shaped model JSON -> canonical `Plan`
//!
//! Top-level fields the model omitted are backfilled from the request.
//! Ordinals are always rewritten to 1..n, weeks without a task list get a
//! placeholder task, and tasks get a description and time estimate when
//! they lack one. Existing `done` flags and `videos` lists are kept, so
//! running this on its own output changes nothing.

use crate::error::ParserError;
use crate::planner::regroup::{regroup_by_month, renumber_months};
use crate::planner::types::{Month, Plan, PlanRequest, Task, Video, Week};
use serde_json::{Map, Value};
use tracing::debug;

use super::shape::{json_kind, RoadmapShape};

pub const DEFAULT_ESTIMATED_TIME: &str = "5 hours";
pub const PLACEHOLDER_ESTIMATED_TIME: &str = "8 hours";

const MONTH_FOCUS_KEYS: &[&str] = &["focus", "title", "stage", "theme"];
const WEEK_FOCUS_KEYS: &[&str] = &["focus", "title", "theme"];
const TASK_TITLE_KEYS: &[&str] = &["title", "name", "task"];
const TASK_DESCRIPTION_KEYS: &[&str] = &["description", "details", "summary"];

/// Where a placeholder task takes its wording from
#[derive(Debug, Default)]
struct StageContext {
    focus: Option<String>,
    milestone: Option<String>,
}

impl StageContext {
    fn from_object(obj: Option<&Map<String, Value>>, focus_keys: &[&str]) -> Self {
        match obj {
            Some(obj) => Self {
                focus: text_field(obj, focus_keys),
                milestone: text_field(obj, &["milestone"]),
            },
            None => Self::default(),
        }
    }

    fn placeholder_task(&self) -> Task {
        Task::new(
            format!("Learn {}", self.focus.as_deref().unwrap_or("concepts")),
            self.milestone
                .clone()
                .unwrap_or_else(|| "Complete stage milestone".to_string()),
            PLACEHOLDER_ESTIMATED_TIME,
        )
    }
}

/// Convert a parsed response into a canonical plan
pub fn normalize_plan(
    value: &Value,
    request: &PlanRequest,
    weeks_per_month: usize,
) -> Result<Plan, ParserError> {
    let empty = Map::new();
    let (top, roadmap) = match value {
        Value::Object(map) => (map, map.get("roadmap")),
        // A bare list is taken to be the roadmap itself
        Value::Array(_) => (&empty, Some(value)),
        other => return Err(ParserError::NotAnObject(json_kind(other))),
    };

    let shape = RoadmapShape::detect(roadmap)?;
    debug!("Normalizing {} roadmap", shape.name());
    let roadmap = build_months(shape, weeks_per_month)?;

    Ok(Plan {
        goal: text_field(top, &["goal"]).unwrap_or_else(|| request.goal.clone()),
        why: text_field(top, &["why", "rationale", "motivation"])
            .unwrap_or_else(|| request.why.clone()),
        timeframe: text_field(top, &["timeframe"]).unwrap_or_else(|| request.timeframe.clone()),
        learning_speed: text_field(top, &["learning_speed"])
            .and_then(|s| s.parse().ok())
            .unwrap_or(request.learning_speed),
        skill_level: text_field(top, &["skill_level"])
            .and_then(|s| s.parse().ok())
            .unwrap_or(request.skill_level),
        roadmap,
    })
}

fn build_months(shape: RoadmapShape, weeks_per_month: usize) -> Result<Vec<Month>, ParserError> {
    let mut months: Vec<Month> = match shape {
        RoadmapShape::Nested(entries) => entries.iter().map(normalize_month).collect(),
        RoadmapShape::Flat(entries) => {
            let weeks = entries.iter().map(normalize_unit).collect();
            regroup_by_month(weeks, weeks_per_month)
        }
        RoadmapShape::Yearly(entries) => {
            let months: Vec<Value> = entries
                .iter()
                .filter_map(|year| year.get("months").and_then(Value::as_array))
                .flatten()
                .cloned()
                .collect();
            let inner = Value::Array(months);
            build_months(RoadmapShape::detect(Some(&inner))?, weeks_per_month)?
        }
        RoadmapShape::Keyed(map) => map
            .iter()
            .map(|(label, weeks)| normalize_keyed_month(label, weeks))
            .collect(),
    };

    renumber_months(&mut months);
    Ok(months)
}

fn normalize_month(entry: &Value) -> Month {
    let obj = entry.as_object();
    let context = StageContext::from_object(obj, MONTH_FOCUS_KEYS);
    let weeks = normalize_weeks(obj.and_then(|o| o.get("weeks")), &context);

    Month {
        month: 0,
        focus: context.focus,
        weeks,
    }
}

/// `"Month 1": {"week1": {...}, "week2": {...}}` or `"Month 1": [ ... ]`
fn normalize_keyed_month(label: &str, weeks: &Value) -> Month {
    let context = StageContext {
        focus: non_empty(label),
        milestone: None,
    };
    let weeks = normalize_weeks(Some(weeks), &context);

    Month {
        month: 0,
        focus: context.focus,
        weeks,
    }
}

/// Weeks given as a list or as an object keyed `week1`, `week2`, ... in
/// order. Anything else becomes one placeholder week.
fn normalize_weeks(weeks: Option<&Value>, month: &StageContext) -> Vec<Week> {
    let entries: Vec<&Value> = match weeks {
        Some(Value::Array(list)) => list.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => {
            return vec![Week {
                week: 1,
                focus: None,
                tasks: vec![month.placeholder_task()],
            }]
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, week)| normalize_week(week, idx, month))
        .collect()
}

fn normalize_week(value: &Value, idx: usize, month: &StageContext) -> Week {
    let obj = value.as_object();
    let focus = obj.and_then(|o| text_field(o, WEEK_FOCUS_KEYS));

    let tasks = match value {
        // A bare string week reads as a single task
        Value::String(title) => string_task(title).into_iter().collect(),
        _ => match obj.and_then(|o| o.get("tasks")).and_then(Value::as_array) {
            Some(tasks) => normalize_tasks(tasks),
            None => {
                let context = StageContext {
                    focus: month.focus.clone().or_else(|| focus.clone()),
                    milestone: month.milestone.clone(),
                };
                vec![context.placeholder_task()]
            }
        },
    };

    Week {
        week: ordinal(idx),
        focus,
        tasks,
    }
}

/// One entry of a flat roadmap becomes one week
fn normalize_unit(value: &Value) -> Week {
    let obj = value.as_object();
    let context = StageContext::from_object(obj, MONTH_FOCUS_KEYS);

    let tasks = if let Value::String(title) = value {
        string_task(title).into_iter().collect()
    } else if let Some(tasks) = obj.and_then(|o| o.get("tasks")).and_then(Value::as_array) {
        normalize_tasks(tasks)
    } else if let Some(weeks) = obj.and_then(|o| o.get("weeks")).and_then(Value::as_array) {
        // A stray month in an otherwise flat list: keep its tasks in order
        weeks
            .iter()
            .enumerate()
            .flat_map(|(idx, week)| normalize_week(week, idx, &context).tasks)
            .collect()
    } else {
        vec![context.placeholder_task()]
    };

    Week {
        week: 0,
        focus: context.focus,
        tasks,
    }
}

fn normalize_tasks(tasks: &[Value]) -> Vec<Task> {
    tasks.iter().filter_map(normalize_task).collect()
}

fn normalize_task(value: &Value) -> Option<Task> {
    let obj = match value {
        Value::String(title) => return string_task(title),
        Value::Object(obj) => obj,
        other => {
            debug!("Dropping {} task entry", json_kind(other));
            return None;
        }
    };

    let description = text_field(obj, TASK_DESCRIPTION_KEYS);
    let Some(title) = text_field(obj, TASK_TITLE_KEYS).or_else(|| description.clone()) else {
        debug!("Dropping task without title or description");
        return None;
    };

    let estimated_time = match obj.get("estimated_time") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => format!("{} hours", n),
        _ => DEFAULT_ESTIMATED_TIME.to_string(),
    };

    let videos = obj.get("videos").and_then(Value::as_array).map(|list| {
        list.iter()
            .filter_map(|v| serde_json::from_value::<Video>(v.clone()).ok())
            .collect()
    });

    Some(Task {
        description: description.unwrap_or_else(|| format!("Work on {}", title)),
        title,
        estimated_time,
        done: obj.get("done").and_then(Value::as_bool).unwrap_or(false),
        videos,
    })
}

fn string_task(title: &str) -> Option<Task> {
    let title = non_empty(title)?;
    Some(Task::new(
        title.clone(),
        format!("Work on {}", title),
        DEFAULT_ESTIMATED_TIME,
    ))
}

/// First of `keys` holding a non-blank string, trimmed
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find_map(non_empty)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn ordinal(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |n| n.saturating_add(1))
}
