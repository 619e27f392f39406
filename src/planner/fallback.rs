//! Minimal plan used when a generated response cannot be repaired

use super::types::{Month, Plan, PlanRequest, Task, Week};

/// Build a small but well-formed plan from the request alone
pub fn fallback_plan(request: &PlanRequest) -> Plan {
    let weeks = vec![
        Week {
            week: 1,
            focus: Some("Getting started".to_string()),
            tasks: vec![
                Task::new(
                    "Start learning basics",
                    "Begin with fundamentals",
                    "10 hours",
                ),
                Task::new(
                    "Collect free learning resources",
                    format!("Gather tutorials and documentation for {}", request.goal),
                    "2 hours",
                ),
            ],
        },
        Week {
            week: 2,
            focus: Some("Practice".to_string()),
            tasks: vec![Task::new(
                "Build a small practice project",
                "Apply the fundamentals to a hands-on exercise",
                "10 hours",
            )],
        },
    ];

    Plan {
        goal: request.goal.clone(),
        why: request.why.clone(),
        timeframe: request.timeframe.clone(),
        learning_speed: request.learning_speed,
        skill_level: request.skill_level,
        roadmap: vec![Month {
            month: 1,
            focus: Some("Foundation".to_string()),
            weeks,
        }],
    }
}
