//! Work-queue view over a plan
//!
//! Tasks are visited month by month, week by week, in list order. The first
//! task whose `done` flag is false is "next". Flags only ever move from
//! false to true here.

use crate::error::QueueError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{Plan, Task, Video};

/// What a learner sees for today
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct DailyTask {
    pub title: String,
    pub goal: String,
    pub why: String,
    pub estimated_time: String,
    pub videos: Vec<Video>,
    pub done: bool,
}

/// Position of a task: month and week ordinals, then 1-based index in the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskRef {
    pub month: u32,
    pub week: u32,
    pub task: u32,
}

impl std::fmt::Display for TaskRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{}/W{}/T{}", self.month, self.week, self.task)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.done)
    }

    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }
}

impl Plan {
    /// All tasks in traversal order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.roadmap
            .iter()
            .flat_map(|m| m.weeks.iter())
            .flat_map(|w| w.tasks.iter())
    }

    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> + '_ {
        self.roadmap
            .iter_mut()
            .flat_map(|m| m.weeks.iter_mut())
            .flat_map(|w| w.tasks.iter_mut())
    }

    /// First incomplete task together with its position
    pub fn next_pending(&self) -> Option<(TaskRef, &Task)> {
        for month in &self.roadmap {
            for week in &month.weeks {
                for (idx, task) in week.tasks.iter().enumerate() {
                    if !task.done {
                        let at = TaskRef {
                            month: month.month,
                            week: week.week,
                            task: position(idx),
                        };
                        return Some((at, task));
                    }
                }
            }
        }
        None
    }

    /// Project the next incomplete task, or `None` when all work is done
    pub fn peek_next(&self) -> Option<DailyTask> {
        self.next_pending().map(|(_, task)| DailyTask {
            title: task.title.clone(),
            goal: self.goal.clone(),
            why: self.why.clone(),
            estimated_time: task.estimated_time.clone(),
            videos: task.videos.clone().unwrap_or_default(),
            done: false,
        })
    }

    /// Flip the first incomplete task to done and return it
    pub fn mark_next_done(&mut self) -> Result<Task, QueueError> {
        let task = self
            .tasks_mut()
            .find(|t| !t.done)
            .ok_or(QueueError::NoPendingTask)?;
        task.done = true;
        Ok(task.clone())
    }

    /// Mark a specific task done, regardless of what comes before it
    pub fn mark_done_at(&mut self, at: TaskRef) -> Result<Task, QueueError> {
        let task = self
            .roadmap
            .iter_mut()
            .find(|m| m.month == at.month)
            .and_then(|m| m.weeks.iter_mut().find(|w| w.week == at.week))
            .and_then(|w| {
                let idx = usize::try_from(at.task).ok()?.checked_sub(1)?;
                w.tasks.get_mut(idx)
            })
            .ok_or(QueueError::TaskNotFound {
                month: at.month,
                week: at.week,
                task: at.task,
            })?;

        if task.done {
            return Err(QueueError::AlreadyDone(task.title.clone()));
        }
        task.done = true;
        Ok(task.clone())
    }

    pub fn progress(&self) -> Progress {
        self.tasks().fold(Progress::default(), |mut acc, task| {
            acc.total += 1;
            if task.done {
                acc.done += 1;
            }
            acc
        })
    }
}

fn position(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |n| n.saturating_add(1))
}
