//! Types for the learning roadmap: the request that seeds a plan and the
//! Month -> Week -> Task hierarchy it is normalized into.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a caller asks the generation pipeline for
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PlanRequest {
    /// The outcome the learner is working towards
    pub goal: String,

    #[serde(default)]
    pub target_role: String,

    /// Motivation, echoed back on every daily task
    pub why: String,

    /// Free-form horizon ("3 months", "6_months", ...)
    pub timeframe: String,

    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default = "default_learning_style")]
    pub learning_style: String,

    #[serde(default)]
    pub learning_speed: LearningSpeed,

    #[serde(default)]
    pub skill_level: SkillLevel,
}

fn default_hours_per_week() -> String {
    "10".to_string()
}

fn default_learning_style() -> String {
    "visual".to_string()
}

impl PlanRequest {
    pub fn new(
        goal: impl Into<String>,
        why: impl Into<String>,
        timeframe: impl Into<String>,
    ) -> Self {
        Self {
            goal: goal.into(),
            target_role: String::new(),
            why: why.into(),
            timeframe: timeframe.into(),
            hours_per_week: default_hours_per_week(),
            skills: Vec::new(),
            learning_style: default_learning_style(),
            learning_speed: LearningSpeed::default(),
            skill_level: SkillLevel::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LearningSpeed {
    Slow,
    #[default]
    Average,
    Fast,
}

impl std::fmt::Display for LearningSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearningSpeed::Slow => write!(f, "slow"),
            LearningSpeed::Average => write!(f, "average"),
            LearningSpeed::Fast => write!(f, "fast"),
        }
    }
}

impl std::str::FromStr for LearningSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(LearningSpeed::Slow),
            "average" | "medium" | "normal" | "moderate" => Ok(LearningSpeed::Average),
            "fast" | "quick" => Ok(LearningSpeed::Fast),
            _ => Err(format!("Unknown learning speed: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "novice" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" | "expert" => Ok(SkillLevel::Advanced),
            _ => Err(format!("Unknown skill level: {}", s)),
        }
    }
}

/// A complete roadmap in canonical Month -> Week -> Task form
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Plan {
    pub goal: String,

    pub why: String,

    pub timeframe: String,

    #[serde(default)]
    pub learning_speed: LearningSpeed,

    #[serde(default)]
    pub skill_level: SkillLevel,

    /// Months in ordinal order, numbered from 1 without gaps
    #[serde(default)]
    pub roadmap: Vec<Month>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Month {
    pub month: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,

    #[serde(default)]
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Week {
    /// Position within the parent month, starting at 1
    pub week: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Leaf unit of work
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Task {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub estimated_time: String,

    #[serde(default)]
    pub done: bool,

    /// `None` until enrichment has run; `Some(vec![])` means it ran and found nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            estimated_time: estimated_time.into(),
            done: false,
            videos: None,
        }
    }

    /// True when a previous enrichment attached at least one video
    pub fn has_videos(&self) -> bool {
        self.videos.as_ref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Video {
    pub title: String,

    pub url: String,

    /// Passed through as the source reports it (ISO-8601 for YouTube)
    #[serde(default)]
    pub duration: String,

    #[serde(default = "default_views")]
    pub views: String,

    #[serde(default)]
    pub channel: String,
}

fn default_views() -> String {
    "0".to_string()
}

/// Months grouped into a year, used for long horizons
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Year {
    pub year: u32,
    pub months: Vec<Month>,
}

impl Plan {
    pub fn task_count(&self) -> usize {
        self.roadmap
            .iter()
            .flat_map(|m| m.weeks.iter())
            .map(|w| w.tasks.len())
            .sum()
    }

    /// Clear every completion flag. Only used on freshly generated plans,
    /// before they are handed to the store.
    pub fn reset_progress(&mut self) {
        for task in self.tasks_mut() {
            task.done = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_minimal_json() {
        let json = r#"{"goal": "Frontend developer", "why": "Career change", "timeframe": "3 months"}"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.hours_per_week, "10");
        assert_eq!(request.learning_style, "visual");
        assert_eq!(request.learning_speed, LearningSpeed::Average);
        assert_eq!(request.skill_level, SkillLevel::Beginner);
        assert!(request.skills.is_empty());
        assert!(request.target_role.is_empty());
    }

    #[test]
    fn test_speed_and_level_parse_leniently() {
        assert_eq!("Moderate".parse::<LearningSpeed>().unwrap(), LearningSpeed::Average);
        assert_eq!(" FAST ".parse::<LearningSpeed>().unwrap(), LearningSpeed::Fast);
        assert_eq!("expert".parse::<SkillLevel>().unwrap(), SkillLevel::Advanced);
        assert!("warp".parse::<LearningSpeed>().is_err());
    }

    #[test]
    fn test_video_views_default_to_zero() {
        let json = r#"{"title": "Intro", "url": "https://www.youtube.com/watch?v=x", "duration": "PT5M", "channel": "c"}"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.views, "0");
    }

    #[test]
    fn test_unenriched_task_omits_videos_key() {
        let task = Task::new("Learn HTML", "Basics", "2 hours");
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("videos").is_none());

        let mut enriched = task.clone();
        enriched.videos = Some(Vec::new());
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["videos"], serde_json::json!([]));
        assert!(!enriched.has_videos());
    }
}
