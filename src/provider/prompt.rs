//! Prompts sent to the generation service

use crate::planner::PlanRequest;

pub const SYSTEM_PROMPT: &str = r#"You are Navi, a realistic and practical career strategist AI.

Your job is to design a personalized learning roadmap that fits the user's situation.
Be detailed and realistic, and output valid JSON.

Instructions:
1. Think step-by-step like a mentor coaching a student from scratch.
2. Break the roadmap into clear weekly stages based on their learning speed.
3. Match tasks and concepts with the user's skill level.
4. Ensure everything can fit within the timeframe realistically.
5. Use only free resources (e.g., FreeCodeCamp, Scrimba, MDN, YouTube).
6. Output only valid JSON in the format below. No prose, no markdown.

JSON format:
{
    "goal": "...",
    "why": "...",
    "timeframe": "...",
    "learning_speed": "...",
    "skill_level": "...",
    "roadmap": [
        {
            "month": 1,
            "focus": "Main focus of this stage",
            "weeks": [
                {
                    "week": 1,
                    "tasks": [
                        { "title": "Learn HTML basics", "description": "...", "estimated_time": "2 hours" },
                        { "title": "Build first webpage", "description": "...", "estimated_time": "3 hours" }
                    ]
                }
            ]
        }
    ]
}"#;

pub fn build_user_prompt(request: &PlanRequest) -> String {
    let skills = if request.skills.is_empty() {
        "none yet".to_string()
    } else {
        request.skills.join(", ")
    };

    format!(
        "Please create a roadmap for me with the following details:\n\n\
        - Goal: {}\n\
        - Target Role: {}\n\
        - Why: {}\n\
        - Timeframe: {}\n\
        - Hours per week: {}\n\
        - Current Skills: {}\n\
        - Learning Style: {}\n\
        - Learning Speed: {} (slow, average, fast)\n\
        - Skill Level: {} (beginner, intermediate, advanced)\n\n\
        Please generate a detailed roadmap that fits my situation and return it as valid JSON only.",
        request.goal,
        request.target_role,
        request.why,
        request.timeframe,
        request.hours_per_week,
        skills,
        request.learning_style,
        request.learning_speed,
        request.skill_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SkillLevel;

    #[test]
    fn test_user_prompt_lists_request_fields() {
        let mut request = PlanRequest::new("Cloud engineer", "Remote work", "6 months");
        request.skills = vec!["Linux".to_string(), "Bash".to_string()];
        request.skill_level = SkillLevel::Advanced;

        let prompt = build_user_prompt(&request);

        assert!(prompt.contains("- Goal: Cloud engineer"));
        assert!(prompt.contains("- Current Skills: Linux, Bash"));
        assert!(prompt.contains("- Skill Level: advanced"));
        assert!(prompt.contains("- Hours per week: 10"));
    }

    #[test]
    fn test_no_skills_is_explicit() {
        let prompt = build_user_prompt(&PlanRequest::new("g", "w", "t"));
        assert!(prompt.contains("- Current Skills: none yet"));
    }
}
