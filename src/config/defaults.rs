use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_store_path() -> PathBuf {
    PathBuf::from(".navi/plans.json")
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_weeks_per_month() -> usize {
    crate::planner::regroup::DEFAULT_WEEKS_PER_MONTH
}

pub fn default_months_per_year() -> usize {
    crate::planner::regroup::DEFAULT_MONTHS_PER_YEAR
}

pub fn default_generation_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

pub fn default_generation_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

pub fn default_generation_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

pub fn default_temperature() -> f32 {
    0.4
}

pub fn default_max_tokens() -> u32 {
    4000
}

pub fn default_generation_timeout_sec() -> u64 {
    60
}

pub fn default_search_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

pub fn default_search_key_env() -> String {
    "YOUTUBE_API_KEY".to_string()
}

pub fn default_max_results() -> usize {
    5
}

pub fn default_search_timeout_sec() -> u64 {
    30
}

pub fn default_max_attempts() -> u32 {
    2
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}

pub fn default_bind() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_true() -> bool {
    true
}
