pub mod done;
pub mod enrich;
pub mod generate;
pub mod init;
pub mod list;
pub mod next;
pub mod schema;
pub mod serve;
pub mod show;

use crate::config::Config;
use crate::planner::{LearningSpeed, SkillLevel};
use crate::store::PlanStore;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navi")]
#[command(
    author,
    version,
    about = "Generate learning roadmaps and work through them one task at a time"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default navi.yaml
    Init(InitArgs),

    /// Generate, enrich and store a new roadmap
    Generate(GenerateArgs),

    /// List stored roadmaps with progress
    List(StoreArgs),

    /// Show a stored roadmap
    Show(ShowArgs),

    /// Show the next pending task of a roadmap
    Next(NextArgs),

    /// Mark the next task (or a specific one) as done
    Done(DoneArgs),

    /// Attach videos to a stored roadmap's tasks
    Enrich(EnrichArgs),

    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Print JSON Schema for the config (or a plan)
    Schema(SchemaArgs),
}

/// Where the config and plan snapshot live
#[derive(Args, Clone)]
pub struct StoreArgs {
    /// Path to config file
    #[arg(short, long, default_value = "navi.yaml")]
    pub config: PathBuf,

    /// Override the plan snapshot path from the config
    #[arg(long)]
    pub store: Option<PathBuf>,
}

impl StoreArgs {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(&self.config)
            .with_context(|| format!("Failed to load config {}", self.config.display()))?;
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn open_store(&self, config: &Config) -> Result<PlanStore> {
        PlanStore::open(&config.store_path)
            .with_context(|| format!("Failed to open plan store {}", config.store_path.display()))
    }
}

#[derive(Args, Clone)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(short, long, default_value = "navi.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// What you want to achieve
    #[arg(long)]
    pub goal: String,

    /// Why it matters to you
    #[arg(long, default_value = "")]
    pub why: String,

    /// How long you have (e.g. "3 months")
    #[arg(long, default_value = "3 months")]
    pub timeframe: String,

    #[arg(long, default_value = "")]
    pub target_role: String,

    #[arg(long, default_value = "10")]
    pub hours_per_week: String,

    /// Skills you already have (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,

    #[arg(long, default_value = "visual")]
    pub learning_style: String,

    /// slow, average or fast
    #[arg(long, default_value = "average")]
    pub learning_speed: LearningSpeed,

    /// beginner, intermediate or advanced
    #[arg(long, default_value = "beginner")]
    pub skill_level: SkillLevel,

    /// Also write the roadmap as markdown to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Plan id
    pub id: String,

    /// Print the plan as JSON
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Print the plan as markdown
    #[arg(long)]
    pub markdown: bool,
}

#[derive(Args, Clone)]
pub struct NextArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Plan id
    pub id: String,

    /// Print the task as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DoneArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Plan id
    pub id: String,

    /// Month ordinal of a specific task
    #[arg(long, requires_all = ["week", "task"])]
    pub month: Option<u32>,

    /// Week ordinal within the month
    #[arg(long, requires_all = ["month", "task"])]
    pub week: Option<u32>,

    /// 1-based task position within the week
    #[arg(long, requires_all = ["month", "week"])]
    pub task: Option<u32>,
}

#[derive(Args, Clone)]
pub struct EnrichArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Plan id
    pub id: String,

    /// Search again even for tasks that already have videos
    #[arg(long)]
    pub refetch: bool,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Override bind address
    #[arg(long)]
    pub bind: Option<String>,

    /// Override port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Clone)]
pub struct SchemaArgs {
    /// Print the plan schema instead of the config schema
    #[arg(long)]
    pub plan: bool,
}
