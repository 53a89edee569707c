use clap::Parser;
use std::path::PathBuf;

use reveal_core::{PlanConfig, TextCardConfig};

#[derive(Parser)]
#[command(name = "revealcut")]
#[command(
    author,
    version,
    about = "Create a reveal effect with random switches and glitch transitions"
)]
pub struct Cli {
    /// Path to the original video
    pub original: PathBuf,

    /// Path to the modified (altered) video
    pub modified: PathBuf,

    /// Output path
    #[arg(short, long, default_value = "reveal_output.mp4")]
    pub output: PathBuf,

    /// Text message to show at the end (2 seconds)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Use the simple preset: no glitch transitions, 0.3s minimum segment
    #[arg(long)]
    pub simple: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Map the CLI surface onto a planner configuration.
    pub fn plan_config(&self) -> PlanConfig {
        let config = if self.simple {
            PlanConfig::simple()
        } else {
            PlanConfig::glitch()
        };

        match &self.message {
            Some(message) => config.with_text_card(TextCardConfig::new(message.clone())),
            None => config,
        }
    }
}
