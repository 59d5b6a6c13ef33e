use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::form::patterns::ScoringWeights;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-copilot",
    version,
    about = "Guess what a web form is for and help fill it in"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-copilot.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append classification decisions to this JSONL file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the form in a page snapshot
    Classify {
        /// Page snapshot JSON file
        #[arg(long)]
        snapshot: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a question about the form in a page snapshot
    Ask {
        /// Page snapshot JSON file
        #[arg(long)]
        snapshot: String,

        /// The question to answer
        #[arg(short, long)]
        question: String,

        /// Print the answer and question analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain each field with its guessed purpose and a sample value
    Fields {
        /// Page snapshot JSON file
        #[arg(long)]
        snapshot: String,
    },

    /// Analyze form structure: key fields, privacy, complexity
    Analyze {
        /// Page snapshot JSON file
        #[arg(long)]
        snapshot: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

pub const DEFAULT_CONFIG_FILE: &str = "form-copilot.yaml";

/// Optional YAML config file: `form-copilot.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Custom pattern table (YAML list of patterns)
    pub patterns: Option<String>,

    /// Decision trace file
    pub trace: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let path = path.unwrap_or(DEFAULT_CONFIG_FILE);

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return AppConfig::default(),
    };

    match serde_yaml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!(path, error = %e, "failed to parse config, using defaults");
            AppConfig::default()
        }
    }
}

/// Map `-v` count to a default log filter.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
