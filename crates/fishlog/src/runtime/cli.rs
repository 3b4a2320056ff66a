//! Cli — command line flags layered over the loaded config.

use clap::Parser;

use crate::conf::{FishlogConfig, OutputFormat};
use crate::report::{SortKey, ViewMode};

#[derive(Debug, Parser)]
#[command(
    name = "fishlog",
    version,
    about = "Reconstruct fishing capture and lost records from minigame logs"
)]
pub struct Cli {
    /// Log files to analyze; `-` or nothing reads stdin
    pub inputs: Vec<String>,

    /// Config file (defaults to ./fishlog.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort smallest first
    #[arg(long)]
    pub ascending: bool,

    /// Only include this rod slot (repeatable)
    #[arg(long = "rod")]
    pub rods: Vec<u32>,

    /// Emit JSON instead of a text table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Flags override file and environment settings
    pub fn apply(&self, config: &mut FishlogConfig) {
        if let Some(view) = self.view {
            config.report.view = view;
        }
        if let Some(sort) = self.sort {
            config.report.sort = sort;
        }
        if self.ascending {
            config.report.descending = false;
        }
        if !self.rods.is_empty() {
            config.report.rods = self.rods.clone();
        }
        if self.json {
            config.output = OutputFormat::Json;
        }
    }
}
