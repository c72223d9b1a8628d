//! Command-line arguments

use clap::{ArgAction, Args, Parser, Subcommand};
use incident_drill::data::Difficulty;
use incident_drill::logging::LogFormat;
use std::path::PathBuf;

/// Incident response training drills in the terminal
#[derive(Parser, Debug)]
#[command(name = "incident-drill", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Scenario catalog (YAML or JSON); overrides the config file
    #[arg(long, global = true, env = "INCIDENT_DRILL_CONTENT")]
    pub content: Option<PathBuf>,

    /// Engine configuration file
    #[arg(long, global = true, env = "INCIDENT_DRILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, value_enum, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List scenarios in the catalog
    List(ListArgs),

    /// Check a catalog file and print lint warnings
    Validate(ValidateArgs),

    /// Play a scenario, reading choices from stdin
    Play(PlayArgs),

    /// Browse the IOC library
    Ioc(IocArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// beginner, normal, hard or expert
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    #[arg(long)]
    pub category: Option<String>,

    /// Only scenarios a player of this level may start
    #[arg(long)]
    pub level: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    pub scenario_id: String,

    #[arg(long, default_value = "Analyst")]
    pub player: String,
}

#[derive(Args, Debug)]
pub struct IocArgs {
    /// Show one entry in full
    pub id: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Entries used by actors whose name contains this text
    #[arg(long)]
    pub actor: Option<String>,

    /// Match an observed behaviour against the detection patterns
    #[arg(long, conflicts_with_all = ["id", "category", "actor"])]
    pub analyze: Option<String>,
}
