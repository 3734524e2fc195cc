mod commands;

pub use commands::*;

use crate::types::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commentscope")]
#[command(about = "Browse video comment analytics reports in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to config.toml")]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[arg(long, global = true, help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
