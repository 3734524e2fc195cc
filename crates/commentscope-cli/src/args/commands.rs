use crate::types::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;

/// Link analyzed by `report` when no `--url` is given
pub const SAMPLE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Open the interactive viewer (default)")]
    Tui,

    #[command(about = "Check whether a link is an accepted video URL")]
    Validate {
        url: String,

        #[arg(long, help = "Only allow query parameters or a fragment after the video id")]
        strict: bool,
    },

    #[command(about = "Run the analysis without the UI and print the report")]
    Report {
        #[arg(long, default_value = "plain")]
        format: OutputFormat,

        #[arg(long, short, help = "Write the report to a file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, default_value = SAMPLE_URL)]
        url: String,

        #[arg(long, help = "Skip the simulated analysis delay")]
        no_delay: bool,
    },

    #[command(about = "Manage the configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a config file with default values")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },

    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Print the config file location")]
    Path,
}
