use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::logging::{self, LogTarget};
use crate::types::LogLevel;
use anyhow::Result;
use commentscope_runtime::{Config, resolve_config_path};

pub fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;

    // `config` subcommands must work even when the file on disk is broken.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommand::Init { force } => handlers::config::init(&config_path, *force),
            ConfigCommand::Show => handlers::config::show(&config_path),
            ConfigCommand::Path => handlers::config::path(&config_path),
        };
    }

    let config = Config::load_from(&config_path)?;
    let command = cli.command.unwrap_or(Commands::Tui);

    if let Commands::Tui = command {
        let log_file = match cli.log_file {
            Some(path) => path,
            None => config.log_file()?,
        };
        let level = log_level(cli.log_level, &config, LogLevel::Info);
        logging::init(&level, LogTarget::File(log_file))?;
        return handlers::tui::handle(&config);
    }

    let level = log_level(cli.log_level, &config, LogLevel::Warn);
    let target = match cli.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Stderr,
    };
    logging::init(&level, target)?;

    match command {
        Commands::Validate { url, strict } => handlers::validate::handle(&config, &url, strict),
        Commands::Report {
            format,
            output,
            url,
            no_delay,
        } => handlers::report::handle(&config, format, output, &url, no_delay),
        Commands::Tui | Commands::Config { .. } => Ok(()),
    }
}

/// `--log-level`, then `[log] level`, then the per-mode default.
fn log_level(flag: Option<LogLevel>, config: &Config, fallback: LogLevel) -> String {
    match (flag, &config.log.level) {
        (Some(level), _) => level.to_string(),
        (None, Some(level)) => level.clone(),
        (None, None) => fallback.to_string(),
    }
}
