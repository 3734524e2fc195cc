use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use commentscope_runtime::{Config, ControllerSettings, MockAnalysisProvider, run_to_report};

use crate::presentation::console;
use crate::types::OutputFormat;

pub fn handle(
    config: &Config,
    format: OutputFormat,
    output: Option<PathBuf>,
    url: &str,
    no_delay: bool,
) -> Result<()> {
    let delay = if no_delay {
        Duration::ZERO
    } else {
        config.analysis_delay()
    };
    let provider = Arc::new(MockAnalysisProvider::new(delay));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(run_to_report(
        provider,
        ControllerSettings::from(config),
        url,
    ))?;

    match (format, output) {
        (OutputFormat::Json, Some(path)) => {
            report
                .write_json(&path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        (OutputFormat::Json, None) => {
            println!("{}", report.to_json_pretty()?);
        }
        (OutputFormat::Plain, Some(path)) => {
            std::fs::write(&path, console::render_report(&report, false))
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        (OutputFormat::Plain, None) => {
            let colored = std::io::stdout().is_terminal();
            print!("{}", console::render_report(&report, colored));
        }
    }

    Ok(())
}
