use is_terminal::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use commentscope_runtime::{Config, ControllerSettings, MockAnalysisProvider, ViewStateController};

use crate::presentation::tui::{self, TuiApp};

pub fn handle(config: &Config) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        anyhow::bail!(
            "The interactive viewer needs a terminal. Use `commentscope report` for piped output."
        );
    }

    let provider = Arc::new(MockAnalysisProvider::new(config.analysis_delay()));
    let settings = ControllerSettings::from(config);
    let app = TuiApp::new(config.export_dir()?);
    tracing::info!(
        delay_ms = config.analysis.delay_ms,
        step_interval_ms = config.loading.step_interval_ms,
        "starting viewer"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let (controller, events) = ViewStateController::new(provider, settings);
        tui::run(controller, events, app).await
    })
}
