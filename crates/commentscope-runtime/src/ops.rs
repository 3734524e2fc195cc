use std::sync::Arc;

use commentscope_types::AnalysisReport;

use crate::controller::{ControllerError, ControllerSettings, Phase, ViewStateController};
use crate::provider::{AnalysisError, AnalysisProvider};
use crate::{Error, Result};

/// Drive a controller from `Home` to `Report` without a UI and hand back
/// the report.
///
/// Loading-step ticks are applied as they arrive, exactly as the TUI does.
pub async fn run_to_report(
    provider: Arc<dyn AnalysisProvider>,
    settings: ControllerSettings,
    raw_url: &str,
) -> Result<AnalysisReport> {
    let (mut controller, mut events) = ViewStateController::new(provider, settings);
    controller.submit(raw_url)?;

    while controller.phase() == Phase::Loading {
        let Some(event) = events.recv().await else {
            break;
        };
        controller.handle(event);
    }

    outcome(&controller)
}

fn outcome(controller: &ViewStateController) -> Result<AnalysisReport> {
    match controller.state().report() {
        Some(report) => Ok(report.clone()),
        None => match controller.last_error() {
            Some(ControllerError::Analysis(err)) => Err(Error::Analysis(err.clone())),
            Some(ControllerError::Validation(err)) => Err(Error::Validation(err.clone())),
            None => Err(Error::Analysis(AnalysisError::Failed(
                "the analysis stopped before producing a report".to_string(),
            ))),
        },
    }
}
