//! Top-level view state machine.
//!
//! ```text
//! Home --submit(valid)--> Loading --complete--> Report --back--> Home
//!                            |
//!                            +--failed / cancel--> Home
//! ```
//!
//! [`ViewStateController`] is the only writer of [`ViewState`]. Work that
//! happens while loading (the analysis request and the cosmetic step ticker)
//! runs on spawned tasks that never touch the state directly: they send
//! [`ControllerEvent`]s back over a channel, and the owner of the controller
//! feeds them to [`ViewStateController::handle`]. Each event is tagged with
//! the epoch of the loading episode that issued it so stale events are
//! dropped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use commentscope_engine::{MatchMode, UrlValidator, ValidUrl, ValidationError};
use commentscope_types::AnalysisReport;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::Config;
use crate::provider::{AnalysisError, AnalysisProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Home,
    Loading,
    Report,
}

/// Progress shown on the loading screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingState {
    pub url: ValidUrl,
    pub step: u8,
    pub max_step: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Home,
    Loading(LoadingState),
    Report(Box<AnalysisReport>),
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        match self {
            ViewState::Home => Phase::Home,
            ViewState::Loading(_) => Phase::Loading,
            ViewState::Report(_) => Phase::Report,
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            ViewState::Report(report) => Some(&**report),
            _ => None,
        }
    }

    pub fn loading(&self) -> Option<&LoadingState> {
        match self {
            ViewState::Loading(loading) => Some(loading),
            _ => None,
        }
    }
}

/// Message from a loading-episode task back to the controller
#[derive(Debug)]
pub enum ControllerEvent {
    StepTick {
        epoch: u64,
    },
    AnalysisFinished {
        epoch: u64,
        result: Result<AnalysisReport, AnalysisError>,
    },
}

impl ControllerEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            ControllerEvent::StepTick { epoch } => *epoch,
            ControllerEvent::AnalysisFinished { epoch, .. } => *epoch,
        }
    }
}

/// Error surfaced on the home screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    Validation(ValidationError),
    Analysis(AnalysisError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Validation(err) => write!(f, "{}", err),
            ControllerError::Analysis(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ControllerError {}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub step_interval: Duration,
    pub max_step: u8,
    pub match_mode: MatchMode,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            step_interval: config.step_interval(),
            max_step: config.loading.max_step,
            match_mode: config.match_mode(),
        }
    }
}

/// Tasks spawned for a single stay in `Loading`. Dropping it aborts both.
struct LoadingEpisode {
    epoch: u64,
    acquisition: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl Drop for LoadingEpisode {
    fn drop(&mut self) {
        self.acquisition.abort();
        self.ticker.abort();
    }
}

pub struct ViewStateController {
    state: ViewState,
    last_error: Option<ControllerError>,
    validator: UrlValidator,
    provider: Arc<dyn AnalysisProvider>,
    settings: ControllerSettings,
    epoch: u64,
    episode: Option<LoadingEpisode>,
    tx: UnboundedSender<ControllerEvent>,
}

impl ViewStateController {
    /// Create a controller in `Home`, plus the receiving end of its event
    /// channel. Whoever drives the controller must pass every received event
    /// to [`handle`](Self::handle).
    pub fn new(
        provider: Arc<dyn AnalysisProvider>,
        settings: ControllerSettings,
    ) -> (Self, UnboundedReceiver<ControllerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: ViewState::Home,
            last_error: None,
            validator: UrlValidator::new(settings.match_mode),
            provider,
            settings,
            epoch: 0,
            episode: None,
            tx,
        };
        (controller, rx)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn last_error(&self) -> Option<&ControllerError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Whether a loading-screen step ticker is currently running.
    pub fn ticker_active(&self) -> bool {
        self.episode.is_some()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Validate `raw_input` and start an analysis.
    ///
    /// Must be called from within a tokio runtime. Ignored outside `Home`.
    pub fn submit(&mut self, raw_input: &str) -> Result<(), ValidationError> {
        if self.phase() != Phase::Home {
            tracing::debug!(phase = ?self.phase(), "submit ignored");
            return Ok(());
        }

        self.last_error = None;
        let url = match self.validator.validate(raw_input) {
            Ok(url) => url,
            Err(err) => {
                tracing::info!(input = raw_input, "rejected submission");
                self.last_error = Some(ControllerError::Validation(err.clone()));
                return Err(err);
            }
        };

        self.epoch += 1;
        let epoch = self.epoch;
        tracing::info!(
            epoch,
            video_id = url.video_id(),
            provider = self.provider.name(),
            "analysis started"
        );

        self.episode = Some(LoadingEpisode {
            epoch,
            acquisition: self.spawn_acquisition(epoch, url.clone()),
            ticker: self.spawn_ticker(epoch),
        });
        self.state = ViewState::Loading(LoadingState {
            url,
            step: 1,
            max_step: self.settings.max_step,
        });

        Ok(())
    }

    fn spawn_acquisition(&self, epoch: u64, url: ValidUrl) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.analyze(url).await;
            let _ = tx.send(ControllerEvent::AnalysisFinished { epoch, result });
        })
    }

    fn spawn_ticker(&self, epoch: u64) -> JoinHandle<()> {
        let period = self.settings.step_interval;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(ControllerEvent::StepTick { epoch }).is_err() {
                    break;
                }
            }
        })
    }

    /// Apply an event produced by this controller's loading tasks.
    pub fn handle(&mut self, event: ControllerEvent) {
        let current = self.episode.as_ref().map(|episode| episode.epoch);
        if current != Some(event.epoch()) {
            tracing::debug!(
                event_epoch = event.epoch(),
                current_epoch = ?current,
                "discarding stale controller event"
            );
            return;
        }

        match event {
            ControllerEvent::StepTick { .. } => self.advance_step(),
            ControllerEvent::AnalysisFinished { result, .. } => match result {
                Ok(report) => self.on_analysis_complete(report),
                Err(err) => self.on_analysis_failed(err),
            },
        }
    }

    fn advance_step(&mut self) {
        if let ViewState::Loading(loading) = &mut self.state
            && loading.step < loading.max_step
        {
            loading.step += 1;
            tracing::trace!(step = loading.step, "loading step advanced");
        }
    }

    /// Attach `report` and show it. Ignored outside `Loading`.
    pub fn on_analysis_complete(&mut self, report: AnalysisReport) {
        if self.phase() != Phase::Loading {
            tracing::debug!(phase = ?self.phase(), "analysis completion ignored");
            return;
        }

        self.leave_loading();
        tracing::info!(
            video_id = %report.basic_info.video_id,
            total_comments = report.total_comments(),
            "analysis complete"
        );
        self.state = ViewState::Report(Box::new(report));
    }

    /// Return to `Home` with a retryable error. Ignored outside `Loading`.
    pub fn on_analysis_failed(&mut self, err: AnalysisError) {
        if self.phase() != Phase::Loading {
            tracing::debug!(phase = ?self.phase(), "analysis failure ignored");
            return;
        }

        self.leave_loading();
        tracing::warn!(error = %err, "analysis failed");
        self.last_error = Some(ControllerError::Analysis(err));
        self.state = ViewState::Home;
    }

    /// Abandon the running analysis. Ignored outside `Loading`.
    pub fn cancel(&mut self) {
        if self.phase() != Phase::Loading {
            return;
        }

        self.leave_loading();
        tracing::info!("analysis cancelled");
        self.state = ViewState::Home;
    }

    /// Leave the report and release it. Ignored outside `Report`.
    pub fn back(&mut self) {
        if self.phase() != Phase::Report {
            return;
        }

        tracing::info!("returned to home");
        self.state = ViewState::Home;
    }

    fn leave_loading(&mut self) {
        if let Some(episode) = self.episode.take() {
            tracing::debug!(epoch = episode.epoch, "stopping loading tasks");
        }
    }
}

impl Drop for ViewStateController {
    fn drop(&mut self) {
        self.leave_loading();
    }
}
