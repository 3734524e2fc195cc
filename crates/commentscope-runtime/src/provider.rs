use std::fmt;
use std::time::Duration;

use commentscope_engine::ValidUrl;
use commentscope_types::AnalysisReport;
use futures::FutureExt;
use futures::future::BoxFuture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The provider could not produce a report; the user may retry.
    Failed(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Failed(msg) => write!(f, "Analysis failed: {}. Please try again.", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Source of analysis reports for a validated video link.
///
/// The returned future must resolve exactly once. The controller runs it on
/// a spawned task and may abort it if the user leaves the loading screen.
pub trait AnalysisProvider: Send + Sync {
    fn name(&self) -> &str;

    fn analyze(&self, url: ValidUrl) -> BoxFuture<'static, Result<AnalysisReport, AnalysisError>>;
}

/// Stand-in provider: waits a fixed delay and returns the sample report.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    delay: Duration,
}

impl MockAnalysisProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new(Duration::from_secs(6))
    }
}

impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(&self, url: ValidUrl) -> BoxFuture<'static, Result<AnalysisReport, AnalysisError>> {
        let delay = self.delay;
        async move {
            tracing::debug!(
                video_id = url.video_id(),
                delay_ms = delay.as_millis() as u64,
                "mock analysis started"
            );
            tokio::time::sleep(delay).await;
            Ok(AnalysisReport::sample())
        }
        .boxed()
    }
}
