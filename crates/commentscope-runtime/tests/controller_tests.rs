use std::sync::Arc;
use std::result::Result;
use std::time::Duration;

use commentscope_engine::{ValidUrl, ValidationError};
use commentscope_runtime::*;
use commentscope_types::AnalysisReport;
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

const VALID_URL: &str = "https://www.youtube.com/watch?v=abc123";

struct FailingProvider;

impl AnalysisProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn analyze(&self, _url: ValidUrl) -> BoxFuture<'static, Result<AnalysisReport, AnalysisError>> {
        async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Err(AnalysisError::Failed("upstream unavailable".to_string()))
        }
        .boxed()
    }
}

fn mock_controller() -> (ViewStateController, UnboundedReceiver<ControllerEvent>) {
    ViewStateController::new(
        Arc::new(MockAnalysisProvider::new(Duration::from_secs(6))),
        ControllerSettings::default(),
    )
}

fn custom_report() -> AnalysisReport {
    let mut report = AnalysisReport::sample();
    report.basic_info.title = "A different video".to_string();
    report
}

/// Feed events to the controller until it leaves `Loading`, returning the
/// largest step observed along the way.
async fn drain_until_settled(
    controller: &mut ViewStateController,
    events: &mut UnboundedReceiver<ControllerEvent>,
) -> u8 {
    let mut max_seen = 0;
    while controller.phase() == Phase::Loading {
        let event = events.recv().await.expect("controller keeps its sender");
        controller.handle(event);
        if let Some(loading) = controller.state().loading() {
            max_seen = max_seen.max(loading.step);
        }
    }
    max_seen
}

#[tokio::test(start_paused = true)]
async fn test_valid_submit_moves_to_loading() {
    let (mut controller, _events) = mock_controller();
    assert_eq!(controller.phase(), Phase::Home);

    controller.submit(VALID_URL).unwrap();

    assert_eq!(controller.phase(), Phase::Loading);
    let loading = controller.state().loading().unwrap();
    assert_eq!(loading.url.video_id(), "abc123");
    assert_eq!(loading.step, 1);
    assert_eq!(loading.max_step, 3);
    assert!(controller.state().report().is_none());
    assert!(controller.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_invalid_submit_stays_home_with_error() {
    let (mut controller, _events) = mock_controller();

    for input in ["", "not a url", "https://vimeo.com/123"] {
        assert_eq!(controller.submit(input), Err(ValidationError::InvalidFormat));
        assert_eq!(controller.phase(), Phase::Home);
        assert!(!controller.ticker_active());
        assert_eq!(
            controller.last_error().map(ToString::to_string),
            Some("Please enter a valid YouTube URL".to_string())
        );
    }

    controller.submit(VALID_URL).unwrap();
    assert!(controller.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_complete_attaches_exact_model_and_second_call_is_noop() {
    let (mut controller, _events) = mock_controller();
    controller.submit(VALID_URL).unwrap();

    let report = custom_report();
    controller.on_analysis_complete(report.clone());
    assert_eq!(controller.phase(), Phase::Report);
    assert_eq!(controller.state().report(), Some(&report));

    controller.on_analysis_complete(AnalysisReport::sample());
    assert_eq!(controller.phase(), Phase::Report);
    assert_eq!(controller.state().report(), Some(&report));
}

#[tokio::test(start_paused = true)]
async fn test_back_releases_model() {
    let (mut controller, _events) = mock_controller();
    controller.back();
    assert_eq!(controller.phase(), Phase::Home);

    controller.submit(VALID_URL).unwrap();
    controller.back();
    assert_eq!(controller.phase(), Phase::Loading);

    controller.on_analysis_complete(AnalysisReport::sample());
    controller.back();

    assert_eq!(controller.phase(), Phase::Home);
    assert!(controller.state().report().is_none());
    assert_eq!(controller.state(), &ViewState::Home);
}

#[tokio::test(start_paused = true)]
async fn test_timer_driven_completion_reaches_report() {
    let (mut controller, mut events) = mock_controller();
    let started = tokio::time::Instant::now();
    controller.submit(VALID_URL).unwrap();

    let max_step = drain_until_settled(&mut controller, &mut events).await;

    assert_eq!(controller.phase(), Phase::Report);
    assert_eq!(controller.state().report(), Some(&AnalysisReport::sample()));
    assert!(started.elapsed() >= Duration::from_secs(6));
    assert!(max_step <= 3);
    assert!(max_step >= 2);
    assert!(!controller.ticker_active());
}

#[tokio::test(start_paused = true)]
async fn test_step_counter_holds_at_maximum() {
    let provider = Arc::new(MockAnalysisProvider::new(Duration::from_secs(60)));
    let (mut controller, mut events) =
        ViewStateController::new(provider, ControllerSettings::default());
    controller.submit(VALID_URL).unwrap();

    for expected in [2, 3, 3, 3, 3] {
        let event = events.recv().await.unwrap();
        assert!(matches!(event, ControllerEvent::StepTick { .. }));
        controller.handle(event);
        assert_eq!(controller.state().loading().map(|l| l.step), Some(expected));
    }
}

#[tokio::test(start_paused = true)]
async fn test_exactly_one_ticker_per_loading_episode() {
    let (mut controller, _events) = mock_controller();
    assert!(!controller.ticker_active());

    controller.submit(VALID_URL).unwrap();
    assert!(controller.ticker_active());

    // A second submit while loading must not start another episode.
    controller.submit("https://youtu.be/other").unwrap();
    assert_eq!(
        controller.state().loading().map(|l| l.url.video_id().to_string()),
        Some("abc123".to_string())
    );

    controller.on_analysis_complete(AnalysisReport::sample());
    assert!(!controller.ticker_active());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_all_loading_tasks() {
    let (mut controller, mut events) = mock_controller();
    controller.submit(VALID_URL).unwrap();

    controller.cancel();
    assert_eq!(controller.phase(), Phase::Home);
    assert!(!controller.ticker_active());

    tokio::time::advance(Duration::from_secs(30)).await;
    tokio::task::yield_now().await;

    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.phase(), Phase::Home);
}

#[tokio::test(start_paused = true)]
async fn test_stale_events_never_touch_a_later_episode() {
    let (mut controller, mut events) = mock_controller();
    controller.submit(VALID_URL).unwrap();

    // Let the first episode queue a tick, then abandon it without draining.
    let first_tick = events.recv().await.unwrap();
    controller.cancel();

    controller.submit("https://youtu.be/second").unwrap();
    controller.handle(first_tick);
    assert_eq!(controller.state().loading().map(|l| l.step), Some(1));

    controller.handle(ControllerEvent::AnalysisFinished {
        epoch: 1,
        result: Ok(custom_report()),
    });
    assert_eq!(controller.phase(), Phase::Loading);

    drain_until_settled(&mut controller, &mut events).await;
    assert_eq!(controller.state().report(), Some(&AnalysisReport::sample()));
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_returns_home_with_retryable_error() {
    let (mut controller, mut events) =
        ViewStateController::new(Arc::new(FailingProvider), ControllerSettings::default());
    controller.submit(VALID_URL).unwrap();

    drain_until_settled(&mut controller, &mut events).await;

    assert_eq!(controller.phase(), Phase::Home);
    assert!(!controller.ticker_active());
    assert_eq!(
        controller.last_error(),
        Some(&ControllerError::Analysis(AnalysisError::Failed(
            "upstream unavailable".to_string()
        )))
    );

    // Retrying clears the error.
    controller.submit(VALID_URL).unwrap();
    assert_eq!(controller.phase(), Phase::Loading);
    assert!(controller.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_strict_mode_from_config() {
    let mut config = Config::default();
    config.validation.strict = true;

    let (mut controller, _events) = ViewStateController::new(
        Arc::new(MockAnalysisProvider::default()),
        ControllerSettings::from(&config),
    );

    assert!(controller.submit("https://youtu.be/abc trailing").is_err());
    assert!(controller.submit("https://youtu.be/abc").is_ok());
}
