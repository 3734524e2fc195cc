use std::path::{Path, PathBuf};

use anyhow::Result;
use commentscope_engine::CategoryExpansion;
use commentscope_runtime::{ViewState, ViewStateController};
use commentscope_types::AnalysisReport;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Renderer-owned UI state.
///
/// Everything the analysis produces lives in the controller; this only
/// tracks what the user is typing and where they are on the report.
pub struct TuiApp {
    input: String,
    selected: usize,
    expansion: CategoryExpansion,
    notice: Option<String>,
    export_dir: PathBuf,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            input: String::new(),
            selected: 0,
            expansion: CategoryExpansion::new(),
            notice: None,
            export_dir,
            should_quit: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn expansion(&self) -> &CategoryExpansion {
        &self.expansion
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, controller: &mut ViewStateController, key: KeyEvent) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match controller.state() {
            ViewState::Home => self.handle_home_key(controller, key),
            ViewState::Loading(_) => {
                if key.code == KeyCode::Esc {
                    controller.cancel();
                }
            }
            ViewState::Report(_) => self.handle_report_key(controller, key),
        }
    }

    fn handle_home_key(&mut self, controller: &mut ViewStateController, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if controller.submit(&self.input).is_ok() {
                    self.input.clear();
                    self.reset_report_view();
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_report_key(&mut self, controller: &mut ViewStateController, key: KeyEvent) {
        let Some(report) = controller.state().report() else {
            return;
        };
        let category_count = report.categories.len();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => {
                controller.back();
                self.reset_report_view();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < category_count {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(category) = report.categories.get(self.selected) {
                    self.expansion.toggle(&category.name);
                }
            }
            KeyCode::Char('e') => {
                self.notice = Some(match export_report(report, &self.export_dir) {
                    Ok(path) => format!("Exported report to {}", path.display()),
                    Err(err) => format!("Export failed: {}", err),
                });
            }
            _ => {}
        }
    }

    fn reset_report_view(&mut self) {
        self.selected = 0;
        self.expansion.collapse();
        self.notice = None;
    }
}

fn export_report(report: &AnalysisReport, dir: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{}-{}.json", report.basic_info.video_id, stamp));
    report.write_json(&path)?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentscope_runtime::{ControllerSettings, MockAnalysisProvider, Phase};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut TuiApp, controller: &mut ViewStateController, text: &str) {
        for c in text.chars() {
            app.handle_key(controller, key(KeyCode::Char(c)));
        }
    }

    fn controller() -> ViewStateController {
        let (controller, _events) = ViewStateController::new(
            Arc::new(MockAnalysisProvider::new(Duration::from_secs(6))),
            ControllerSettings::default(),
        );
        controller
    }

    fn in_report(app: &mut TuiApp, controller: &mut ViewStateController) {
        type_text(app, controller, "https://youtu.be/abc");
        app.handle_key(controller, key(KeyCode::Enter));
        controller.on_analysis_complete(AnalysisReport::sample());
        assert_eq!(controller.phase(), Phase::Report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_submit() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));

        type_text(&mut app, &mut controller, "https://youtu.be/abcX");
        app.handle_key(&mut controller, key(KeyCode::Backspace));
        assert_eq!(app.input(), "https://youtu.be/abc");

        app.handle_key(&mut controller, key(KeyCode::Enter));
        assert_eq!(controller.phase(), Phase::Loading);
        assert!(app.input().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_keeps_input() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));

        type_text(&mut app, &mut controller, "not a url");
        app.handle_key(&mut controller, key(KeyCode::Enter));

        assert_eq!(controller.phase(), Phase::Home);
        assert_eq!(app.input(), "not a url");
        assert!(controller.last_error().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_cancels_loading() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));

        type_text(&mut app, &mut controller, "https://youtu.be/abc");
        app.handle_key(&mut controller, key(KeyCode::Enter));
        app.handle_key(&mut controller, key(KeyCode::Esc));

        assert_eq!(controller.phase(), Phase::Home);
        assert!(!controller.ticker_active());
        assert!(!app.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_navigation_and_expansion() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));
        in_report(&mut app, &mut controller);

        app.handle_key(&mut controller, key(KeyCode::Up));
        assert_eq!(app.selected(), 0);

        app.handle_key(&mut controller, key(KeyCode::Down));
        app.handle_key(&mut controller, key(KeyCode::Char('j')));
        assert_eq!(app.selected(), 2);

        for _ in 0..10 {
            app.handle_key(&mut controller, key(KeyCode::Down));
        }
        assert_eq!(app.selected(), 5);

        app.handle_key(&mut controller, key(KeyCode::Enter));
        assert_eq!(app.expansion().expanded(), Some("Off-topic"));

        app.handle_key(&mut controller, key(KeyCode::Char(' ')));
        assert_eq!(app.expansion().expanded(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_returns_home_and_resets_view() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));
        in_report(&mut app, &mut controller);

        app.handle_key(&mut controller, key(KeyCode::Down));
        app.handle_key(&mut controller, key(KeyCode::Enter));
        app.handle_key(&mut controller, key(KeyCode::Char('b')));

        assert_eq!(controller.phase(), Phase::Home);
        assert!(controller.state().report().is_none());
        assert_eq!(app.selected(), 0);
        assert_eq!(app.expansion().expanded(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_writes_json() {
        let temp_dir = TempDir::new().unwrap();
        let mut controller = controller();
        let mut app = TuiApp::new(temp_dir.path().join("exports"));
        in_report(&mut app, &mut controller);

        app.handle_key(&mut controller, key(KeyCode::Char('e')));

        let notice = app.notice().unwrap();
        assert!(notice.starts_with("Exported report to"), "{notice}");

        let exported: Vec<_> = std::fs::read_dir(temp_dir.path().join("exports"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(exported.len(), 1);
        assert_eq!(
            AnalysisReport::read_json(&exported[0]).unwrap(),
            AnalysisReport::sample()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys() {
        let mut controller = controller();
        let mut app = TuiApp::new(PathBuf::from("unused"));

        // 'q' is just text on the home screen
        app.handle_key(&mut controller, key(KeyCode::Char('q')));
        assert!(!app.should_quit());

        app.handle_key(
            &mut controller,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }
}
