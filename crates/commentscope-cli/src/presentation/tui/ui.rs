use commentscope_runtime::{ViewState, ViewStateController};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::app::TuiApp;
use super::views::{HomeView, LoadingView, ReportView, StatusBarView};

/// Draw the screen for the controller's current phase.
///
/// Layout: [Screen | Status Bar]
pub fn draw(f: &mut Frame, controller: &ViewStateController, app: &TuiApp) {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(f.area());

    match controller.state() {
        ViewState::Home => {
            let error = controller.last_error().map(ToString::to_string);
            f.render_widget(HomeView::new(app.input(), error.as_deref()), chunks[0]);
        }
        ViewState::Loading(loading) => {
            f.render_widget(
                LoadingView::new(loading, controller.provider_name()),
                chunks[0],
            );
        }
        ViewState::Report(report) => {
            f.render_widget(
                ReportView::new(report, app.selected(), app.expansion()),
                chunks[0],
            );
        }
    }

    f.render_widget(
        StatusBarView::new(controller.phase(), app.notice()),
        chunks[1],
    );
}
