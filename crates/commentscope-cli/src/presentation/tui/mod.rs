//! Interactive report viewer.
//!
//! The event loop multiplexes three sources with `tokio::select!`:
//! controller events from the loading tasks, terminal input, and a redraw
//! tick. The controller owns the view state; [`TuiApp`] owns the input
//! buffer and report navigation.

mod app;
mod ui;
mod views;

pub use app::TuiApp;

use std::io;
use std::time::Duration;

use anyhow::Result;
use commentscope_runtime::{ControllerEvent, ViewStateController};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Take over the terminal and run until the user quits.
pub async fn run(
    controller: ViewStateController,
    events: UnboundedReceiver<ControllerEvent>,
    app: TuiApp,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    install_panic_hook();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, controller, events, app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Restore the terminal before the default hook prints the panic.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut controller: ViewStateController,
    mut events: UnboundedReceiver<ControllerEvent>,
    mut app: TuiApp,
) -> Result<()> {
    let mut input = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, &controller, &app))?;

        tokio::select! {
            Some(event) = events.recv() => controller.handle(event),
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.handle_key(&mut controller, key),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            _ = redraw.tick() => {}
        }
    }

    tracing::debug!(phase = ?controller.phase(), "viewer closed");
    Ok(())
}
