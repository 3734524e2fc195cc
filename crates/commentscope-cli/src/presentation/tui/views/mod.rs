//! Widget wrappers for each screen of the viewer.
//!
//! Views borrow whatever they draw and own nothing; all state lives in the
//! controller or in [`TuiApp`](super::app::TuiApp).

mod home;
mod loading;
mod report;
mod status_bar;

pub use home::HomeView;
pub use loading::LoadingView;
pub use report::ReportView;
pub use status_bar::StatusBarView;

use ratatui::style::{Color, Modifier, Style};

pub(crate) const ACCENT: Color = Color::Magenta;

pub(crate) fn heading_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub(crate) fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let width = buf.area.width as usize;
    buf.content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    buffer_lines(buf).join("\n")
}
