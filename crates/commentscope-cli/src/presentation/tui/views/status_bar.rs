use commentscope_runtime::Phase;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::muted_style;

/// Bottom bar: current screen, the latest notice, and key hints.
pub struct StatusBarView<'a> {
    phase: Phase,
    notice: Option<&'a str>,
}

impl<'a> StatusBarView<'a> {
    pub fn new(phase: Phase, notice: Option<&'a str>) -> Self {
        Self { phase, notice }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.phase {
            Phase::Home => &[("[Enter]", "analyze "), ("[Esc]", "quit")],
            Phase::Loading => &[("[Esc]", "cancel "), ("[Ctrl-C]", "quit")],
            Phase::Report => &[
                ("[j/k]", "select "),
                ("[Enter]", "expand "),
                ("[e]", "export "),
                ("[b]", "back "),
                ("[q]", "quit"),
            ],
        }
    }
}

impl Widget for StatusBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        let screen = match self.phase {
            Phase::Home => "Home",
            Phase::Loading => "Loading",
            Phase::Report => "Report",
        };
        let mut status = vec![Span::styled(format!("{} ", screen), muted_style())];
        if let Some(notice) = self.notice {
            status.push(Span::raw("| "));
            status.push(Span::styled(notice, Style::default().fg(Color::Green)));
        }
        Paragraph::new(Line::from(status)).render(chunks[0], buf);

        let help: Vec<Span> = self
            .hints()
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(*key, Style::default().fg(Color::Yellow)),
                    Span::raw(*action),
                ]
            })
            .collect();
        Paragraph::new(Line::from(help)).render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::tui::views::buffer_lines;

    fn render(phase: Phase, notice: Option<&str>) -> String {
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        StatusBarView::new(phase, notice).render(area, &mut buf);
        buffer_lines(&buf)[1].clone()
    }

    #[test]
    fn test_hints_follow_phase() {
        assert!(render(Phase::Home, None).contains("[Enter]analyze"));
        assert!(render(Phase::Loading, None).contains("[Esc]cancel"));

        let report = render(Phase::Report, None);
        assert!(report.contains("[e]export"));
        assert!(report.contains("[b]back"));
    }

    #[test]
    fn test_notice_is_shown() {
        let line = render(Phase::Report, Some("Exported report to x.json"));
        assert!(line.contains("Report | Exported report to x.json"));
    }
}
