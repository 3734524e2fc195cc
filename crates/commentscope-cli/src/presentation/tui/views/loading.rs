use commentscope_runtime::LoadingState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use super::{ACCENT, heading_style, muted_style};

const STEP_LABELS: [&str; 3] = [
    "Fetching comments",
    "Analyzing sentiment and topics",
    "Generating report",
];

fn step_label(step: u8) -> &'static str {
    STEP_LABELS
        .get(usize::from(step.saturating_sub(1)))
        .copied()
        .unwrap_or("Working")
}

/// Progress screen shown while an analysis is running.
pub struct LoadingView<'a> {
    loading: &'a LoadingState,
    provider: &'a str,
}

impl<'a> LoadingView<'a> {
    pub fn new(loading: &'a LoadingState, provider: &'a str) -> Self {
        Self { loading, provider }
    }
}

impl Widget for LoadingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let max_step = self.loading.max_step.max(1);
        let step = self.loading.step.min(max_step);

        let block = Block::default()
            .title(" Analyzing ")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(u16::from(max_step) + 1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(vec![
            Line::styled("Analyzing comments...", heading_style()),
            Line::from(vec![
                Span::styled("Video ", muted_style()),
                Span::raw(self.loading.url.video_id()),
                Span::styled(format!("  via {}", self.provider), muted_style()),
            ]),
        ])
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let steps: Vec<Line> = (1..=max_step)
            .map(|n| {
                let label = step_label(n);
                if n < step {
                    Line::from(vec![
                        Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                        Span::styled(label, muted_style()),
                    ])
                } else if n == step {
                    Line::from(vec![
                        Span::styled("  ▶ ", Style::default().fg(ACCENT)),
                        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                    ])
                } else {
                    Line::from(vec![Span::styled(format!("  · {}", label), muted_style())])
                }
            })
            .collect();
        Paragraph::new(steps).render(chunks[1], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT))
            .ratio(f64::from(step) / f64::from(max_step))
            .label(format!("Step {} of {}", step, max_step))
            .render(chunks[2], buf);

        Paragraph::new(Line::styled("Esc to cancel", muted_style()))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}
