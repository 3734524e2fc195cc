use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{heading_style, muted_style};

const FEATURES: [(&str, &str); 4] = [
    ("Sentiment trends", "See how the conversation shifts over time"),
    ("Topic categories", "Comments grouped by what viewers talk about"),
    ("Quick insights", "A one-paragraph summary of the main topic"),
    ("Comment volume", "Cumulative and per-period comment counts"),
];

/// Landing screen: link input, validation error, feature overview.
pub struct HomeView<'a> {
    input: &'a str,
    error: Option<&'a str>,
}

impl<'a> HomeView<'a> {
    pub fn new(input: &'a str, error: Option<&'a str>) -> Self {
        Self { input, error }
    }
}

impl Widget for HomeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        Paragraph::new(Line::styled("YouTube Comment Analyzer", heading_style()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(vec![
            Line::from("Paste a video link to see what viewers are saying:"),
            Line::styled(
                "sentiment, topics and comment volume over time.",
                muted_style(),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

        let border_color = if self.error.is_some() {
            Color::Red
        } else {
            Color::Gray
        };
        let input_line = if self.input.is_empty() {
            Line::from(vec![
                Span::raw("▏"),
                Span::styled("https://www.youtube.com/watch?v=...", muted_style()),
            ])
        } else {
            Line::from(vec![Span::raw(self.input), Span::raw("▏")])
        };
        Paragraph::new(input_line)
            .block(
                Block::default()
                    .title(" Video URL ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            )
            .render(chunks[2], buf);

        if let Some(error) = self.error {
            Paragraph::new(Line::styled(error, Style::default().fg(Color::Red)))
                .render(chunks[3], buf);
        }

        let features: Vec<Line> = FEATURES
            .iter()
            .map(|(name, blurb)| {
                Line::from(vec![
                    Span::styled(format!("  • {:<18}", name), Style::default().fg(Color::Cyan)),
                    Span::styled(*blurb, muted_style()),
                ])
            })
            .collect();
        Paragraph::new(features).render(chunks[4], buf);
    }
}
