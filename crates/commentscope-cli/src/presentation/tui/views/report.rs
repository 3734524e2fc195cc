//! Report screen.
//!
//! Layout:
//! ```text
//! +-------------------------------------------------+
//! | title / channel / duration / total comments     |
//! | main topic summary                              |
//! +------------------------+------------------------+
//! | category distribution  | cumulative comments    |
//! +------------------------+------------------------+
//! | category list          | new comments per period|
//! +------------------------+------------------------+
//! ```

use commentscope_engine::{
    CategoryExpansion, to_category_distribution, to_cumulative_series, to_increment_series,
};
use commentscope_types::AnalysisReport;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        Widget, Wrap,
    },
};

use super::{ACCENT, heading_style, muted_style};
use crate::presentation::formatters::{format_compact, format_thousands, truncate};

pub struct ReportView<'a> {
    report: &'a AnalysisReport,
    selected: usize,
    expansion: &'a CategoryExpansion,
}

impl<'a> ReportView<'a> {
    pub fn new(
        report: &'a AnalysisReport,
        selected: usize,
        expansion: &'a CategoryExpansion,
    ) -> Self {
        Self {
            report,
            selected,
            expansion,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let info = &self.report.basic_info;
        let block = Block::default().borders(Borders::ALL).title(" Report ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::styled(info.title.as_str(), heading_style()),
            Line::from(vec![
                Span::raw(info.channel_name.as_str()),
                Span::styled(" · ", muted_style()),
                Span::raw(info.video_duration.as_str()),
                Span::styled(" · ", muted_style()),
                Span::raw(format!("{} ({})", info.published_date, info.published_ago)),
                Span::styled(" · ", muted_style()),
                Span::styled(
                    format!("{} comments", format_thousands(info.total_comments)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Main topic: ", muted_style()),
                Span::raw(info.main_topic_summary.as_str()),
            ]),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_distribution(&self, area: Rect, buf: &mut Buffer) {
        let label_width = usize::from(area.width.saturating_sub(2) / 3).max(8);
        let bars: Vec<Bar> = to_category_distribution(&self.report.categories)
            .into_iter()
            .map(|slice| {
                // BarChart values are integers; keep one decimal of precision.
                Bar::default()
                    .value((slice.value * 10.0).round() as u64)
                    .label(Line::from(truncate(&slice.label, label_width)))
                    .text_value(format!("{:.1}%", slice.value))
            })
            .collect();

        BarChart::default()
            .block(
                Block::default()
                    .title(" Comment categories ")
                    .borders(Borders::ALL),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(ACCENT))
            .value_style(Style::default().fg(Color::Black).bg(ACCENT))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }

    fn render_category_list(&self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width.saturating_sub(6));
        let mut lines = Vec::new();

        for (idx, category) in self.report.categories.iter().enumerate() {
            let expanded = self.expansion.is_expanded(&category.name);
            let marker = if expanded { "▾" } else { "▸" };
            let row_style = if idx == self.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };

            lines.push(Line::styled(
                format!(
                    "{} {:<24} {:>5.1}% {:>7}",
                    marker,
                    truncate(&category.name, 24),
                    category.percentage,
                    format_thousands(category.comment_count)
                ),
                row_style,
            ));

            if expanded {
                if !category.description.is_empty() {
                    lines.push(Line::from(format!(
                        "    {}",
                        truncate(&category.description, width)
                    )));
                }
                for sample in &category.sample_comments {
                    lines.push(Line::styled(
                        format!("    “{}”", truncate(sample, width.saturating_sub(2))),
                        muted_style().add_modifier(Modifier::ITALIC),
                    ));
                }
            }
        }

        // Keep the selected row on screen when an expansion pushes it down.
        let visible = usize::from(area.height.saturating_sub(2));
        let selected_line = self
            .report
            .categories
            .iter()
            .take(self.selected)
            .map(|c| 1 + self.expanded_len(c))
            .sum::<usize>();
        let scroll = (selected_line + 1).saturating_sub(visible);

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Categories (Enter to expand) ")
                    .borders(Borders::ALL),
            )
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }

    fn expanded_len(&self, category: &commentscope_types::Category) -> usize {
        if !self.expansion.is_expanded(&category.name) {
            return 0;
        }
        usize::from(!category.description.is_empty()) + category.sample_comments.len()
    }

    fn render_cumulative(&self, area: Rect, buf: &mut Buffer) {
        let series = to_cumulative_series(&self.report.temporal_data);
        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx as f64, point.y as f64))
            .collect();
        let max_y = series.iter().map(|p| p.y).max().unwrap_or(0).max(1);
        let max_x = series.len().saturating_sub(1).max(1) as f64;

        let x_labels = match (series.first(), series.last()) {
            (Some(first), Some(last)) => {
                vec![Span::raw(first.x.clone()), Span::raw(last.x.clone())]
            }
            _ => Vec::new(),
        };
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format_compact(max_y / 2)),
            Span::raw(format_compact(max_y)),
        ];

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(ACCENT))
            .data(&points);

        Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(" Cumulative comments ")
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .style(muted_style())
                    .bounds([0.0, max_x])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(muted_style())
                    .bounds([0.0, max_y as f64])
                    .labels(y_labels),
            )
            .render(area, buf);
    }

    fn render_increments(&self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = to_increment_series(&self.report.temporal_data)
            .into_iter()
            .map(|point| {
                Bar::default()
                    .value(point.y)
                    .label(Line::from(short_period(&point.x)))
                    .text_value(format_compact(point.y))
            })
            .collect();

        BarChart::default()
            .block(
                Block::default()
                    .title(" New comments per period ")
                    .borders(Borders::ALL),
            )
            .bar_width(4)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

/// "2022 Q2" -> "22Q2"; anything else is cut to fit a bar.
fn short_period(period: &str) -> String {
    let mut parts = period.split_whitespace();
    if let (Some(year), Some(quarter), None) = (parts.next(), parts.next(), parts.next())
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
    {
        return format!("{}{}", &year[2..], quarter);
    }
    period.chars().take(4).collect()
}

impl Widget for ReportView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([Constraint::Length(7), Constraint::Min(10)]).split(area);
        self.render_header(rows[0], buf);

        let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let category_rows = u16::try_from(self.report.categories.len()).unwrap_or(u16::MAX);
        let left = Layout::vertical([
            Constraint::Length(category_rows.saturating_add(2)),
            Constraint::Min(3),
        ])
        .split(columns[0]);
        self.render_distribution(left[0], buf);
        self.render_category_list(left[1], buf);

        let right = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);
        self.render_cumulative(right[0], buf);
        self.render_increments(right[1], buf);
    }
}
