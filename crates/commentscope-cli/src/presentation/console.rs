use std::fmt;

use commentscope_engine::{to_category_distribution, to_cumulative_series, to_increment_series};
use commentscope_types::AnalysisReport;
use owo_colors::OwoColorize;

use super::formatters::{format_thousands, percent_bar, wrap};

const BAR_WIDTH: usize = 30;

/// Render the report as plain text, optionally with ANSI colors.
pub fn render_report(report: &AnalysisReport, colored: bool) -> String {
    ReportText::new(report, colored).to_string()
}

/// Text form of a report for the console or a plain-text file
pub struct ReportText<'a> {
    report: &'a AnalysisReport,
    colored: bool,
}

impl<'a> ReportText<'a> {
    pub fn new(report: &'a AnalysisReport, colored: bool) -> Self {
        Self { report, colored }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let info = &self.report.basic_info;
        if self.colored {
            writeln!(f, "{}", info.title.bold())?;
        } else {
            writeln!(f, "{}", info.title)?;
        }
        writeln!(
            f,
            "{} · {} · published {} ({})",
            info.channel_name, info.video_duration, info.published_date, info.published_ago
        )?;
        writeln!(f, "Video ID: {}", info.video_id)?;
        writeln!(f, "Total comments: {}", format_thousands(info.total_comments))?;
        writeln!(f)?;

        writeln!(f, "{}", self.heading("Main topic"))?;
        for line in wrap(&info.main_topic_summary, 76) {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f)
    }

    fn render_categories(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.heading("Comment categories"))?;
        for slice in to_category_distribution(&self.report.categories) {
            let bar = percent_bar(slice.value, BAR_WIDTH);
            let bar = if self.colored {
                bar.magenta().to_string()
            } else {
                bar
            };
            writeln!(
                f,
                "  {:<24} {:>5.1}% {:>8}  {}",
                slice.label,
                slice.value,
                format_thousands(slice.count),
                bar
            )?;
        }
        writeln!(f)
    }

    fn render_volume(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.heading("Comment volume"))?;
        writeln!(f, "  {:<10} {:>12} {:>8}", "PERIOD", "CUMULATIVE", "NEW")?;
        let cumulative = to_cumulative_series(&self.report.temporal_data);
        let increments = to_increment_series(&self.report.temporal_data);
        for (total, new) in cumulative.iter().zip(&increments) {
            writeln!(
                f,
                "  {:<10} {:>12} {:>8}",
                total.x,
                format_thousands(total.y),
                format_thousands(new.y)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render_header(f)?;
        self.render_categories(f)?;
        self.render_volume(f)
    }
}
