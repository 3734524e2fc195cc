use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Allowed drift of the category percentage sum away from 100.
pub const PERCENTAGE_SUM_TOLERANCE: f64 = 1.0;

/// Video metadata shown in the report header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    pub total_comments: u64,
    /// Formatted duration, e.g. "24:35"
    pub video_duration: String,
    pub published_date: NaiveDate,
    pub published_ago: String,
    pub main_topic_summary: String,
}

/// One period of the comment-volume time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalPoint {
    pub period: String,
    pub cumulative_count: u64,
    pub new_count: u64,
}

impl TemporalPoint {
    pub fn new(period: impl Into<String>, cumulative_count: u64, new_count: u64) -> Self {
        Self {
            period: period.into(),
            cumulative_count,
            new_count,
        }
    }
}

/// A bucket of comments sharing a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub percentage: f64,
    pub comment_count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_comments: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, percentage: f64, comment_count: u64) -> Self {
        Self {
            name: name.into(),
            percentage,
            comment_count,
            description: String::new(),
            sample_comments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_comments = samples.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of a (mock) comment analysis.
///
/// A report is immutable once produced. [`AnalysisReport::check_invariants`]
/// verifies the relationships between its sections:
/// - each cumulative count is the previous cumulative plus the period's new count
/// - the last cumulative count equals `basic_info.total_comments`
/// - category percentages are within `[0, 100]` and sum to roughly 100
/// - category comment counts sum to roughly the total
/// - category names are unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub basic_info: BasicInfo,
    pub temporal_data: Vec<TemporalPoint>,
    pub categories: Vec<Category>,
}

impl AnalysisReport {
    /// The canned report every mock analysis returns.
    pub fn sample() -> Self {
        crate::fixture::sample_report()
    }

    pub fn total_comments(&self) -> u64 {
        self.basic_info.total_comments
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn check_invariants(&self) -> std::result::Result<(), ReportError> {
        self.check_temporal()?;
        self.check_categories()
    }

    fn check_temporal(&self) -> std::result::Result<(), ReportError> {
        for (index, pair) in self.temporal_data.windows(2).enumerate() {
            let expected = pair[0]
                .cumulative_count
                .checked_add(pair[1].new_count)
                .ok_or(ReportError::CountOverflow("temporal cumulative count"))?;
            if pair[1].cumulative_count != expected {
                return Err(ReportError::TemporalMismatch {
                    index: index + 1,
                    expected,
                    actual: pair[1].cumulative_count,
                });
            }
        }

        if let Some(last) = self.temporal_data.last()
            && last.cumulative_count != self.basic_info.total_comments
        {
            return Err(ReportError::TotalMismatch {
                total_comments: self.basic_info.total_comments,
                last_cumulative: last.cumulative_count,
            });
        }

        Ok(())
    }

    fn check_categories(&self) -> std::result::Result<(), ReportError> {
        if self.categories.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ReportError::DuplicateCategory(category.name.clone()));
            }
            if !(0.0..=100.0).contains(&category.percentage) {
                return Err(ReportError::PercentageRange {
                    name: category.name.clone(),
                    percentage: category.percentage,
                });
            }
        }

        let percentage_sum: f64 = self.categories.iter().map(|c| c.percentage).sum();
        if (percentage_sum - 100.0).abs() > PERCENTAGE_SUM_TOLERANCE {
            return Err(ReportError::PercentageSum(percentage_sum));
        }

        let count_sum = self
            .categories
            .iter()
            .try_fold(0u64, |acc, c| acc.checked_add(c.comment_count))
            .ok_or(ReportError::CountOverflow("category comment counts"))?;
        let total = self.basic_info.total_comments;
        let tolerance = (total / 100).max(1);
        if count_sum.abs_diff(total) > tolerance {
            return Err(ReportError::CommentCountSum {
                total_comments: total,
                category_sum: count_sum,
            });
        }

        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Read a report back and reject it if any invariant is broken.
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report = Self::from_json(&content)?;
        report.check_invariants()?;
        Ok(report)
    }
}

/// A broken relationship inside an [`AnalysisReport`]
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    TemporalMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },
    TotalMismatch {
        total_comments: u64,
        last_cumulative: u64,
    },
    PercentageRange {
        name: String,
        percentage: f64,
    },
    PercentageSum(f64),
    CommentCountSum {
        total_comments: u64,
        category_sum: u64,
    },
    DuplicateCategory(String),
    /// A sum of counts does not fit in a `u64`
    CountOverflow(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::TemporalMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "temporal point {} has cumulative count {} (expected {})",
                index, actual, expected
            ),
            ReportError::TotalMismatch {
                total_comments,
                last_cumulative,
            } => write!(
                f,
                "last cumulative count {} does not match total comments {}",
                last_cumulative, total_comments
            ),
            ReportError::PercentageRange { name, percentage } => write!(
                f,
                "category '{}' has percentage {} outside [0, 100]",
                name, percentage
            ),
            ReportError::PercentageSum(sum) => {
                write!(f, "category percentages sum to {:.2}, expected 100", sum)
            }
            ReportError::CommentCountSum {
                total_comments,
                category_sum,
            } => write!(
                f,
                "category comment counts sum to {}, expected about {}",
                category_sum, total_comments
            ),
            ReportError::DuplicateCategory(name) => {
                write!(f, "category '{}' appears more than once", name)
            }
            ReportError::CountOverflow(what) => write!(f, "{} overflows", what),
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_period_report() -> AnalysisReport {
        let mut report = AnalysisReport::sample();
        report.basic_info.total_comments = 10;
        report.temporal_data = vec![TemporalPoint::new("Q1", 6, 6), TemporalPoint::new("Q2", 10, 4)];
        report.categories = vec![Category::new("A", 60.0, 6), Category::new("B", 40.0, 4)];
        report
    }

    #[test]
    fn test_two_period_report_is_consistent() {
        assert_eq!(two_period_report().check_invariants(), Ok(()));
    }

    #[test]
    fn test_broken_cumulative_chain() {
        let mut report = two_period_report();
        report.temporal_data[1].new_count = 5;

        assert_eq!(
            report.check_invariants(),
            Err(ReportError::TemporalMismatch {
                index: 1,
                expected: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn test_last_cumulative_must_match_total() {
        let mut report = two_period_report();
        report.basic_info.total_comments = 12;
        report.categories = vec![Category::new("A", 60.0, 7), Category::new("B", 40.0, 5)];

        assert!(matches!(
            report.check_invariants(),
            Err(ReportError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_percentage_rounding_is_tolerated() {
        let mut report = two_period_report();
        report.categories = vec![Category::new("A", 60.4, 6), Category::new("B", 40.3, 4)];
        assert!(report.check_invariants().is_ok());

        report.categories[1].percentage = 42.0;
        assert!(matches!(
            report.check_invariants(),
            Err(ReportError::PercentageSum(_))
        ));
    }

    #[test]
    fn test_duplicate_category_names() {
        let mut report = two_period_report();
        report.categories = vec![Category::new("A", 50.0, 5), Category::new("A", 50.0, 5)];

        assert_eq!(
            report.check_invariants(),
            Err(ReportError::DuplicateCategory("A".to_string()))
        );
    }

    #[test]
    fn test_percentage_out_of_range() {
        let mut report = two_period_report();
        report.categories = vec![Category::new("A", 120.0, 6), Category::new("B", -20.0, 4)];

        assert!(matches!(
            report.check_invariants(),
            Err(ReportError::PercentageRange { .. })
        ));
    }

    #[test]
    fn test_comment_count_sum_off_by_more_than_tolerance() {
        let mut report = two_period_report();
        report.categories = vec![Category::new("A", 60.0, 6), Category::new("B", 40.0, 7)];

        assert_eq!(
            report.check_invariants(),
            Err(ReportError::CommentCountSum {
                total_comments: 10,
                category_sum: 13
            })
        );
    }

    #[test]
    fn test_huge_temporal_counts_are_rejected() {
        let mut report = two_period_report();
        report.temporal_data = vec![
            TemporalPoint::new("Q1", u64::MAX, u64::MAX),
            TemporalPoint::new("Q2", 5, 5),
        ];

        assert_eq!(
            report.check_invariants(),
            Err(ReportError::CountOverflow("temporal cumulative count"))
        );
    }

    #[test]
    fn test_huge_category_counts_are_rejected() {
        let mut report = two_period_report();
        report.categories = vec![
            Category::new("A", 60.0, u64::MAX),
            Category::new("B", 40.0, 5),
        ];

        assert_eq!(
            report.check_invariants(),
            Err(ReportError::CountOverflow("category comment counts"))
        );
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = two_period_report().to_json_pretty().unwrap();
        assert!(json.contains("\"basicInfo\""));
        assert!(json.contains("\"cumulativeCount\""));
        assert!(json.contains("\"commentCount\""));
        assert!(json.contains("\"publishedDate\": \"2022-03-15\""));
    }
}
