//! Chart-ready projections of an analysis report.
//!
//! Every function here is a pure passthrough that preserves input order.
//! Renderers call them on every frame; inputs are small enough that no
//! caching is needed.

use commentscope_types::{Category, TemporalPoint};

/// One slice of the category distribution chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    /// Share of all comments, in percent
    pub value: f64,
    pub count: u64,
}

/// One point of a line or bar series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub x: String,
    pub y: u64,
}

impl SeriesPoint {
    pub fn new(x: impl Into<String>, y: u64) -> Self {
        Self { x: x.into(), y }
    }
}

pub fn to_category_distribution(categories: &[Category]) -> Vec<CategorySlice> {
    categories
        .iter()
        .map(|category| CategorySlice {
            label: category.name.clone(),
            value: category.percentage,
            count: category.comment_count,
        })
        .collect()
}

pub fn to_cumulative_series(temporal: &[TemporalPoint]) -> Vec<SeriesPoint> {
    temporal
        .iter()
        .map(|point| SeriesPoint::new(point.period.clone(), point.cumulative_count))
        .collect()
}

pub fn to_increment_series(temporal: &[TemporalPoint]) -> Vec<SeriesPoint> {
    temporal
        .iter()
        .map(|point| SeriesPoint::new(point.period.clone(), point.new_count))
        .collect()
}

/// Which category card is currently expanded on the report screen.
///
/// This is view-local state; toggling it never touches the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryExpansion {
    expanded: Option<String>,
}

impl CategoryExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `name`, or collapse it if it is already the expanded one.
    pub fn toggle(&mut self, name: &str) {
        if self.is_expanded(name) {
            self.expanded = None;
        } else {
            self.expanded = Some(name.to_string());
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.as_deref() == Some(name)
    }
}
