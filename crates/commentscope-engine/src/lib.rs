//! Pure building blocks for the commentscope viewer.
//!
//! - [`validate`] checks that a submitted string looks like a video link
//!   and extracts the video id.
//! - [`projection`] turns an [`AnalysisReport`](commentscope_types::AnalysisReport)
//!   into chart-ready series.
//!
//! Nothing in this crate performs I/O or holds state between calls.

pub mod projection;
pub mod validate;

pub use projection::{
    CategoryExpansion, CategorySlice, SeriesPoint, to_category_distribution,
    to_cumulative_series, to_increment_series,
};
pub use validate::{MatchMode, UrlValidator, ValidUrl, ValidationError, validate};
