pub mod config;
pub mod report;
pub mod tui;
pub mod validate;
