pub mod console;
pub mod formatters;
pub mod tui;
