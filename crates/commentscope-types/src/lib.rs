pub mod error;
mod fixture;
pub mod report;

pub use error::{Error, Result};
pub use report::*;
