pub mod config;
pub mod controller;
pub mod error;
pub mod ops;
pub mod provider;

pub use config::{
    AnalysisConfig, Config, ExportConfig, LoadingConfig, LogConfig, ValidationConfig,
    resolve_config_path, resolve_data_dir,
};
pub use controller::{
    ControllerError, ControllerEvent, ControllerSettings, LoadingState, Phase, ViewState,
    ViewStateController,
};
pub use error::{Error, Result};
pub use ops::run_to_report;
pub use provider::{AnalysisError, AnalysisProvider, MockAnalysisProvider};
