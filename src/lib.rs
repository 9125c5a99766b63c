pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::FoodyClient;
pub use app::session::run_suite;
pub use config::{SettingsBuilder, SuiteSettings};
pub use crate::core::report::SuiteReport;
pub use utils::error::{FoodyError, Result};
