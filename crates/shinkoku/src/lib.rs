//! Command-line front end for the shinkoku tax engine
//!
//! Reads JSON or YAML inputs, applies the user's `config.yaml` defaults,
//! runs the `shinkoku_core` calculators and prints JSON results. Logs go to
//! `{data_dir}/shinkoku.log`.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use commands::{Command, InputArgs, emit, error_json, execute};
pub use config::ShinkokuConfig;
pub use error::CliError;
pub use logging::init_logging;
