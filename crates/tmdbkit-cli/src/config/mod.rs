//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB client defaults such as
//! language, region, and request timeout.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig};
pub use paths::resolve_config_path;
