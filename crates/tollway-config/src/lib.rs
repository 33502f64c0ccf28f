//! Typed configuration for Tollway applications.
//!
//! - TOML and JSON configuration files or strings, merged key by key
//! - Environment variable overrides (`PREFIX__SECTION__KEY`) and `.env` files
//! - Strict parsing: unknown keys are errors
//!
//! # Configuration File Format
//!
//! ```toml
//! [app]
//! title = "Items API"
//! max_body_bytes = 1048576
//! validate_responses = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! file_line_info = false
//!
//! [metrics]
//! enabled = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tollway_config::ConfigLoader;
//!
//! # fn main() -> Result<(), tollway_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("tollway.toml")?
//!     .with_env_prefix("TOLLWAY")
//!     .load()?;
//!
//! println!("Serving {}", config.app.title);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::TollwayConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    AppConfig, LogFormat, LoggingConfig, MetricsSection, DEFAULT_MAX_BODY_BYTES, LOG_LEVELS,
};
