//! Logging setup for applications using Vellum.
//!
//! Vellum libraries only emit [`tracing`] events. Applications install a
//! subscriber once at startup, either explicitly with [`TracingConfig`] or
//! from the environment with [`TracingConfig::from_env`].
//!
//! # Example
//!
//! ```
//! use tracing::Level;
//! use vellum_core::{TracingConfig, TracingFormat};
//!
//! TracingConfig::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .with_env_filter("vellum_manager=trace,vellum_resources=debug")
//!     .init();
//!
//! tracing::info!("resources ready");
//! ```

mod logging;

pub use logging::{
    FILTER_ENV_VAR, FORMAT_ENV_VAR, ParseFormatError, TracingConfig, TracingFormat,
};
