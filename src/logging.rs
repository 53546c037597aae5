//! Logger initialization for binaries.
//!
//! The library only emits through the `log` facade; binaries call
//! [`init_logging`] once at startup to install `env_logger`.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "trueno_pixel=debug"). When unset, `RUST_LOG` is used, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter, overriding `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when no filter is given.
    pub default_level: log::LevelFilter,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Default configuration raised by `verbosity` steps (`-v`, `-vv`, ...).
    #[must_use]
    pub fn with_verbosity(verbosity: u8) -> Self {
        let default_level = match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        Self {
            default_level,
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder.write_style(config.write_style);
        // Another logger may already be installed by the host application
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
