//! tracing subscriber setup
//!
//! Text mode logs to stdout and the rolling file; JSON mode (prod) writes
//! structured lines to the file only. `RUST_LOG` replaces the configured
//! filter entirely.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{AppConfig, LogRotation};

/// Filter used when `RUST_LOG` is unset: this crate and the HTTP request
/// traces at `level`, every other dependency at `warn`.
pub fn default_directives(level: &str) -> String {
    format!("warn,storefront={level},tower_http={level}")
}

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    let (dir, file) = (&config.log_dir, &config.log_file);
    match config.rotation {
        LogRotation::Hourly => rolling::hourly(dir, file),
        LogRotation::Daily => rolling::daily(dir, file),
        LogRotation::Never => rolling::never(dir, file),
    }
}

/// Install the global subscriber. Keep the returned guard alive until
/// shutdown or buffered file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(config));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().compact().with_target(false);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_scope_the_crate() {
        let directives = default_directives("debug");
        assert_eq!(directives, "warn,storefront=debug,tower_http=debug");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
