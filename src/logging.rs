//! Diagnostic logging setup.
//!
//! Logs go to a daily file under the config directory so they never mix
//! with the interactive status line. `RWORKLOG_LOG` overrides the filter.

use crate::config::Config;
use std::env;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RWORKLOG_LOG";

fn filter_for(cfg: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(cfg: &Config) {
    let appender = tracing_appender::rolling::daily(Config::log_dir(), "rworklog.log");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(cfg))
        .with_ansi(false)
        .with_writer(appender)
        .try_init();
}

/// Test and scripted runs: warnings only, on stderr, unless the env asks
/// for more.
pub fn init_stderr() {
    let filter = match env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn")),
        Err(_) => EnvFilter::new("warn"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
