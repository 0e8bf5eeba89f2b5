//! Stderr logging for the `moodlog` binary.
//!
//! The level comes from `--log-level` or `MOODLOG_LOG` and accepts any
//! `flexi_logger` level string (`warn`, `debug`, `moodlog_core=trace`, ...).

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::info;

/// Starts the logger. Keep the handle alive for the whole run.
pub fn init_logging(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start module=cli status=ok platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

