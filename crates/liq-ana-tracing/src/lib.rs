use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_flame::FlameLayer;
use tracing_subscriber::{fmt, prelude::*};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
}

#[derive(Debug, Clone)]
pub struct TraceConfig {
    pub prefix: String,
    pub dir: String,
    pub level: Level,
    pub console: bool,
    pub flame: bool,
}

impl TraceConfig {
    /// Builds a config from a textual level such as `"info"` or `"DEBUG"`.
    pub fn with_level_str(
        prefix: &str,
        dir: &str,
        level: &str,
        console: bool,
        flame: bool,
    ) -> Result<Self, TraceError> {
        let level = Level::from_str(level).map_err(|_| TraceError::InvalidLevel(level.into()))?;
        Ok(TraceConfig { prefix: prefix.into(), dir: dir.into(), level, console, flame })
    }
}

/// Installs the global subscriber. The returned guards flush the file writers on drop,
/// so callers keep them alive for the whole run.
///
/// A second call in the same process leaves the first subscriber in place.
pub fn init_tracing(config: TraceConfig) -> Vec<WorkerGuard> {
    let prefix = config.prefix;
    let dir = config.dir;
    let level = config.level;
    let console = config.console;
    let flame = config.flame;

    let mut guards = vec![];
    let (fmt_writer, fmt_guard) = tracing_appender::non_blocking(rolling::daily(&dir, &prefix));
    guards.push(fmt_guard);
    let layered = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(fmt_writer)
        .with_ansi(false)
        .finish();
    let result = if flame {
        let (folded_writer, folded_guard) =
            tracing_appender::non_blocking(rolling::daily(&dir, prefix.clone() + ".folded"));
        guards.push(folded_guard);
        if console {
            layered.with(fmt::Layer::default()).with(FlameLayer::new(folded_writer)).try_init()
        } else {
            layered.with(FlameLayer::new(folded_writer)).try_init()
        }
    } else if console {
        layered.with(fmt::Layer::default()).try_init()
    } else {
        layered.try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed, keep the existing one");
    }

    guards
}
