//! Structured logging for hosts that embed the assembler.
//!
//! The library itself only emits `tracing` events. Binaries without a
//! subscriber of their own can call [`init_logging`] to print them to stderr.
//! Directives in `RUST_LOG` win; otherwise every target is filtered at the
//! configured [`LogLevel`].

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

use crate::config::{Configuration, LogLevel};

fn build_filter(level: LogLevel, directives: Option<&str>) -> EnvFilter {
    let fallback = Directive::from(LevelFilter::from_level(Level::from(level)));
    EnvFilter::builder()
        .with_default_directive(fallback)
        .parse_lossy(directives.unwrap_or_default())
}

/// Install a compact stderr `tracing` subscriber.
///
/// A second call, or a call after the host installed its own subscriber, is
/// a no-op.
pub fn init_logging(config: &Configuration) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(build_filter(config.log_level, directives.as_deref()))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("subscriber already installed, keeping it");
    }
}
