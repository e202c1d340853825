//! Console logging facade over `tracing`.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for console diagnostics.
///
/// Diagnostics go to stderr so itemized command reports on stdout stay
/// clean. `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init_subscriber(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Thin logger handed to command handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether verbose output was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "quartermaster::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (shown with `--verbose`).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}
