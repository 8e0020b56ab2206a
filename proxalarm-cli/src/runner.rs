//! Shared setup for commands that touch alarm state.
//!
//! Loads configuration, installs logging, creates the tokio runtime and
//! starts the [`AlarmApp`] against the console notification sink.

use std::future::Future;
use std::sync::Arc;

use proxalarm::app::AlarmApp;
use proxalarm::config::ConfigFile;
use proxalarm::logging::{init_logging, LoggingGuard};
use tokio::runtime::Runtime;

use crate::error::CliError;
use crate::notifier::ConsoleNotificationSink;

/// Per-invocation context.
pub struct CliRunner {
    app: AlarmApp,
    runtime: Runtime,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Load config, start logging and the application.
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        // Logging must come before the runtime spawns threads
        let logging = init_logging(&config.logging_config().with_stderr(verbose))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))?;

        let sink = Arc::new(ConsoleNotificationSink::new());
        let app = runtime.block_on(AlarmApp::start(config, sink))?;

        Ok(Self {
            app,
            runtime,
            _logging: logging,
        })
    }

    /// Log the command being run.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            version = proxalarm::VERSION,
            command,
            storage = %self.app.config().storage.path.display(),
            "proxalarm starting"
        );
    }

    /// The started application.
    pub fn app(&self) -> &AlarmApp {
        &self.app
    }

    /// Loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        self.app.config()
    }

    /// Run a future to completion on the runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
