//! Logger setup.
//!
//! Log records go to stderr so stdout stays clean for text/JSON results.

use flexi_logger::{Logger, LoggerHandle};

use crate::error::AppError;

/// Start the global logger from a spec string such as `warn` or `trr_fit=debug`.
///
/// Keep the returned handle alive for the duration of the run.
pub fn setup_logging(spec: &str) -> Result<LoggerHandle, AppError> {
    Logger::try_with_str(spec)
        .map_err(|e| AppError::invalid_input(format!("Invalid log level '{spec}': {e}")))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| AppError::new(1, format!("Logger initialization failed: {e}")))
}
