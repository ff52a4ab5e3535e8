//! Diagnostic sink used by the HTTP layer.
//!
//! The client reports request/response details as structured key/value
//! events. Logging is best-effort: a sink has no way to fail the call.

use std::fmt::{self, Debug};

use tracing::Level;

/// Receives diagnostic events from the client.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Debug)]);
}

/// Forwards events to `tracing` under the `bitgo` target. Default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Debug)]) {
        let fields = Fields(fields);
        match level {
            Level::ERROR => tracing::error!(target: "bitgo", %fields, "{}", message),
            Level::WARN => tracing::warn!(target: "bitgo", %fields, "{}", message),
            Level::INFO => tracing::info!(target: "bitgo", %fields, "{}", message),
            Level::DEBUG => tracing::debug!(target: "bitgo", %fields, "{}", message),
            Level::TRACE => tracing::trace!(target: "bitgo", %fields, "{}", message),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _message: &str, _fields: &[(&str, &dyn Debug)]) {}
}

impl<F> Logger for F
where
    F: Fn(Level, &str, &[(&str, &dyn Debug)]) + Send + Sync,
{
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Debug)]) {
        self(level, message, fields)
    }
}

/// `key=value` rendering of event fields.
struct Fields<'a>(&'a [(&'a str, &'a dyn Debug)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:?}", key, value)?;
        }
        Ok(())
    }
}
