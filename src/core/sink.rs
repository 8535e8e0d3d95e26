//! Sink trait for log output destinations

use super::error::Result;

/// Write-only destination for rendered log text.
///
/// The logger writes fire-and-forget: a failed write is counted and reported
/// but never surfaces to the caller of a log method.
pub trait Sink: Send {
    fn write(&mut self, chunk: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether the sink accepts writes; checked once at logger construction.
    fn is_writable(&self) -> bool {
        true
    }
}
