//! Sink trait for byte-accepting output destinations

use super::error::Result;

/// A byte destination behind a wired logger: console, size-rotating file,
/// or day-rotating file.
///
/// Sinks take `&self` and must be safe for concurrent writers: asynchronous
/// emissions from the same logger are unordered and uncoordinated, so each
/// implementation owns its interior locking. A single `write` call must land
/// as one contiguous chunk in the destination.
pub trait Sink: Send + Sync {
    fn write(&self, bytes: &[u8]) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
