//! Caller-site resolution for log records
//!
//! When a logger is configured with `include_caller`, every emission is
//! annotated with the `file:line` of the originating call site under the
//! fixed key [`CALLER_FIELD`]. The call site is captured at the public entry
//! points with `#[track_caller]`, which already skips frames internal to
//! this crate; the resolver's skip set additionally rejects locations inside
//! the facility's own sources, which can appear when an emission enters
//! through an internal adapter rather than a user call. A rejected or
//! missing location is recorded as the [`UNKNOWN_CALLER`] sentinel rather
//! than dropped.

use super::fields::Fields;
use std::panic::Location;

/// Field key under which the caller location is recorded.
pub const CALLER_FIELD: &str = "file";

/// Sentinel recorded when no external call site can be determined.
pub const UNKNOWN_CALLER: &str = "unknown";

/// Source-path suffixes belonging to the logging facility itself.
pub(crate) const INTERNAL_SOURCES: &[&str] = &[
    "core/logger.rs",
    "core/engine.rs",
    "core/dispatch.rs",
    "appenders/mod.rs",
];

/// Resolves a captured call-site location to a `file:line` string,
/// parameterized by the set of internal source suffixes to reject.
#[derive(Debug, Clone, Copy)]
pub struct CallerResolver {
    skip: &'static [&'static str],
}

impl CallerResolver {
    pub const fn new(skip: &'static [&'static str]) -> Self {
        Self { skip }
    }

    /// Format the location as `file:line`, or the sentinel when the location
    /// falls inside one of the skipped internal sources.
    pub fn resolve(&self, location: &'static Location<'static>) -> String {
        let file = location.file();
        if self.skip.iter().any(|suffix| file.ends_with(suffix)) {
            UNKNOWN_CALLER.to_string()
        } else {
            format!("{}:{}", file, location.line())
        }
    }

    /// Record the caller under [`CALLER_FIELD`] when `include` is set;
    /// otherwise leave the field map untouched.
    pub fn annotate(
        &self,
        fields: &mut Fields,
        include: bool,
        location: &'static Location<'static>,
    ) {
        if !include {
            return;
        }
        fields.insert(CALLER_FIELD, self.resolve(location));
    }
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new(INTERNAL_SOURCES)
    }
}
