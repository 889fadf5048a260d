//! Formatted-call macros over the logger's leveled entry points.
//!
//! These wrap the `callf`/`callf_sync` entry points with `format_args!`, so
//! callers get `println!`-style formatting without building the argument
//! pack themselves. The `*_sync` forms return once the sink has accepted
//! the write; the others are fire-and-forget.
//!
//! # Examples
//!
//! ```
//! use logistry::get_logger;
//! use logistry::infof_sync;
//!
//! let logger = get_logger("app");
//!
//! let port = 8080;
//! infof_sync!(logger, "listening on port {}", port);
//! ```

/// Asynchronous formatted emission under an explicit severity name.
///
/// # Examples
///
/// ```
/// # let logger = logistry::get_logger("app");
/// use logistry::logf;
/// logf!(logger, "warn", "retry {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.callf($level, $crate::core::Fields::new(), format_args!($($arg)+))
    };
}

/// Synchronous formatted emission under an explicit severity name.
///
/// # Examples
///
/// ```
/// # let logger = logistry::get_logger("app");
/// use logistry::logf_sync;
/// logf_sync!(logger, "error", "request failed with status {}", 502);
/// ```
#[macro_export]
macro_rules! logf_sync {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.callf_sync($level, $crate::core::Fields::new(), format_args!($($arg)+))
    };
}

/// Asynchronous formatted emission at Debug.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, "debug", $($arg)+)
    };
}

/// Asynchronous formatted emission at Info.
///
/// # Examples
///
/// ```
/// # let logger = logistry::get_logger("app");
/// use logistry::infof;
/// infof!(logger, "processed {} items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, "info", $($arg)+)
    };
}

/// Asynchronous formatted emission at Warn.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, "warn", $($arg)+)
    };
}

/// Asynchronous formatted emission at Error.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, "error", $($arg)+)
    };
}

/// Asynchronous formatted emission at Fatal.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, "fatal", $($arg)+)
    };
}

/// Synchronous formatted emission at Debug.
#[macro_export]
macro_rules! debugf_sync {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_sync!($logger, "debug", $($arg)+)
    };
}

/// Synchronous formatted emission at Info.
///
/// # Examples
///
/// ```
/// # let logger = logistry::get_logger("app");
/// use logistry::infof_sync;
/// infof_sync!(logger, "startup complete in {}ms", 125);
/// ```
#[macro_export]
macro_rules! infof_sync {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_sync!($logger, "info", $($arg)+)
    };
}

/// Synchronous formatted emission at Warn.
#[macro_export]
macro_rules! warnf_sync {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_sync!($logger, "warn", $($arg)+)
    };
}

/// Synchronous formatted emission at Error.
#[macro_export]
macro_rules! errorf_sync {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_sync!($logger, "error", $($arg)+)
    };
}

/// Synchronous formatted emission at Fatal.
#[macro_export]
macro_rules! fatalf_sync {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_sync!($logger, "fatal", $($arg)+)
    };
}
