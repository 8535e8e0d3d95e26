//! Logging macros for variadic log calls.
//!
//! Each argument is converted with `LogArg::from`, so strings, numbers,
//! JSON values, `Fields` and `ErrorRecord`s can be mixed freely without
//! building a tuple or `Vec` by hand.
//!
//! # Examples
//!
//! ```
//! use logbro::prelude::*;
//! use logbro::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With printf-style arguments
//! let port = 8080;
//! info!(logger, "Server listening on port %d", port);
//!
//! // With a leading map merged into the record
//! info!(logger.json(), Fields::new().with_field("user", 42), "login");
//! ```

/// Log at a level given by name.
///
/// # Examples
///
/// ```
/// # use logbro::prelude::*;
/// # let logger = Logger::new();
/// use logbro::log;
/// log!(logger, "info", "Simple message");
/// log!(logger, "error", "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $crate::LogArgs(::std::vec![$($crate::LogArg::from($arg)),*]))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($method:ident, $logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.$method($crate::LogArgs(::std::vec![$($crate::LogArg::from($arg)),*]))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use logbro::prelude::*;
/// # let logger = Logger::new();
/// use logbro::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: %d", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(trace, $logger $(, $arg)*)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(debug, $logger $(, $arg)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(info, $logger $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logbro::prelude::*;
/// # let logger = Logger::new();
/// use logbro::warn;
/// warn!(logger, "Retry attempt %d of %d", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(warn, $logger $(, $arg)*)
    };
}

/// Log an error-level message. Written to the error sink.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(error, $logger $(, $arg)*)
    };
}

/// Log a critical-level message. Written to the error sink.
///
/// # Examples
///
/// ```
/// # use logbro::prelude::*;
/// # let logger = Logger::new();
/// use logbro::critical;
/// critical!(logger, "Unable to recover from error: %s", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!(critical, $logger $(, $arg)*)
    };
}
