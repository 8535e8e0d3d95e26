//! # logbro
//!
//! A small leveled logger with process-wide configuration.
//!
//! ## Features
//!
//! - **Six levels**: trace, debug, info, warn, error, critical; `error` and
//!   `critical` go to the error sink, the rest to the standard sink
//! - **Printf-style messages**: `%s %d %i %f %j %o %O %%` placeholders
//! - **Structured records**: a leading map or error is merged into the record
//! - **Pretty, JSON or custom output**, chosen globally or per logger
//! - **Events**: listeners receive every record written at their level
//!
//! ## Example
//!
//! ```
//! use logbro::prelude::*;
//!
//! let out = MemorySink::new();
//! let logger = Logger::builder()
//!     .stdout(out.clone())
//!     .format(OutputFormat::Json)
//!     .build()
//!     .unwrap();
//!
//! logger.info((Fields::new().with_field("port", 8080), "listening on %s", "0.0.0.0"));
//! assert!(out.contents().contains("\"message\":\"listening on 0.0.0.0\""));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        logger, ErrorRecord, Fields, JsonLogger, ListenerId, LogArg, LogArgs, LogLevel, LogRecord,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat, Result, SharedConfig,
        Sink,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    logger, Clock, CustomFormat, EmitOutcome, ErrorRecord, EventListeners, Fields, FixedClock,
    JsonLogger, Listener, ListenerId, LogArg, LogArgs, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, OutputFormat, RecordBuilder, Result, SharedConfig, Sink,
    SystemClock, LEVELS,
};
pub use sinks::{ConsoleSink, ConsoleStream, FileSink, MemorySink, WriterSink};
