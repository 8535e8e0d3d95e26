//! Core logger types and traits

pub mod error;
pub mod listeners;
pub mod log_arg;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod printf;
pub mod record_builder;
pub mod shared_config;
pub mod sink;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use listeners::{EmitOutcome, EventListeners, Listener, ListenerId};
pub use log_arg::{ErrorRecord, Fields, LogArg, LogArgs};
pub use log_level::{parse_threshold, rank_of, LogLevel, LEVELS, STDERR_SPLIT};
pub use log_record::LogRecord;
pub use logger::{logger, JsonLogger, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::{CustomFormat, OutputFormat};
pub use record_builder::RecordBuilder;
pub use shared_config::{SharedConfig, FORMAT_ENV, LEVEL_ENV};
pub use sink::Sink;
pub use timestamp::{Clock, FixedClock, SystemClock};
