//! Basic logger usage example
//!
//! Demonstrates the default logger, printf-style arguments, merged fields,
//! and the process-wide level and format.
//!
//! Run with: cargo run --example basic_usage
//! Try:      LOGBRO_LEVEL=warn LOGBRO_FORMAT=json cargo run --example basic_usage

use logbro::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== logbro - Basic Usage Example ===\n");

    let log = logger();

    println!("1. Logging at different levels (error and critical go to stderr):");
    log.trace("This is a trace message");
    log.debug("This is a debug message");
    log.info("This is an info message");
    log.warn("This is a warning message");
    log.error("This is an error message");
    log.critical("This is a critical message");

    println!("\n2. Printf-style arguments:");
    log.info(("user %s has %d unread messages", "alice", 3));
    log.info(("payload: %j", json!({ "id": 7, "tags": ["a", "b"] })));
    log.info(("extra arguments", "are", "appended"));

    println!("\n3. A leading map is merged into the record:");
    log.json()
        .info((Fields::new().with_field("request_id", "r-42"), "handled in %dms", 12));

    println!("\n4. Raising the shared threshold:");
    Logger::set_shared_level("info");
    log.debug("Debug message (hidden)");
    log.info("Info message (visible)");

    println!("\n5. Switching the shared format:");
    Logger::set_shared_format("json")?;
    log.warn("now rendered as JSON");
    Logger::set_shared_format("pretty")?;

    println!("\n6. Errors are captured, never raised:");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml not found");
    log.error((LogArg::error(&err), "failed to start"));

    log.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
