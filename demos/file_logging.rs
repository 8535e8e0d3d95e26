//! File logging example
//!
//! Demonstrates routing the standard and error streams of a logger into two
//! files, with a local JSON format that ignores the shared one.
//!
//! Run with: cargo run --example file_logging

use logbro::prelude::*;

fn main() -> Result<()> {
    println!("=== logbro - File Logging Example ===\n");

    let logger = Logger::builder()
        .stdout(FileSink::new("application.log")?)
        .stderr(FileSink::new("application.err.log")?)
        .format(OutputFormat::Json)
        .build()?;

    println!("1. Logging application startup:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info(("Configuration loaded from %s", "app.toml"));
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info((Fields::new().with_field("item", i), "Processing item %d/5", i));
        if i == 3 {
            logger.warn(("Item %d took longer than expected", i));
        }
    }
    logger.info("All operations completed");

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.err.log' for the output");

    Ok(())
}
