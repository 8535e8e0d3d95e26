//! Event listener example
//!
//! Every written record is emitted under its level name. Listeners receive
//! the record before rendering, so they can count, forward or inspect it.
//!
//! Run with: cargo run --example events

use logbro::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== logbro - Events Example ===\n");

    let logger = Logger::builder().format(OutputFormat::Pretty).build()?;

    let errors = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&errors);
    logger.on("error", move |record| {
        counter.fetch_add(1, Ordering::Relaxed);
        println!("  -> error listener saw: {:?}", record.message());
    });

    logger.once("warn", |record| {
        println!("  -> first warning at {}", record.timestamp());
    });

    let audit = logger.on("info", |record| {
        println!("  -> audit: {}", serde_json::to_string(record).unwrap_or_default());
    });

    logger.info("user logged in");
    logger.warn("disk 80% full");
    logger.warn("disk 90% full");
    logger.error(("request %s failed", "GET /health"));

    logger.off(audit);
    logger.info("not audited");

    println!(
        "\nerror records seen: {}, error listeners: {}",
        errors.load(Ordering::Relaxed),
        logger.listener_count("error")
    );
    println!("metrics: logged={}", logger.metrics().total_logged());

    Ok(())
}
