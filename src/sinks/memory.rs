//! In-memory sink
//!
//! Clones share one buffer, so a test can hand one clone to the logger and
//! inspect the output through another.

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MemorySink {
    name: String,
    chunks: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every chunk written so far, one per log call
    pub fn chunks(&self) -> Vec<String> {
        self.chunks.lock().clone()
    }

    /// Everything written so far, concatenated
    pub fn contents(&self) -> String {
        self.chunks.lock().concat()
    }

    /// Written text split into lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.lock().is_empty()
    }

    pub fn clear(&self) {
        self.chunks.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, chunk: &str) -> Result<()> {
        self.chunks.lock().push(chunk.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
