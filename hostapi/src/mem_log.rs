//! In-memory log sink for testing.
//!
//! `MemLog` is a cheap cloneable handle: the bridge owns one clone inside
//! its host state while a test keeps another to inspect what the guest
//! logged. Once `capacity` messages are stored further messages are
//! rejected with `HostError::LogFull`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::HostError;
use crate::traits::LogSink;

/// Default number of messages kept before the sink reports itself full.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct MemLog {
    messages: Arc<Mutex<Vec<String>>>,
    capacity: usize,
}

impl Default for MemLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            capacity,
        }
    }

    /// Snapshot of every stored message.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl LogSink for MemLog {
    fn log(&mut self, message: &str) -> Result<(), HostError> {
        let mut messages = self.messages.lock();
        if messages.len() >= self.capacity {
            return Err(HostError::LogFull(self.capacity));
        }
        messages.push(message.to_string());
        Ok(())
    }
}
