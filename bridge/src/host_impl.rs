//! Per-instance state held in the Wasmtime Store.
//!
//! `HostState` is the guest's whole world: the drawing surface and the log
//! sink it was granted at instantiation, plus the store limits. Import
//! functions in [`crate::linker`] reach it through `Caller::data_mut`.

use masm_hostapi::{DrawingSurface, LogSink};
use tracing::Level;
use wasmtime::{StoreLimits, StoreLimitsBuilder};

use crate::config::BridgeConfig;

/// Default log sink: forwards guest messages to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl LogSink for TracingSink {
    fn log(&mut self, message: &str) -> Result<(), masm_hostapi::HostError> {
        match self.level {
            Level::TRACE => tracing::trace!(target: "masm::guest", "{}", message),
            Level::DEBUG => tracing::debug!(target: "masm::guest", "{}", message),
            Level::INFO => tracing::info!(target: "masm::guest", "{}", message),
            Level::WARN => tracing::warn!(target: "masm::guest", "{}", message),
            _ => tracing::error!(target: "masm::guest", "{}", message),
        }
        Ok(())
    }
}

/// Per-instance mutable state held in the Wasmtime `Store`.
pub struct HostState<S> {
    /// Surface the drawing imports paint on.
    pub surface: S,
    /// Destination for `log` / `consoleDebug`.
    pub log_sink: Box<dyn LogSink>,
    /// Whether guest log calls are forwarded at all.
    pub enable_guest_logs: bool,
    /// Memory growth limits for the instance.
    pub limits: StoreLimits,
    /// Guest log calls received, forwarded or not.
    pub log_calls: u64,
}

impl<S: DrawingSurface> HostState<S> {
    pub fn new(surface: S, log_sink: Box<dyn LogSink>, config: &BridgeConfig) -> Self {
        Self {
            surface,
            log_sink,
            enable_guest_logs: config.enable_guest_logs,
            limits: StoreLimitsBuilder::new()
                .memory_size(config.max_memory_bytes())
                .instances(1)
                .build(),
            log_calls: 0,
        }
    }

    /// Forward a decoded guest message. Sink failures are swallowed.
    pub fn add_log(&mut self, message: &str) {
        if let Err(e) = self.log_sink.log(message) {
            tracing::debug!(error = %e, "guest log dropped");
        }
    }
}
