//! Host-side error types for the masm bridge.
//!
//! `HostError` is returned by the capability traits and the value parsers.
//! None of these errors are ever surfaced to the guest: sink failures are
//! swallowed and bad values are reported to the host caller.

/// Host-side error type returned by capability implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The log sink has reached its capacity and dropped the message.
    #[error("log sink full ({0} messages)")]
    LogFull(usize),

    /// A control or CLI value could not be interpreted for its field.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl HostError {
    /// Create an invalid-value error.
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }
}
