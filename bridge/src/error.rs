//! Bridge error types.

use masm_hostapi::{Field, HostError};

/// Top-level error type for the bridge crate.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Wasmtime engine, compilation, linking, or instantiation error.
    #[error("wasmtime error: {0}")]
    Wasmtime(#[from] anyhow::Error),

    /// Module validation failed (bad imports, mismatched signatures, etc.).
    #[error("validation error: {0}")]
    Validation(String),

    /// A required export is missing from the module.
    #[error("missing required export: {0}")]
    MissingExport(String),

    /// The module does not export accessors for this field.
    #[error("module does not export field '{0}'")]
    FieldNotExported(Field),

    /// No control exists for this field yet.
    #[error("no control for field '{0}'")]
    ControlMissing(Field),

    /// WASM guest trapped.
    #[error("guest trapped: {0}")]
    GuestTrapped(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Host capability error.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}
