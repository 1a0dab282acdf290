//! `masm-hostapi`: host capabilities and value types for the masm bridge.
//!
//! This crate defines everything the bridge hands to (or keeps beside) a
//! guest generator module, without depending on a wasm runtime:
//!
//! - `DrawingSurface` trait: the drawing imports a guest may call
//! - `LogSink` trait: destination for guest diagnostics
//! - `ControlPanel` trait: user-facing controls mirroring guest config
//! - `PixelCanvas`: software RGBA `DrawingSurface`
//! - `RecordingSurface`: `DrawingSurface` that records `DrawCommand`s
//! - `MemLog` / `MemPanel`: in-memory sink and panel
//! - `Field` / `FieldValue` / `Span` / `DrawCommand`: shared value types
//! - `HostError`: host-side error type

pub mod error;
pub mod types;
pub mod traits;
pub mod color;
pub mod canvas;
pub mod recording;
pub mod mem_log;
pub mod mem_panel;

// Re-export commonly used types at the crate root.
pub use error::HostError;
pub use types::{DrawCommand, Field, FieldKind, FieldValue, Span};
pub use traits::{ControlPanel, DrawingSurface, LogSink};
pub use color::Rgba;
pub use canvas::PixelCanvas;
pub use recording::RecordingSurface;
pub use mem_log::MemLog;
pub use mem_panel::{Control, ControlKind, MemPanel};
