//! `masm-bridge`: Wasmtime host bridge for masm generator modules.
//!
//! This crate loads a generator module, grants it a fixed set of host
//! imports, and keeps its configuration in sync with user controls:
//!
//! - **Imports:** drawing primitives (`setFillStyle`, `setStrokeStyle`,
//!   `fillRect`, `fillAll`, `drawLine`, `resizeCanvas`) and diagnostics
//!   (`log`, `consoleDebug`), nothing else
//! - **Decoding:** guest strings are copied out of linear memory best effort;
//!   bad spans never trap the guest
//! - **Validation:** imports, entry point and field accessors are checked
//!   before instantiation
//! - **Sync:** the module owns every field value; controls only mirror it
//!
//! The primary entry points are [`Loader::load`] and [`Controller`].

pub mod error;
pub mod config;
pub mod memory;
pub mod host_impl;
pub mod validation;
pub mod linker;
pub mod runtime;
pub mod controller;

pub use error::BridgeError;
pub use config::BridgeConfig;
pub use host_impl::TracingSink;
pub use runtime::{Loader, ModuleHandle};
pub use controller::{time_seed, Controller, EventQueue, UiEvent};
