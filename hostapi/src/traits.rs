//! Capability traits handed to a guest module at instantiation.
//!
//! The guest never reaches host globals. Everything it can do is one of the
//! methods below, bound to a wasm import by the bridge's linker:
//!
//! - [`DrawingSurface`]: `setFillStyle`, `setStrokeStyle`, `fillRect`,
//!   `fillAll`, `drawLine`, `resizeCanvas`
//! - [`LogSink`]: `log` / `consoleDebug`
//!
//! [`ControlPanel`] is the host's side of the UI and is never exposed to
//! the guest.

use crate::error::HostError;
use crate::types::{Field, FieldValue};

/// A 2D drawing surface the guest paints on.
///
/// Implementations must accept any numeric arguments; out-of-surface
/// coordinates are clipped, never rejected.
pub trait DrawingSurface: Send {
    /// Set the color used by `fill_rect` and `fill_all`.
    fn set_fill_style(&mut self, style: &str);

    /// Set the color used by `draw_line`.
    fn set_stroke_style(&mut self, style: &str);

    /// Paint an axis-aligned rectangle with the current fill style.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Paint the whole surface with the current fill style.
    ///
    /// Uses the size at call time, so a preceding `resize` is honored.
    fn fill_all(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.fill_rect(0.0, 0.0, w, h);
    }

    /// Stroke one segment with the current stroke style and a fixed width.
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Change the pixel dimensions. Clears everything drawn so far.
    fn resize(&mut self, width: u32, height: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;
}

/// Destination for guest diagnostics.
///
/// Errors are reported to the caller but the bridge discards them: a failing
/// sink must never disturb the guest.
pub trait LogSink: Send {
    fn log(&mut self, message: &str) -> Result<(), HostError>;
}

/// The user-facing controls, one per exported field.
///
/// Displayed values are only a copy; the guest module is the authority.
pub trait ControlPanel {
    /// Show `value` in the control for `field`, creating it if needed.
    fn display(&mut self, field: Field, value: FieldValue);

    /// The value currently in the control for `field`, if it exists.
    fn value(&self, field: Field) -> Option<FieldValue>;

    /// Apply a user edit to the control for `field`.
    fn input(&mut self, field: Field, value: FieldValue);
}
