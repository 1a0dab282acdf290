//! Host function registration via Wasmtime linker.
//!
//! Registers the drawing imports and the diagnostics import with the
//! Wasmtime `Linker`. Each function:
//! 1. Extracts memory and HostState from the Caller
//! 2. Decodes any string span best-effort (never traps)
//! 3. Forwards the call to the injected surface or log sink
//!
//! None of the imports return a value, and none can fail from the guest's
//! point of view.

use masm_hostapi::{DrawingSurface, Span};
use wasmtime::{Caller, Linker, Memory};

use crate::error::BridgeError;
use crate::host_impl::HostState;
use crate::memory;

/// Get the guest's exported memory from a Caller.
fn get_memory<S>(caller: &mut Caller<'_, HostState<S>>) -> Option<Memory> {
    caller.get_export("memory").and_then(|e| e.into_memory())
}

/// Decode a guest string span, tracing any degradation.
fn read_span<S>(caller: &mut Caller<'_, HostState<S>>, import: &str, ptr: u32, len: u32) -> String {
    let mem = match get_memory(caller) {
        Some(m) => m,
        None => {
            tracing::warn!(import, "guest has no memory export; using empty string");
            return String::new();
        }
    };
    let decoded = memory::decode_span(mem.data(&*caller), Span::new(ptr, len));
    if !decoded.is_exact() {
        tracing::warn!(import, ptr, len, "degraded guest string: {:?}", decoded);
    }
    decoded.into_string()
}

/// Register all bridge functions with the linker under `module`.
pub fn register_host_functions<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    register_log(linker, module, "log")?;
    register_log(linker, module, "consoleDebug")?;
    register_set_fill_style(linker, module)?;
    register_set_stroke_style(linker, module)?;
    register_fill_rect(linker, module)?;
    register_fill_all(linker, module)?;
    register_draw_line(linker, module)?;
    register_resize_canvas(linker, module)?;
    Ok(())
}

// ── Diagnostics ──

fn register_log<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
    name: &'static str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        name,
        move |mut caller: Caller<'_, HostState<S>>, ptr: u32, len: u32| {
            caller.data_mut().log_calls += 1;
            if !caller.data().enable_guest_logs {
                return;
            }
            let message = read_span(&mut caller, name, ptr, len);
            caller.data_mut().add_log(&message);
        },
    )?;
    Ok(())
}

// ── Styles ──

fn register_set_fill_style<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        "setFillStyle",
        |mut caller: Caller<'_, HostState<S>>, ptr: u32, len: u32| {
            let style = read_span(&mut caller, "setFillStyle", ptr, len);
            caller.data_mut().surface.set_fill_style(&style);
        },
    )?;
    Ok(())
}

fn register_set_stroke_style<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        "setStrokeStyle",
        |mut caller: Caller<'_, HostState<S>>, ptr: u32, len: u32| {
            let style = read_span(&mut caller, "setStrokeStyle", ptr, len);
            caller.data_mut().surface.set_stroke_style(&style);
        },
    )?;
    Ok(())
}

// ── Shapes ──

fn register_fill_rect<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        "fillRect",
        |mut caller: Caller<'_, HostState<S>>, x: f64, y: f64, w: f64, h: f64| {
            caller.data_mut().surface.fill_rect(x, y, w, h);
        },
    )?;
    Ok(())
}

fn register_fill_all<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(module, "fillAll", |mut caller: Caller<'_, HostState<S>>| {
        caller.data_mut().surface.fill_all();
    })?;
    Ok(())
}

fn register_draw_line<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        "drawLine",
        |mut caller: Caller<'_, HostState<S>>, x1: f64, y1: f64, x2: f64, y2: f64| {
            caller.data_mut().surface.draw_line(x1, y1, x2, y2);
        },
    )?;
    Ok(())
}

// ── Surface ──

fn register_resize_canvas<S: DrawingSurface + 'static>(
    linker: &mut Linker<HostState<S>>,
    module: &str,
) -> Result<(), BridgeError> {
    linker.func_wrap(
        module,
        "resizeCanvas",
        |mut caller: Caller<'_, HostState<S>>, width: u32, height: u32| {
            tracing::trace!(width, height, "resizeCanvas");
            caller.data_mut().surface.resize(width, height);
        },
    )?;
    Ok(())
}
