//! Shared test helpers for integration tests.
//!
//! Provides WAT generator fixtures and loader shortcuts used across all
//! integration test files. Wasmtime compiles WAT text directly, so no
//! prebuilt artifacts are needed.

#![allow(dead_code)]

use masm_bridge::{BridgeConfig, Controller, Loader, ModuleHandle};
use masm_hostapi::{DrawCommand, DrawingSurface, MemLog, MemPanel, PixelCanvas, RecordingSurface};

// ── Fixtures ──

/// A small maze-style generator exporting every configuration field.
///
/// `generate` resizes the canvas to `width*scale × height*scale`, paints it
/// white, optionally fills an inset blue rectangle (`fill`), optionally
/// strokes a black top wall (`walls`), and logs "generated".
pub const MAZE_GUEST: &str = r#"(module
    (import "env" "log" (func $log (param i32 i32)))
    (import "env" "setFillStyle" (func $fill_style (param i32 i32)))
    (import "env" "setStrokeStyle" (func $stroke_style (param i32 i32)))
    (import "env" "fillRect" (func $fill_rect (param f64 f64 f64 f64)))
    (import "env" "fillAll" (func $fill_all))
    (import "env" "drawLine" (func $draw_line (param f64 f64 f64 f64)))
    (import "env" "resizeCanvas" (func $resize (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "white")
    (data (i32.const 8) "black")
    (data (i32.const 16) "blue")
    (data (i32.const 24) "generated")

    (global $seed (mut i32) (i32.const 0))
    (global $width (mut i32) (i32.const 10))
    (global $height (mut i32) (i32.const 8))
    (global $scale (mut i32) (i32.const 4))
    (global $walls (mut i32) (i32.const 1))
    (global $braid (mut i32) (i32.const 0))
    (global $inset (mut i32) (i32.const 1))
    (global $fill (mut i32) (i32.const 0))

    (func (export "getSeed") (result i32) global.get $seed)
    (func (export "setSeed") (param i32) local.get 0 global.set $seed)
    (func (export "getWidth") (result i32) global.get $width)
    (func (export "setWidth") (param i32) local.get 0 global.set $width)
    (func (export "getHeight") (result i32) global.get $height)
    (func (export "setHeight") (param i32) local.get 0 global.set $height)
    (func (export "getScale") (result i32) global.get $scale)
    (func (export "setScale") (param i32) local.get 0 global.set $scale)
    (func (export "getWalls") (result i32) global.get $walls)
    (func (export "setWalls") (param i32) local.get 0 global.set $walls)
    (func (export "getBraid") (result i32) global.get $braid)
    (func (export "setBraid") (param i32) local.get 0 global.set $braid)
    (func (export "getInset") (result i32) global.get $inset)
    (func (export "setInset") (param i32) local.get 0 global.set $inset)
    (func (export "getFill") (result i32) global.get $fill)
    (func (export "setFill") (param i32) local.get 0 global.set $fill)

    (func (export "generate")
        (local $w f64)
        (local $h f64)
        (local $inset f64)
        (call $resize
            (i32.mul (global.get $width) (global.get $scale))
            (i32.mul (global.get $height) (global.get $scale)))
        (local.set $w (f64.convert_i32_s (i32.mul (global.get $width) (global.get $scale))))
        (local.set $h (f64.convert_i32_s (i32.mul (global.get $height) (global.get $scale))))
        (local.set $inset (f64.convert_i32_s (global.get $inset)))
        (call $fill_style (i32.const 0) (i32.const 5))
        (call $fill_all)
        (if (global.get $fill)
            (then
                (call $fill_style (i32.const 16) (i32.const 4))
                (call $fill_rect
                    (local.get $inset)
                    (local.get $inset)
                    (f64.sub (local.get $w) (f64.mul (local.get $inset) (f64.const 2)))
                    (f64.sub (local.get $h) (f64.mul (local.get $inset) (f64.const 2))))))
        (if (global.get $walls)
            (then
                (call $stroke_style (i32.const 8) (i32.const 5))
                (call $draw_line (f64.const 0) (f64.const 0.5) (local.get $w) (f64.const 0.5))))
        (call $log (i32.const 24) (i32.const 9)))
)"#;

/// Resizes to `width × height`, selects "blue" and fills everything.
pub const BLUE_GUEST: &str = r#"(module
    (import "env" "setFillStyle" (func $fill_style (param i32 i32)))
    (import "env" "fillAll" (func $fill_all))
    (import "env" "resizeCanvas" (func $resize (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "blue")
    (global $width (mut i32) (i32.const 300))
    (global $height (mut i32) (i32.const 150))
    (func (export "getWidth") (result i32) global.get $width)
    (func (export "setWidth") (param i32) local.get 0 global.set $width)
    (func (export "getHeight") (result i32) global.get $height)
    (func (export "setHeight") (param i32) local.get 0 global.set $height)
    (func (export "generate")
        (call $resize (global.get $width) (global.get $height))
        (call $fill_style (i32.const 0) (i32.const 4))
        (call $fill_all))
)"#;

/// Passes malformed spans to every string-taking import.
///
/// Logs: empty span, span running off the end of memory, span starting
/// far past memory, invalid UTF-8. Then sets an invalid-UTF-8 fill style,
/// a zero-length stroke style, and fills everything.
pub const BAD_SPAN_GUEST: &str = r#"(module
    (import "env" "log" (func $log (param i32 i32)))
    (import "env" "setFillStyle" (func $fill_style (param i32 i32)))
    (import "env" "setStrokeStyle" (func $stroke_style (param i32 i32)))
    (import "env" "fillAll" (func $fill_all))
    (memory (export "memory") 1)
    (data (i32.const 0) "\ff\feok")
    (data (i32.const 65530) "tail!!")
    (func (export "generate")
        (call $log (i32.const 0) (i32.const 0))
        (call $log (i32.const 65530) (i32.const 100))
        (call $log (i32.const -16) (i32.const 100))
        (call $log (i32.const 0) (i32.const 4))
        (call $fill_style (i32.const 0) (i32.const 4))
        (call $stroke_style (i32.const 0) (i32.const 0))
        (call $fill_all))
)"#;

/// Shaped like the first browser build of the generator: `gen` entry point,
/// `consoleDebug` for output, no configuration fields.
pub const LEGACY_GUEST: &str = r#"(module
    (import "env" "consoleDebug" (func $debug (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "hello from gen")
    (func (export "gen")
        (call $debug (i32.const 0) (i32.const 14)))
)"#;

// ── Loaders ──

/// Load a fixture onto any surface, collecting guest logs in `log`.
pub fn load_with<S: DrawingSurface + 'static>(
    wat: &str,
    surface: S,
    log: &MemLog,
    config: BridgeConfig,
) -> ModuleHandle<S> {
    Loader::new(config)
        .expect("engine")
        .load(wat.as_bytes(), surface, Box::new(log.clone()))
        .expect("fixture should load")
}

pub fn load_recording(wat: &str, log: &MemLog) -> ModuleHandle<RecordingSurface> {
    load_with(wat, RecordingSurface::new(), log, BridgeConfig::default())
}

pub fn load_canvas(wat: &str, log: &MemLog) -> ModuleHandle<PixelCanvas> {
    load_with(wat, PixelCanvas::default(), log, BridgeConfig::default())
}

/// A controller over `MAZE_GUEST` with a fresh panel, not yet loaded.
pub fn maze_controller(log: &MemLog) -> Controller<RecordingSurface, MemPanel> {
    Controller::new(load_recording(MAZE_GUEST, log), MemPanel::new())
}

/// How many times `MAZE_GUEST` has generated: it resizes exactly once per run.
pub fn generations(handle: &ModuleHandle<RecordingSurface>) -> usize {
    handle
        .surface()
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Resize { .. }))
        .count()
}
