//! masm-host: run a generator module once and save what it drew.
//!
//! The module is seeded from the clock (or `--seed`), drawn, then every
//! `--set` and `--clicks` event is replayed in order, exactly as a user
//! editing controls and clicking the canvas would.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use masm_bridge::{
    time_seed, BridgeConfig, BridgeError, Controller, EventQueue, Loader, TracingSink, UiEvent,
};
use masm_hostapi::{DrawingSurface, Field, FieldValue, MemPanel, PixelCanvas};

#[derive(Parser, Debug)]
#[command(name = "masm-host", version, about = "Drive a masm generator module and save the canvas")]
struct Cli {
    /// Generator module (.wasm or .wat)
    module: PathBuf,

    /// Where to write the canvas (binary PPM)
    #[arg(short, long, default_value = "maze.ppm")]
    output: PathBuf,

    /// Initial seed instead of the clock
    #[arg(long)]
    seed: Option<i64>,

    /// Edit a control, e.g. `--set width=20 --set walls=off`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(Field, FieldValue)>,

    /// Canvas clicks to replay after the edits
    #[arg(long, default_value_t = 0)]
    clicks: u32,

    /// TOML bridge configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop guest log messages
    #[arg(short, long)]
    quiet: bool,
}

fn parse_assignment(s: &str) -> Result<(Field, FieldValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    let field: Field = name.parse().map_err(|e| format!("{}", e))?;
    let value = FieldValue::parse(field.kind(), value).map_err(|e| format!("{}", e))?;
    Ok((field, value))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("masm=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "masm-host failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BridgeError> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };
    if cli.quiet {
        config.enable_guest_logs = false;
    }

    let canvas = PixelCanvas::default()
        .with_line_width(config.line_width)
        .with_max_pixels(config.max_canvas_pixels);
    let handle = Loader::new(config)?.load_file(
        &cli.module,
        canvas,
        Box::new(TracingSink::default()),
    )?;
    tracing::info!(module = %cli.module.display(), "module loaded");

    let mut controller = Controller::new(handle, MemPanel::new());
    controller.initial_load(cli.seed.unwrap_or_else(time_seed))?;

    let mut queue = EventQueue::new();
    queue.extend(
        cli.set
            .iter()
            .map(|&(field, value)| UiEvent::ControlInput { field, value }),
    );
    queue.extend((0..cli.clicks).map(|_| UiEvent::CanvasClick));
    let handled = queue.run(&mut controller)?;

    for (field, control) in controller.panel().controls() {
        println!("{} = {}", field, control.value);
    }

    let canvas = controller.handle().surface();
    canvas.write_ppm(BufWriter::new(File::create(&cli.output)?))?;
    tracing::info!(
        events = handled,
        redraws = controller.redraws(),
        width = canvas.width(),
        height = canvas.height(),
        output = %cli.output.display(),
        "canvas written"
    );
    Ok(())
}
