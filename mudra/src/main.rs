//! Mudra - record a gesture, then count repetitions of it
//!
//! Usage:
//!
//! ```bash
//! mudra                              # simulated armband, defaults
//! mudra --config mudra.toml
//! mudra --trace session.trace        # replay a captured session
//! mudra --capture session.trace      # capture device input while running
//! ```

use clap::Parser;
use mudra::{
    AppConfig, Capturing, Console, Interruptible, create_device, setup_ctrl_c_handler,
    wait_for_connection,
};
use mudra_core::{Result, TraceInfo};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Config file tried when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "mudra.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a captured trace instead of the configured device
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Capture device input to a trace file
    #[arg(long)]
    capture: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    let level = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match config.and_then(|config| run(&args, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprint!("Press enter to continue.");
            let _ = io::stdin().lock().read_line(&mut String::new());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, mut config: AppConfig) -> Result<()> {
    log::info!("Mudra v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(trace) = &args.trace {
        config.device.device_type = "trace".to_string();
        config.device.trace_path = Some(trace.to_string_lossy().into_owned());
    }
    log::info!(
        "Device: {}, sampling every {} ms",
        config.device.device_type,
        config.session.sampling_period_ms
    );

    let interrupt = setup_ctrl_c_handler()?;

    println!("Attempting to find an armband...");
    let device = create_device(&config.device)?;
    wait_for_connection(
        &*device,
        Duration::from_millis(config.device.discovery_timeout_ms),
    )?;
    println!("Connected to an armband!\n");

    let device = match &args.capture {
        Some(path) => Capturing::to_file(device, path)?,
        None => Capturing::disabled(device),
    };
    if device.is_capturing() {
        let capture = device.handle();
        interrupt.on_exit(move || log_capture(capture.finish()));
    }
    let source = Interruptible::new(device, interrupt);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), source, config.session);
    let result = console.run();

    let (_, source) = console.into_parts();
    log_capture(source.into_inner().finish());
    result
}

fn log_capture(finished: Result<Option<TraceInfo>>) {
    match finished {
        Ok(Some(info)) => log::info!(
            "Captured {} messages ({:.1} s, {:.0} Hz) to {}",
            info.message_count,
            info.duration_secs(),
            info.sample_rate_hz(),
            info.path.display()
        ),
        Ok(None) => {}
        Err(e) => log::error!("Failed to finish capture: {}", e),
    }
}
