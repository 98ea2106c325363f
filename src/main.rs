//! ascii_donut: a spinning ASCII torus in the terminal
//!
//! Controls (interactive mode):
//! - Space: Pause / resume
//! - Q, Escape or Ctrl-C: Quit
//!
//! Usage:
//!   ascii_donut                            - Animate in the terminal
//!   ascii_donut --benchmark --frames 500   - Time 500 frames without drawing

use anyhow::Context;
use ascii_donut::{
    benchmark::{format_report, run_benchmark, ReportFormat},
    config::{DonutConfig, RenderMode},
    run_animation, Renderer, TerminalDisplay, LANGUAGE_LABEL,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii_donut")]
#[command(version = "0.1.0")]
#[command(about = "Spinning ASCII torus (donut) for the terminal")]
#[command(long_about = "
ascii_donut renders a rotating torus as ASCII art:
  - Interactive mode redraws the terminal until you press q
  - Benchmark mode renders a fixed number of frames and reports timing

Example usage:
  ascii_donut --shading ' .:-=+*#%@'
  ascii_donut --benchmark --frames 1000 --mode optimized
  ascii_donut --config donut.yaml
")]
struct Cli {
    /// Path to a YAML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Screen width
    #[arg(long)]
    width: Option<usize>,

    /// Screen height
    #[arg(long)]
    height: Option<usize>,

    /// Tube radius
    #[arg(long)]
    r1: Option<f64>,

    /// Center radius
    #[arg(long)]
    r2: Option<f64>,

    /// Projection scaling constant
    #[arg(long)]
    k1: Option<f64>,

    /// Camera distance constant
    #[arg(long)]
    k2: Option<f64>,

    /// Rotation speed for angle A
    #[arg(long, allow_negative_numbers = true)]
    a_step: Option<f64>,

    /// Rotation speed for angle B
    #[arg(long, allow_negative_numbers = true)]
    b_step: Option<f64>,

    /// Theta angular step
    #[arg(long)]
    theta_step: Option<f64>,

    /// Phi angular step
    #[arg(long)]
    phi_step: Option<f64>,

    /// ASCII shading characters, dark to bright
    #[arg(long)]
    shading: Option<String>,

    /// Rendering mode
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Run benchmark mode (no terminal output)
    #[arg(long)]
    benchmark: bool,

    /// Number of frames for benchmark
    #[arg(long, default_value_t = 500)]
    frames: u64,

    /// Benchmark report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// Milliseconds to wait for input between frames
    #[arg(long, default_value_t = 0)]
    frame_delay_ms: u64,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    fn apply_overrides(&self, config: &mut DonutConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(r1) = self.r1 {
            config.r1 = r1;
        }
        if let Some(r2) = self.r2 {
            config.r2 = r2;
        }
        if let Some(k1) = self.k1 {
            config.k1 = k1;
        }
        if let Some(k2) = self.k2 {
            config.k2 = k2;
        }
        if let Some(a_step) = self.a_step {
            config.a_step = a_step;
        }
        if let Some(b_step) = self.b_step {
            config.b_step = b_step;
        }
        if let Some(theta_step) = self.theta_step {
            config.theta_step = theta_step;
        }
        if let Some(phi_step) = self.phi_step {
            config.phi_step = phi_step;
        }
        if let Some(ref shading) = self.shading {
            config.shading = shading.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    // stderr keeps log lines out of the frames on stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config_or_exit(&cli);

    tracing::debug!(
        width = config.width,
        height = config.height,
        r1 = config.r1,
        r2 = config.r2,
        k1 = config.k1,
        k2 = config.k2,
        shading = %config.shading,
        "Configuration loaded"
    );

    let mut renderer = Renderer::new(config);

    if cli.benchmark {
        tracing::info!(mode = %renderer.config().mode, "Running benchmark");
        let result = run_benchmark(&mut renderer, cli.frames);
        let report = format_report(LANGUAGE_LABEL, &result, cli.report)
            .context("Failed to format benchmark report")?;
        print!("{}", report);
        return Ok(());
    }

    tracing::info!(mode = %renderer.config().mode, "Running animation");
    match TerminalDisplay::size() {
        Ok((columns, rows)) if renderer.config().width > columns || renderer.config().height > rows => {
            tracing::warn!(
                columns,
                rows,
                width = renderer.config().width,
                height = renderer.config().height,
                "Frame is larger than the terminal and will be clipped"
            );
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read terminal size"),
    }

    let mut terminal = TerminalDisplay::new(Duration::from_millis(cli.frame_delay_ms))
        .context("Failed to initialize terminal")?;
    let frames = run_animation(&mut renderer, &mut terminal, None)
        .context("Animation failed")?;
    drop(terminal);

    tracing::info!(frames, "Animation stopped");
    Ok(())
}

/// Build the effective configuration or exit with an error
fn load_config_or_exit(cli: &Cli) -> DonutConfig {
    let mut config = match DonutConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    config
}
