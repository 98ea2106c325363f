//! ASCII donut renderer
//!
//! This library renders a rotating torus as ASCII art: it samples the torus
//! surface, rotates and projects each sample, resolves visibility with a
//! z-buffer and maps surface luminance onto a character ramp.

pub mod animation;
pub mod benchmark;
pub mod config;
pub mod renderer;
pub mod terminal;

pub use animation::{run_animation, FrameSink};
pub use benchmark::{run_benchmark, BenchmarkResult};
pub use config::{ConfigError, DonutConfig, RenderMode};
pub use renderer::{RenderState, Renderer};
pub use terminal::TerminalDisplay;

/// Character ramp from least to most lit
pub const DEFAULT_SHADING: &str = ".,-~:;=!*#$@";

/// Label printed in benchmark reports
pub const LANGUAGE_LABEL: &str = "Rust";
