//! Fixed-count timed rendering run

use crate::renderer::Renderer;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Timing summary of a benchmark run
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BenchmarkResult {
    pub frames: u64,
    /// Seconds
    pub total_time: f64,
    /// Seconds per frame
    pub avg_frame_time: f64,
    pub fps: f64,
}

impl BenchmarkResult {
    /// Derive averages from a frame count and elapsed time; degenerate runs report zeros
    pub fn from_elapsed(frames: u64, elapsed: Duration) -> Self {
        let total_time = elapsed.as_secs_f64();
        let avg_frame_time = if frames > 0 {
            total_time / frames as f64
        } else {
            0.0
        };
        let fps = if total_time > 0.0 {
            frames as f64 / total_time
        } else {
            0.0
        };

        Self {
            frames,
            total_time,
            avg_frame_time,
            fps,
        }
    }
}

/// Render and advance `frames` times without displaying anything
pub fn run_benchmark(renderer: &mut Renderer, frames: u64) -> BenchmarkResult {
    tracing::info!(frames, mode = %renderer.config().mode, "Starting benchmark");

    let start = Instant::now();
    for _ in 0..frames {
        let frame = renderer.render_frame();
        std::hint::black_box(frame);
        renderer.step_angles();
    }
    let result = BenchmarkResult::from_elapsed(frames, start.elapsed());

    tracing::debug!(
        total_time = result.total_time,
        fps = result.fps,
        "Benchmark finished"
    );
    result
}

/// Benchmark report output format
#[derive(
    Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Format a benchmark report
pub fn format_report(
    language: &str,
    result: &BenchmarkResult,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(format_text(language, result)),
        ReportFormat::Json => format_json(language, result),
    }
}

fn format_text(language: &str, r: &BenchmarkResult) -> String {
    format!(
        "Language: {}\nFrames: {}\nTotal Time: {:.4}s\nAvg Frame Time: {:.2}ms\nFPS: {:.2}\n",
        language,
        r.frames,
        r.total_time,
        r.avg_frame_time * 1000.0,
        r.fps
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    language: &'a str,
    #[serde(flatten)]
    result: &'a BenchmarkResult,
}

fn format_json(language: &str, r: &BenchmarkResult) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        language,
        result: r,
    };
    serde_json::to_string(&report)
}
