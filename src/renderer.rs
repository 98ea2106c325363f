//! Torus rasterizer
//!
//! Samples the torus surface over a (theta, phi) grid, rotates every sample by
//! the two animation angles, projects it with a 1/z factor and keeps, per cell,
//! the sample nearest to the viewer. Luminance picks the glyph.

use crate::config::DonutConfig;
use std::f64::consts::TAU;

/// Rotation angles carried from frame to frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderState {
    /// Rotation about the X axis, radians
    pub a: f64,
    /// Rotation about the Z axis, radians
    pub b: f64,
}

impl RenderState {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// State after one animation step. Angles are never wrapped.
    pub fn advance(self, config: &DonutConfig) -> Self {
        Self {
            a: self.a + config.a_step,
            b: self.b + config.b_step,
        }
    }
}

/// Free-standing form of [`RenderState::advance`]
pub fn advance(state: RenderState, config: &DonutConfig) -> RenderState {
    state.advance(config)
}

/// Render one frame for `state` without touching any renderer.
///
/// Evaluates sin/cos per sample; the result is identical to
/// [`Renderer::render_frame`] in either mode.
pub fn render_frame(config: &DonutConfig, state: RenderState) -> String {
    rasterize_direct(config, &config.shading_chars(), state).to_text()
}

/// Angles 0, step, 2*step, ... below 2π, accumulated by repeated addition
fn sweep(step: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(0.0_f64), move |angle| Some(angle + step))
        .take_while(|angle| *angle < TAU)
}

/// (sin, cos) of each sweep angle, evaluated as the sweep advances
fn trig_sweep(step: f64) -> impl Iterator<Item = (f64, f64)> {
    sweep(step).map(|angle| (angle.sin(), angle.cos()))
}

/// Precomputed (sin, cos) pairs for one sweep
#[derive(Debug, Clone)]
struct AngleTable {
    values: Vec<(f64, f64)>,
}

impl AngleTable {
    fn new(step: f64) -> Self {
        Self {
            values: trig_sweep(step).collect(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Character grid plus the per-cell maximum inverse depth seen this frame
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<char>,
    zbuffer: Vec<f64>,
}

impl FrameBuffer {
    /// Blank frame: every cell a space, every depth 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            zbuffer: vec![0.0; width * height],
        }
    }

    /// Write `glyph` at (xp, yp) if the cell is on screen and `ooz` is strictly
    /// nearer than anything already stored there. Returns true when written.
    pub fn plot(&mut self, xp: isize, yp: isize, ooz: f64, glyph: char) -> bool {
        let Some(idx) = self.index(xp, yp) else {
            return false;
        };

        if ooz > self.zbuffer[idx] {
            self.zbuffer[idx] = ooz;
            self.cells[idx] = glyph;
            true
        } else {
            false
        }
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[x + self.width * y])
        } else {
            None
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.zbuffer[x + self.width * y])
        } else {
            None
        }
    }

    fn index(&self, xp: isize, yp: isize) -> Option<usize> {
        if xp < 0 || yp < 0 {
            return None;
        }
        let (x, y) = (xp as usize, yp as usize);
        if x < self.width && y < self.height {
            Some(x + self.width * y)
        } else {
            None
        }
    }

    /// Row-major text, every row newline-terminated
    pub fn to_text(&self) -> String {
        let mut result = String::with_capacity(self.width * self.height + self.height);

        for row in self.cells.chunks(self.width.max(1)).take(self.height) {
            result.extend(row.iter());
            result.push('\n');
        }

        result
    }
}

/// Glyph for a lit sample: bucket `trunc(luminance * 8)` clamped into the ramp
pub fn shade_glyph(luminance: f64, shading: &[char]) -> char {
    let max_index = shading.len().saturating_sub(1) as isize;
    let shade = ((luminance * 8.0) as isize).clamp(0, max_index);
    shading[shade as usize]
}

/// Sample, rotate, project and depth-test the whole torus into a fresh buffer
fn rasterize<T, P, F>(
    config: &DonutConfig,
    shading: &[char],
    state: RenderState,
    theta_sweep: T,
    phi_sweep: F,
) -> FrameBuffer
where
    T: Iterator<Item = (f64, f64)>,
    P: Iterator<Item = (f64, f64)>,
    F: Fn() -> P,
{
    let mut frame = FrameBuffer::new(config.width, config.height);

    let (sin_a, cos_a) = (state.a.sin(), state.a.cos());
    let (sin_b, cos_b) = (state.b.sin(), state.b.cos());

    let half_width = config.width as f64 / 2.0;
    let half_height = config.height as f64 / 2.0;

    for (theta_sin, theta_cos) in theta_sweep {
        // Point on the tube's cross-section circle
        let circle_x = config.r2 + config.r1 * theta_cos;
        let circle_y = config.r1 * theta_sin;

        for (phi_sin, phi_cos) in phi_sweep() {
            // Revolve around the torus axis
            let x = circle_x * phi_cos;
            let y = circle_x * phi_sin;
            let z = circle_y;

            let x1 = x;
            let y1 = y * cos_a - z * sin_a;
            let z1 = y * sin_a + z * cos_a;

            let x2 = x1 * cos_b - y1 * sin_b;
            let y2 = x1 * sin_b + y1 * cos_b;
            let z2 = z1;

            let ooz = 1.0 / (z2 + config.k2);
            // Rows grow downward, hence the Y flip; characters are about twice as tall as wide
            let xp = (half_width + config.k1 * ooz * x2) as isize;
            let yp = (half_height - config.k1 * 0.5 * ooz * y2) as isize;

            let luminance = phi_cos * theta_cos * sin_b
                - cos_a * theta_cos * phi_sin
                - sin_a * theta_sin
                + cos_b * (cos_a * theta_sin - theta_cos * sin_a * phi_sin);

            if luminance > 0.0 {
                frame.plot(xp, yp, ooz, shade_glyph(luminance, shading));
            }
        }
    }

    frame
}

/// Baseline rasterization: trig evaluated per sample, no tables
fn rasterize_direct(config: &DonutConfig, shading: &[char], state: RenderState) -> FrameBuffer {
    rasterize(
        config,
        shading,
        state,
        trig_sweep(config.theta_step),
        || trig_sweep(config.phi_step),
    )
}

/// Stateful renderer: immutable config plus the animation angles
pub struct Renderer {
    config: DonutConfig,
    shading: Vec<char>,
    state: RenderState,
    tables: Option<(AngleTable, AngleTable)>,
}

impl Renderer {
    /// The config must satisfy [`DonutConfig::validate`]
    pub fn new(config: DonutConfig) -> Self {
        let tables = config.mode.is_optimized().then(|| {
            (
                AngleTable::new(config.theta_step),
                AngleTable::new(config.phi_step),
            )
        });

        Self {
            shading: config.shading_chars(),
            config,
            state: RenderState::default(),
            tables,
        }
    }

    pub fn config(&self) -> &DonutConfig {
        &self.config
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn set_state(&mut self, state: RenderState) {
        self.state = state;
    }

    /// Render the current angles. Does not advance them.
    pub fn render_frame(&self) -> String {
        self.render_buffer().to_text()
    }

    /// Render the current angles into a [`FrameBuffer`]
    pub fn render_buffer(&self) -> FrameBuffer {
        match &self.tables {
            Some((theta, phi)) => rasterize(
                &self.config,
                &self.shading,
                self.state,
                theta.iter(),
                || phi.iter(),
            ),
            None => rasterize_direct(&self.config, &self.shading, self.state),
        }
    }

    /// Advance both angles by one step
    pub fn step_angles(&mut self) {
        self.state = self.state.advance(&self.config);
    }
}
