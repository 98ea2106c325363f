//! Interactive animation loop
//!
//! Renders the current angles, hands the frame to a sink, then advances the
//! angles. Runs until the sink asks to stop, its output goes away, or an
//! optional frame limit is reached.

use crate::renderer::Renderer;
use crate::terminal::Action;
use std::io;

/// Destination for animation frames and source of user control
pub trait FrameSink {
    /// Display one frame
    fn present(&mut self, frame: &str) -> io::Result<()>;

    /// Poll for a control action, checked once per loop iteration
    fn poll_action(&mut self) -> io::Result<Action>;

    /// Wait for a control action while paused.
    ///
    /// Called instead of [`FrameSink::poll_action`] when no frames are being
    /// drawn, so implementations should block for a while rather than return
    /// immediately.
    fn wait_action(&mut self) -> io::Result<Action> {
        self.poll_action()
    }
}

/// Run the animation, returning the number of frames presented.
///
/// A closed output pipe ends the run normally.
pub fn run_animation<S: FrameSink + ?Sized>(
    renderer: &mut Renderer,
    sink: &mut S,
    max_frames: Option<u64>,
) -> io::Result<u64> {
    let mut frames = 0u64;
    let mut paused = false;

    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            break;
        }

        let action = if paused {
            sink.wait_action()?
        } else {
            sink.poll_action()?
        };

        match action {
            Action::Quit => {
                tracing::debug!(frames, "Quit requested");
                break;
            }
            Action::Pause => {
                paused = !paused;
                tracing::debug!(paused, "Pause toggled");
            }
            Action::None => {}
        }

        if paused {
            continue;
        }

        let frame = renderer.render_frame();
        if let Err(e) = sink.present(&frame) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                tracing::debug!("Output closed, stopping animation");
                break;
            }
            return Err(e);
        }

        renderer.step_angles();
        frames += 1;

        let state = renderer.state();
        tracing::trace!(frame = frames, a = state.a, b = state.b, "Frame presented");
    }

    Ok(frames)
}
