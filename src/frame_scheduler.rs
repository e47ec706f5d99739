//! Frame scheduling and the diff-and-flush frame sink.
//!
//! Provides portable frame pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping/waiting between frames.
//! The hardware write is skipped when nothing changed since the last flush;
//! the render itself always runs, so the state machine's sense of time is
//! unaffected.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::engine::LightEngine;
use crate::rng::Rng;
use crate::StripOutput;

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Advances the engine and flushes changed frames to the output
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine, output);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: StripOutput,
    R: Rng,
    const MAX_LEDS: usize,
    const COMMAND_CHANNEL_SIZE: usize,
> {
    output: O,
    engine: LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
    last_left: [Rgb; MAX_LEDS],
    last_right: [Rgb; MAX_LEDS],
    flushed_once: bool,
}

impl<'a, O: StripOutput, R: Rng, const MAX_LEDS: usize, const COMMAND_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, R, MAX_LEDS, COMMAND_CHANNEL_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(engine: LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE>, output: O) -> Self {
        Self::with_frame_duration(engine, output, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        engine: LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE>,
        output: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output,
            engine,
            next_frame: Instant::from_millis(0),
            frame_duration,
            last_left: [Rgb { r: 0, g: 0, b: 0 }; MAX_LEDS],
            last_right: [Rgb { r: 0, g: 0, b: 0 }; MAX_LEDS],
            flushed_once: false,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Advances the engine state machine and renders both strips
    /// 3. Writes to the output only when a strip changed
    /// 4. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now.
        // This prevents catch-up bursts after long stalls.
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        self.engine.tick(now);
        self.flush();

        // Calculate next frame deadline
        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    fn flush(&mut self) {
        let (left, right) = self.engine.frames();
        let count = left.len();
        let changed = !self.flushed_once
            || left != &self.last_left[..count]
            || right != &self.last_right[..count];
        if !changed {
            return;
        }
        self.last_left[..count].copy_from_slice(left);
        self.last_right[..count].copy_from_slice(right);
        self.flushed_once = true;
        self.output.write(left, right);
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE> {
        &mut self.engine
    }
}
