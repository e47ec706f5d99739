//! Per-channel runtime state.
//!
//! Each physical strip ("left"/"right") carries one [`ChannelState`]. The
//! block is promoted whole from the staging area, so the render path never
//! observes a half-updated parameter set. The [`FlipPayload`] subset is the
//! part that gets exchanged between channels on odd flip-flop cycles.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::packet::{ChannelParams, LightCommand, Modifiers, EFFECT_NONE};

/// Conversion factor for packet fade timings (wire unit is 10 ms).
pub(crate) const FADE_UNIT_MICROS: i64 = 10_000;

/// Physical output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Color and fade timings exchanged between channels under flip-flop.
///
/// Kept as one `Copy` block so the swap is a single assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipPayload {
    pub color: Rgb,
    pub fadein_micros: i64,
    pub on_micros: i64,
    pub fadeout_micros: i64,
}

impl FlipPayload {
    fn from_params(params: &ChannelParams) -> Self {
        Self {
            color: params.color,
            fadein_micros: i64::from(params.fadein_time) * FADE_UNIT_MICROS,
            on_micros: i64::from(params.on_time) * FADE_UNIT_MICROS,
            fadeout_micros: i64::from(params.fadeout_time) * FADE_UNIT_MICROS,
        }
    }
}

/// Runtime state of one output channel.
///
/// `delta_time_micros` is always measured against `start_time_micros`,
/// never against packet arrival; a negative value means the effect has not
/// started yet.
#[derive(Debug, Clone, Copy)]
pub struct ChannelState {
    pub packet: u16,
    pub applied: bool,
    pub repeat: bool,
    pub step: u16,
    pub last_step: u16,
    pub leds_per_strip: u16,
    pub latency_micros: i64,
    pub start_time_micros: i64,
    pub delta_time_micros: i64,
    pub effect: u8,
    pub modifiers: Modifiers,
    pub repeat_counter: u16,
    pub duration_ms: u16,
    pub option: u16,
    pub flip: FlipPayload,
}

impl ChannelState {
    /// Inert state: effect NONE, nothing scheduled.
    pub const fn empty() -> Self {
        Self {
            packet: 0,
            applied: false,
            repeat: false,
            step: 0,
            last_step: 0,
            leds_per_strip: 0,
            latency_micros: 0,
            start_time_micros: 0,
            delta_time_micros: 0,
            effect: EFFECT_NONE,
            modifiers: Modifiers(0),
            repeat_counter: 0,
            duration_ms: 0,
            option: 0,
            flip: FlipPayload {
                color: Rgb { r: 0, g: 0, b: 0 },
                fadein_micros: 0,
                on_micros: 0,
                fadeout_micros: 0,
            },
        }
    }

    /// Build the state block for one side of a received command.
    pub fn from_command(
        packet_id: u16,
        command: &LightCommand,
        side: Side,
        latency: Duration,
        leds_per_strip: u16,
    ) -> Self {
        let params = match side {
            Side::Left => &command.left,
            Side::Right => &command.right,
        };
        Self {
            packet: packet_id,
            applied: false,
            repeat: command.modifiers.repeat() && command.duration_ms != 0,
            step: 0,
            last_step: 0,
            leds_per_strip,
            latency_micros: latency.as_micros() as i64,
            start_time_micros: 0,
            delta_time_micros: 0,
            effect: command.effect,
            modifiers: command.modifiers,
            repeat_counter: command.repeat_counter,
            duration_ms: command.duration_ms,
            option: command.option,
            flip: FlipPayload::from_params(params),
        }
    }

    /// Effect duration in microseconds.
    pub const fn duration_micros(&self) -> i64 {
        1_000 * self.duration_ms as i64
    }
}
