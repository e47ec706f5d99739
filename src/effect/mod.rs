//! Effect rendering library.
//!
//! Every effect is a function of the channel state, the device's position
//! in the formation and the elapsed time since the effect's logical start.
//! Nothing here keeps incremental animation state: each tick re-evaluates
//! from the timestamps, so a device that missed frames lands on the same
//! picture as everyone else.

mod ambient;
mod beat;
mod breath;
mod check;
mod envelope;
mod flash;
mod progress;
mod wave;

pub use envelope::ramp;

use crate::color::{Rgb, BLACK, GREEN, ORANGE, RED, WHITE};
use crate::gamma;
use crate::packet::{EffectId, EFFECT_NONE, MODIFIER_FLIP_FLOP};
use crate::position::Formation;
use crate::rng::Rng;
use crate::state::{ChannelState, Side};

// Fixed envelope for beat-synchronized flashes: hard attack, short hold,
// long visible decay.
const BEAT_ON_MICROS: i64 = 30_000;
const BEAT_FADEOUT_MICROS: i64 = 350_000;

const STROBE_DEFAULT_DURATION_MS: u16 = 100;
const STROBE_ON_MICROS: i64 = 40_000;

/// Per-call context handed to the render functions.
pub(crate) struct RenderCx<'a, R: Rng> {
    pub(crate) side: Side,
    pub(crate) formation: Formation,
    pub(crate) now_micros: i64,
    pub(crate) rng: &'a mut R,
}

/// Fill a strip with one gamma-corrected color.
pub(crate) fn fill_corrected(leds: &mut [Rgb], color: Rgb) {
    let corrected = gamma::corrected(color);
    for led in leds.iter_mut() {
        *led = corrected;
    }
}

const fn is_black(color: Rgb) -> bool {
    color.r == 0 && color.g == 0 && color.b == 0
}

fn beat_timing(data: &mut ChannelState) {
    data.flip.fadein_micros = 0;
    data.flip.on_micros = BEAT_ON_MICROS;
    data.flip.fadeout_micros = BEAT_FADEOUT_MICROS;
}

/// Apply per-effect parameter defaults at promotion time.
///
/// Runs once per released command, before the flip payload snapshot is
/// taken, so flip-flop swaps exchange the defaulted values. Effects that
/// repeat on their own (strobe, breath, progress) only force the repeat
/// flag when the packet carried a real duration; a zero wire duration must
/// never produce a repeating timeline.
pub(crate) fn apply_release_defaults<R: Rng>(data: &mut ChannelState, side: Side, rng: &mut R) {
    let Some(id) = EffectId::from_raw(data.effect) else {
        return;
    };
    match id {
        EffectId::FlashYellow => {
            beat_timing(data);
            data.flip.color = ORANGE;
        }
        EffectId::FlashAlternate => {
            data.modifiers = data.modifiers.with(MODIFIER_FLIP_FLOP);
            beat_timing(data);
        }
        EffectId::Strobe => {
            data.repeat = true;
            if data.duration_ms == 0 {
                data.duration_ms = STROBE_DEFAULT_DURATION_MS;
            }
            data.flip.color = WHITE;
            data.flip.fadein_micros = 0;
            data.flip.on_micros = STROBE_ON_MICROS;
            data.flip.fadeout_micros = 0;
        }
        EffectId::ThreeSteps => {
            beat_timing(data);
            if is_black(data.flip.color) {
                data.flip.color = match side {
                    Side::Left => GREEN,
                    Side::Right => RED,
                };
            }
        }
        EffectId::ThreeStepsAlternate | EffectId::RainbowRankBeat => beat_timing(data),
        EffectId::VueMeter | EffectId::WaveBack => {
            if data.option == 0 {
                data.option = 50;
            }
            if data.duration_ms == 0 {
                data.duration_ms = 300;
            }
        }
        EffectId::Breath => {
            if data.duration_ms != 0 {
                data.repeat = true;
            } else {
                data.duration_ms = 5000;
            }
            if is_black(data.flip.color) {
                data.flip.color = GREEN;
            }
        }
        EffectId::Heartbeat => {
            if data.duration_ms != 0 {
                data.repeat = true;
            } else {
                data.duration_ms = 1000;
            }
            if data.option == 0 {
                data.option = 224;
            }
            if is_black(data.flip.color) {
                data.flip.color = RED;
            }
        }
        EffectId::Progress | EffectId::Progress4 => {
            if data.duration_ms != 0 {
                data.repeat = true;
            } else {
                data.duration_ms = 300;
            }
            if id == EffectId::Progress4 {
                data.option = 4;
            } else if data.option == 0 {
                data.option = 3;
            }
        }
        EffectId::ProgressRainbow => {
            if data.duration_ms != 0 {
                data.repeat = true;
            } else {
                data.duration_ms = 300;
            }
        }
        EffectId::Firefly => {
            if data.duration_ms == 0 {
                data.duration_ms = rng.random_range(1, ambient::FIREFLY_GAP_MAX_MS) as u16;
            }
        }
        EffectId::Stars => {
            if data.duration_ms == 0 {
                data.duration_ms = rng.random_range(1, ambient::STARS_GAP_MAX_MS) as u16;
            }
        }
        _ => {}
    }
}

/// Dispatch one channel's active effect to its render routine.
///
/// Unknown ids render nothing; meta-command ids belong to the transport
/// and are equally inert here.
pub(crate) fn render<R: Rng>(data: &mut ChannelState, cx: &mut RenderCx<'_, R>, leds: &mut [Rgb]) {
    let Some(id) = EffectId::from_raw(data.effect) else {
        return;
    };
    match id {
        EffectId::Blank => {
            data.effect = EFFECT_NONE;
            fill_corrected(leds, BLACK);
        }
        EffectId::Flash
        | EffectId::FlashAlternate
        | EffectId::FlashYellow
        | EffectId::Strobe => flash::flash(data, leds),
        EffectId::Fixed => flash::fixed(data, leds),
        EffectId::ThreeSteps => beat::three_steps(data, cx, leds, false),
        EffectId::ThreeStepsAlternate => beat::three_steps(data, cx, leds, true),
        EffectId::RainbowRankBeat => beat::rainbow_rank_beat(data, cx, leds),
        EffectId::Breath => breath::breath(data, leds),
        EffectId::Heartbeat => breath::heartbeat(data, leds),
        EffectId::Progress | EffectId::Progress4 => progress::progress(data, leds),
        EffectId::ProgressRainbow => progress::progress_rainbow(data, leds),
        EffectId::VueMeter => wave::vue_meter(data, cx, leds),
        EffectId::WaveBack => wave::wave_back(data, cx, leds),
        EffectId::Firefly => ambient::firefly(data, cx, leds),
        EffectId::Stars => ambient::stars(data, cx, leds),
        EffectId::Check => check::check(data, cx, leds),
        EffectId::KeepAlive
        | EffectId::None
        | EffectId::Reboot
        | EffectId::ForceUpdate
        | EffectId::Feedback => {}
    }
}
