//! Stochastic ambient effects.
//!
//! Fireflies and stars are deliberately incoherent across devices: each
//! device rolls its own generator, so the ensemble twinkles instead of
//! blinking in unison. When the current interval expires, a weighted coin
//! decides between spawning a new instance with randomized envelope and an
//! idle gap; either way the channel's local timeline restarts.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::envelope::ramp;
use super::fill_corrected;
use super::RenderCx;
use crate::color::{rgb_from_u32, Rgb, BLACK, WHITE};
use crate::rng::Rng;
use crate::state::ChannelState;

const FIREFLY_PROBABILITY: u32 = 4;
const FIREFLY_LIFE_MIN_MS: u32 = 500;
const FIREFLY_LIFE_MAX_MS: u32 = 1500;
const FIREFLY_FADEIN_MIN_MS: u32 = 50;
const FIREFLY_FADEIN_MAX_MS: u32 = 150;
const FIREFLY_FADEOUT_MIN_MS: u32 = 100;
const FIREFLY_FADEOUT_MAX_MS: u32 = 250;
const FIREFLY_GAP_MIN_MS: u32 = 100;
pub(super) const FIREFLY_GAP_MAX_MS: u32 = 2000;

const STARS_PROBABILITY: u32 = 3;
const STARS_FADEIN_MIN_MS: u32 = 200;
const STARS_FADEIN_MAX_MS: u32 = 600;
const STARS_FADEOUT_MIN_MS: u32 = 300;
const STARS_FADEOUT_MAX_MS: u32 = 900;
const STARS_GAP_MIN_MS: u32 = 100;
pub(super) const STARS_GAP_MAX_MS: u32 = 1500;

// Warm yellow-green tones.
#[allow(clippy::unreadable_literal)]
const FIREFLY_PALETTE: [Rgb; 5] = [
    rgb_from_u32(0xFFBF00),
    rgb_from_u32(0xD4E157),
    rgb_from_u32(0xAAFF00),
    rgb_from_u32(0xFFD54F),
    rgb_from_u32(0x9CCC65),
];

#[allow(clippy::cast_possible_truncation)]
pub(super) fn firefly<R: Rng>(data: &mut ChannelState, cx: &mut RenderCx<'_, R>, leds: &mut [Rgb]) {
    if data.delta_time_micros > data.duration_micros() {
        if cx.rng.random_range(0, FIREFLY_PROBABILITY) == 0 {
            data.duration_ms =
                cx.rng.random_range(FIREFLY_LIFE_MIN_MS, FIREFLY_LIFE_MAX_MS) as u16;
            data.option = 1;
            data.flip.fadein_micros = 1_000
                * i64::from(cx.rng.random_range(FIREFLY_FADEIN_MIN_MS, FIREFLY_FADEIN_MAX_MS));
            data.flip.fadeout_micros = 1_000
                * i64::from(cx.rng.random_range(FIREFLY_FADEOUT_MIN_MS, FIREFLY_FADEOUT_MAX_MS));
            data.flip.on_micros =
                data.duration_micros() - data.flip.fadein_micros - data.flip.fadeout_micros;
            let pick = cx.rng.random_range(0, FIREFLY_PALETTE.len() as u32) as usize;
            data.flip.color = FIREFLY_PALETTE[pick];
            #[cfg(feature = "esp32-log")]
            println!("firefly born for {} ms", data.duration_ms);
        } else {
            data.duration_ms = cx.rng.random_range(FIREFLY_GAP_MIN_MS, FIREFLY_GAP_MAX_MS) as u16;
            data.option = 0;
            data.flip.color = BLACK;
        }
        data.start_time_micros = cx.now_micros;
        data.delta_time_micros = 0;
    }

    let color = if data.option > 0 {
        ramp(
            data.delta_time_micros,
            data.flip.fadein_micros,
            data.flip.on_micros,
            data.flip.fadeout_micros,
            data.flip.color,
        )
    } else {
        BLACK
    };
    fill_corrected(leds, color);
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn stars<R: Rng>(data: &mut ChannelState, cx: &mut RenderCx<'_, R>, leds: &mut [Rgb]) {
    if data.delta_time_micros > data.duration_micros() {
        if cx.rng.random_range(0, STARS_PROBABILITY) == 0 {
            data.option = 1;
            data.flip.fadein_micros =
                1_000 * i64::from(cx.rng.random_range(STARS_FADEIN_MIN_MS, STARS_FADEIN_MAX_MS));
            data.flip.fadeout_micros =
                1_000 * i64::from(cx.rng.random_range(STARS_FADEOUT_MIN_MS, STARS_FADEOUT_MAX_MS));
            data.flip.on_micros = 0;
            data.flip.color = WHITE;
            data.duration_ms =
                ((data.flip.fadein_micros + data.flip.fadeout_micros) / 1_000) as u16;
        } else {
            data.duration_ms = cx.rng.random_range(STARS_GAP_MIN_MS, STARS_GAP_MAX_MS) as u16;
            data.option = 0;
        }
        data.start_time_micros = cx.now_micros;
        data.delta_time_micros = 0;
    }

    let color = if data.option > 0 {
        ramp(
            data.delta_time_micros,
            data.flip.fadein_micros,
            data.flip.on_micros,
            data.flip.fadeout_micros,
            data.flip.color,
        )
    } else {
        BLACK
    };
    fill_corrected(leds, color);
}
