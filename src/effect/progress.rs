//! Periodic bar effects: a lit pixel (or a hue wave) travels the strip
//! once per cycle.

use super::fill_corrected;
use crate::color::{hsv2rgb, Hsv, Rgb, BLACK};
use crate::gamma;
use crate::state::ChannelState;

/// One pixel out of every `option` is lit; the lit slot advances with the
/// cycle position.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn progress(data: &mut ChannelState, leds: &mut [Rgb]) {
    let delta = data.delta_time_micros;
    if delta < 0 {
        fill_corrected(leds, BLACK);
        return;
    }
    let group = i64::from(data.option.max(1));
    let duration = data.duration_micros().max(1);

    data.step = ((group * delta / duration) % group) as u16;

    let group = group as usize;
    let lit = gamma::corrected(data.flip.color);
    let off = gamma::corrected(BLACK);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if i % group == usize::from(data.step) {
            lit
        } else {
            off
        };
    }
    if data.last_step != data.step {
        data.last_step = data.step;
    }
}

/// Continuous hue wave traveling along the strip, one full wheel rotation
/// per cycle. Written raw (no gamma), like the saturated rainbow fills.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn progress_rainbow(data: &ChannelState, leds: &mut [Rgb]) {
    let delta = data.delta_time_micros;
    if delta < 0 {
        fill_corrected(leds, BLACK);
        return;
    }
    let duration = data.duration_micros().max(1);
    let wave = 255u8.wrapping_sub(((256 * delta / duration) % 256) as u8);
    let len = leds.len().max(1);
    for (i, led) in leds.iter_mut().enumerate() {
        let offset = ((i % len) * 255 / len) as u8;
        *led = hsv2rgb(Hsv {
            hue: wave.wrapping_add(offset),
            sat: 255,
            val: 255,
        });
    }
}
