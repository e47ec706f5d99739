//! Rank-gated beat effects.
//!
//! These use the packet's repeat counter as a beat counter: the conductor
//! resends the command on every beat with an incremented counter, and each
//! device decides from counter and rank whether (and in which color) it
//! flashes.

use super::envelope::ramp;
use super::fill_corrected;
use crate::color::{hsv2rgb, Hsv, Rgb, BLACK, GREEN, RED};
use crate::rng::Rng;
use crate::state::ChannelState;

use super::RenderCx;

/// Rolling one-in-three subset: a device flashes only on beats where
/// `(300 + counter - rank) % 3 == 0`. The 300 bias keeps the expression
/// non-negative for every rank.
pub(super) fn three_steps<R: Rng>(
    data: &ChannelState,
    cx: &RenderCx<'_, R>,
    leds: &mut [Rgb],
    alternate: bool,
) {
    let phase =
        (300 + i32::from(data.repeat_counter) - i32::from(cx.formation.rank)) % 3;
    if phase != 0 {
        fill_corrected(leds, BLACK);
        return;
    }

    let base = if alternate {
        if data.repeat_counter % 2 == 0 { GREEN } else { RED }
    } else {
        data.flip.color
    };
    let color = ramp(
        data.delta_time_micros,
        data.flip.fadein_micros,
        data.flip.on_micros,
        data.flip.fadeout_micros,
        base,
    );
    fill_corrected(leds, color);
}

/// Per-rank hue that walks around the color wheel with the beat counter.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow_rank_beat<R: Rng>(
    data: &ChannelState,
    cx: &RenderCx<'_, R>,
    leds: &mut [Rgb],
) {
    let ranks = u32::from(cx.formation.ranks.max(1));
    let slot = (u32::from(cx.formation.rank) + u32::from(data.repeat_counter)) % (ranks + 1);
    let hue = ((255 * slot / ranks) % 256) as u8;
    let base = hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: 255,
    });
    let color = ramp(
        data.delta_time_micros,
        data.flip.fadein_micros,
        data.flip.on_micros,
        data.flip.fadeout_micros,
        base,
    );
    fill_corrected(leds, color);
}
