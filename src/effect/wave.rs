//! Position-ordered wave effects.
//!
//! Each rank offsets the shared envelope by its own start delay, so the
//! wave visibly travels across the physically ordered ranks. Rank 1 never
//! fades in (the wave starts there); the deepest ranks carry the peak
//! color in the vue-meter variant.

use super::envelope::ramp;
use super::fill_corrected;
use super::RenderCx;
use crate::color::{Rgb, BLUE, GREEN, RED};
use crate::rng::Rng;
use crate::state::ChannelState;

/// Level-meter sweep: green body rising to a red peak at the back ranks,
/// then collapsing symmetrically. `option` is the hold time of the peak
/// rank in milliseconds.
pub(super) fn vue_meter<R: Rng>(data: &ChannelState, cx: &RenderCx<'_, R>, leds: &mut [Rgb]) {
    let ranks = i64::from(cx.formation.effective_ranks());
    let rank = i64::from(cx.formation.effective_rank()).min(ranks);
    let duration = i64::from(data.duration_ms);
    let hold = i64::from(data.option).min(duration);

    let shift = 1_000 * (duration - hold) / (2 * (ranks - 1));
    let mut start_delay = (rank - 1) * shift;
    let mut fadein = 0;
    let fadeout = shift;
    let on = 1_000 * hold + 2 * (ranks - rank) * shift;

    let color = if ranks - rank <= 1 { RED } else { GREEN };

    if rank > 1 {
        fadein = shift;
        start_delay -= fadein;
    }

    fill_corrected(
        leds,
        ramp(data.delta_time_micros - start_delay, fadein, on, fadeout, color),
    );
}

/// One-way blue wave from the front rank to the back; once lit, a rank
/// stays on until the whole wave has passed.
pub(super) fn wave_back<R: Rng>(data: &ChannelState, cx: &RenderCx<'_, R>, leds: &mut [Rgb]) {
    let ranks = i64::from(cx.formation.effective_ranks());
    let rank = i64::from(cx.formation.effective_rank()).min(ranks);
    let duration = i64::from(data.duration_ms);
    let hold = i64::from(data.option).min(duration);

    let shift = 1_000 * (duration - hold) / (ranks - 1);
    let mut start_delay = (rank - 1) * shift;
    let mut fadein = 0;
    let fadeout = shift;
    let mut on = 1_000 * hold + (ranks - rank) * shift;

    if rank > 1 {
        fadein = shift;
        start_delay -= shift;
    }
    on += start_delay;

    fill_corrected(
        leds,
        ramp(data.delta_time_micros - start_delay, fadein, on, fadeout, BLUE),
    );
}
