//! Single-envelope flash family.

use super::envelope::ramp;
use super::fill_corrected;
use crate::color::{dimmed, BLACK, Rgb};
use crate::state::ChannelState;

/// One application of the shared envelope over the whole strip.
pub(super) fn flash(data: &ChannelState, leds: &mut [Rgb]) {
    let flip = &data.flip;
    let color = ramp(
        data.delta_time_micros,
        flip.fadein_micros,
        flip.on_micros,
        flip.fadeout_micros,
        flip.color,
    );
    fill_corrected(leds, color);
}

/// Fade in once, then stay on until superseded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn fixed(data: &ChannelState, leds: &mut [Rgb]) {
    let flip = &data.flip;
    let delta = data.delta_time_micros;
    let color = if delta < 0 {
        BLACK
    } else if flip.fadein_micros > 0 && delta < flip.fadein_micros {
        dimmed(flip.color, (255 * delta / flip.fadein_micros) as u8)
    } else {
        flip.color
    };
    fill_corrected(leds, color);
}
