//! Breath and heartbeat: multi-segment envelopes over one repeat cycle.
//!
//! Phase boundaries are fixed fractions of `duration_ms`. They are design
//! constants, not packet parameters.

use super::fill_corrected;
use crate::color::{dimmed, Rgb, BLACK};
use crate::state::ChannelState;

// Breath phases: 35% in, 10% on, 35% out, remainder at the floor.
const BREATH_FADEIN_PER_MS: i64 = 350;
const BREATH_ON_PER_MS: i64 = 100;
const BREATH_FADEOUT_PER_MS: i64 = 350;
const BREATH_FLOOR: i64 = 63;

// Heartbeat: systole 5% in / 10% on / 25% out, diastole takes over at 35%
// with 10% on and 45% out.
const SYSTOLE_FADEIN_PER_MS: i64 = 50;
const SYSTOLE_ON_PER_MS: i64 = 100;
const SYSTOLE_FADEOUT_PER_MS: i64 = 250;
const DIASTOLE_AT_PER_MS: i64 = 350;
const DIASTOLE_ON_PER_MS: i64 = 100;
const DIASTOLE_FADEOUT_PER_MS: i64 = 450;

/// Slow breathing between a dim floor and full brightness.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn breath(data: &ChannelState, leds: &mut [Rgb]) {
    let duration = i64::from(data.duration_ms);
    let fadein = BREATH_FADEIN_PER_MS * duration;
    let on = BREATH_ON_PER_MS * duration;
    let fadeout = BREATH_FADEOUT_PER_MS * duration;
    let delta = data.delta_time_micros;
    let base = data.flip.color;

    let color = if delta < 0 {
        BLACK
    } else if fadein > 0 && delta < fadein {
        dimmed(base, (BREATH_FLOOR + 192 * delta / fadein) as u8)
    } else if delta < fadein + on {
        base
    } else if fadeout > 0 && delta < fadein + on + fadeout {
        dimmed(
            base,
            (BREATH_FLOOR + 192 * (fadeout - (delta - fadein - on)) / fadeout) as u8,
        )
    } else {
        dimmed(base, BREATH_FLOOR as u8)
    };
    fill_corrected(leds, color);
}

/// Double pulse: a strong systole followed by a dimmer diastole.
///
/// The diastole brightness comes from the packet's `option` field.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn heartbeat(data: &ChannelState, leds: &mut [Rgb]) {
    let duration = i64::from(data.duration_ms);
    let fadein = SYSTOLE_FADEIN_PER_MS * duration;
    let on = SYSTOLE_ON_PER_MS * duration;
    let fadeout = SYSTOLE_FADEOUT_PER_MS * duration;
    let diastole_at = DIASTOLE_AT_PER_MS * duration;
    let diastole_on = DIASTOLE_ON_PER_MS * duration;
    let diastole_fadeout = DIASTOLE_FADEOUT_PER_MS * duration;
    let delta = data.delta_time_micros;
    let base = data.flip.color;
    let diastole = dimmed(base, data.option.min(255) as u8);

    let color = if delta < 0 {
        BLACK
    } else if delta >= diastole_at {
        let d = delta - diastole_at;
        if d < diastole_on {
            diastole
        } else if diastole_fadeout > 0 && d < diastole_on + diastole_fadeout {
            dimmed(
                diastole,
                (255 * (diastole_on + diastole_fadeout - d) / diastole_fadeout) as u8,
            )
        } else {
            BLACK
        }
    } else if fadein > 0 && delta < fadein {
        dimmed(base, (255 * delta / fadein) as u8)
    } else if delta < fadein + on {
        base
    } else if fadeout > 0 && delta < fadein + on + fadeout {
        dimmed(base, (255 * (fadeout - (delta - fadein - on)) / fadeout) as u8)
    } else {
        BLACK
    };
    fill_corrected(leds, color);
}
