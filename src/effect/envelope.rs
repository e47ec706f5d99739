//! Shared fade-in / on / fade-out brightness envelope.

use crate::color::{dimmed, Rgb, BLACK};

/// Evaluate the envelope at `delta` microseconds after the logical start.
///
/// Negative delta means the effect has not started yet and renders black.
/// A zero fade phase is skipped rather than divided by.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn ramp(delta: i64, fadein: i64, on: i64, fadeout: i64, color: Rgb) -> Rgb {
    if delta < 0 {
        BLACK
    } else if fadein > 0 && delta < fadein {
        dimmed(color, (255 * delta / fadein) as u8)
    } else if delta < fadein + on {
        color
    } else if fadeout > 0 && delta < fadein + on + fadeout {
        dimmed(color, (255 * (fadein + on + fadeout - delta) / fadeout) as u8)
    } else {
        BLACK
    }
}
