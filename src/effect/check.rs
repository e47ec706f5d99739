//! Formation check effect.
//!
//! Setup diagnostic, not a performance effect. The conductor resends the
//! CHECK command on a fixed interval with an incrementing counter; the
//! ensemble walks through every rank (left strips) and then every column
//! (right strips). A device lights its whole strip in the place color when
//! its own position is the one currently advertised, so a musician standing
//! in the wrong spot is immediately visible.

use super::RenderCx;
use crate::color::{Rgb, BLACK, FADED_BLUE, GREEN, ORANGE, RED};
use crate::gamma;
use crate::rng::Rng;
use crate::state::{ChannelState, Side};

/// Interval between CHECK command resends.
const CHECK_RESEND_TIME_MS: u16 = 250;
/// Time each rank/column is advertised.
const CHECK_RANK_TIME_MS: u16 = 1000;

pub(super) fn check<R: Rng>(data: &mut ChannelState, cx: &RenderCx<'_, R>, leds: &mut [Rgb]) {
    let formation = cx.formation;
    let columns = if data.modifiers.six_column_mode() {
        6
    } else {
        formation.columns
    };
    let ranks = u16::from(formation.ranks);
    let max_steps = ranks + u16::from(columns);
    if max_steps == 0 {
        super::fill_corrected(leds, FADED_BLUE);
        return;
    }

    data.step = (data.repeat_counter / (CHECK_RANK_TIME_MS / CHECK_RESEND_TIME_MS)) % max_steps;
    let led_position = if data.step < ranks {
        data.step
    } else {
        data.step - ranks
    };

    // Ranks are advertised first (left strips), columns after (right).
    let (mut max_leds, place_color, my_place, advertising) = match cx.side {
        Side::Left => (ranks, GREEN, u16::from(formation.rank), data.step < ranks),
        Side::Right => (
            u16::from(columns),
            RED,
            u16::from(formation.column),
            data.step >= ranks,
        ),
    };

    let mut strip_color = FADED_BLUE;
    let mut position_color = FADED_BLUE;
    let mut my_place_now = false;
    if advertising {
        position_color = ORANGE;
        if my_place == 1 + led_position {
            my_place_now = true;
            strip_color = place_color;
        }
    }
    if my_place_now {
        max_leds = data.leds_per_strip;
    }

    #[allow(clippy::cast_possible_truncation)]
    for (i, led) in leds.iter_mut().enumerate() {
        let i = i as u16;
        let color = if i >= max_leds {
            BLACK
        } else if my_place == i + 1 {
            place_color
        } else if i == led_position {
            position_color
        } else {
            strip_color
        };
        *led = gamma::corrected(color);
    }

    if data.last_step != data.step {
        data.last_step = data.step;
    }
}
