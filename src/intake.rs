//! Packet intake: deduplication, staging and latency-aligned release.
//!
//! A submitted command never touches the active channel state directly. It
//! is staged per channel and promoted inside the tick loop once its release
//! instant arrives. The release instant is `submit + latency`, so devices
//! whose latency estimates point at the same absolute instant start the
//! effect on the same shared timeline.

use embassy_time::Duration;

use crate::packet::{LightCommand, EFFECT_KEEP_ALIVE};
use crate::state::{ChannelState, Side};

#[derive(Debug, Clone, Copy)]
struct Staged {
    data: ChannelState,
    submitted_micros: i64,
    release_micros: i64,
    wait_for_beat: bool,
}

/// Staging area between the transport boundary and the scheduler.
#[derive(Debug)]
pub(crate) struct Intake {
    last_packet_id: Option<u16>,
    staged: [Option<Staged>; 2],
    last_keep_alive_micros: Option<i64>,
    last_beat_micros: Option<i64>,
}

impl Intake {
    pub(crate) const fn new() -> Self {
        Self {
            last_packet_id: None,
            staged: [None, None],
            last_keep_alive_micros: None,
            last_beat_micros: None,
        }
    }

    /// Stage a command for every channel its modifiers do not ignore.
    ///
    /// Re-delivery of the last processed packet id is a no-op; a KEEP_ALIVE
    /// only refreshes liveness bookkeeping.
    pub(crate) fn submit(
        &mut self,
        packet_id: u16,
        command: &LightCommand,
        latency: Duration,
        now_micros: i64,
        leds_per_strip: u16,
    ) {
        if self.last_packet_id == Some(packet_id) {
            return;
        }
        self.last_packet_id = Some(packet_id);

        if command.effect == EFFECT_KEEP_ALIVE {
            self.last_keep_alive_micros = Some(now_micros);
            return;
        }

        for side in [Side::Left, Side::Right] {
            let ignored = match side {
                Side::Left => command.modifiers.ignore_left(),
                Side::Right => command.modifiers.ignore_right(),
            };
            if ignored {
                continue;
            }
            self.stage(packet_id, command, side, latency, now_micros, leds_per_strip);
        }
    }

    /// Stage one side unconditionally (used by `stop`, which must not be
    /// swallowed by packet-id deduplication).
    pub(crate) fn stage(
        &mut self,
        packet_id: u16,
        command: &LightCommand,
        side: Side,
        latency: Duration,
        now_micros: i64,
        leds_per_strip: u16,
    ) {
        let data = ChannelState::from_command(packet_id, command, side, latency, leds_per_strip);
        self.staged[side.index()] = Some(Staged {
            data,
            submitted_micros: now_micros,
            release_micros: now_micros + latency.as_micros() as i64,
            wait_for_beat: command.modifiers.start_with_beat(),
        });
    }

    pub(crate) fn notify_beat(&mut self, now_micros: i64) {
        self.last_beat_micros = Some(now_micros);
    }

    pub(crate) const fn last_keep_alive_micros(&self) -> Option<i64> {
        self.last_keep_alive_micros
    }

    /// Promote the staged command for a channel once it is due.
    ///
    /// The whole parameter block is returned by value; the caller swaps it
    /// into the active state in one assignment. The logical start time is
    /// pinned to the release instant (or the triggering beat), not to the
    /// tick that happened to observe it.
    pub(crate) fn take_released(&mut self, side: Side, now_micros: i64) -> Option<ChannelState> {
        let staged = self.staged[side.index()].as_ref()?;

        let start_micros = if staged.wait_for_beat {
            match self.last_beat_micros {
                Some(beat) if beat >= staged.submitted_micros => beat,
                _ => return None,
            }
        } else {
            if now_micros < staged.release_micros {
                return None;
            }
            staged.release_micros
        };

        let mut staged = self.staged[side.index()].take()?;
        staged.data.start_time_micros = start_micros;
        Some(staged.data)
    }
}
