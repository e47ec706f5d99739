//! Effect scheduler: the per-channel state machine.
//!
//! Each tick runs the same three phases for both channels: promote a due
//! staged command (transition detection), recompute the timeline from the
//! logical start instant, then resolve the flip-flop payload assignment and
//! dispatch the render routine. All timeline math derives from
//! `start_time`, never from packet arrival or frame count, so devices with
//! free-running clocks and different packet paths converge on the same
//! picture.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use embassy_time::{Duration, Instant};

use crate::channel::CommandReceiver;
use crate::color::{Rgb, GREEN, RED};
use crate::effect::{self, RenderCx};
use crate::intake::Intake;
use crate::packet::{
    LightCommand, EFFECT_BLANK, EFFECT_FLASH_ALTERNATE, EFFECT_NONE, MODIFIER_FLIP_FLOP,
};
use crate::position::Formation;
use crate::rng::Rng;
use crate::state::{ChannelState, FlipPayload, Side};

/// Configuration for the light engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Number of LEDs on each strip. Clamped to the compile-time buffer
    /// size at construction; never checked again per tick.
    pub leds_per_strip: u16,
    /// This device's position in the formation.
    pub formation: Formation,
}

/// Two-channel effect engine.
///
/// `MAX_LEDS` bounds the per-strip frame buffers;
/// `COMMAND_CHANNEL_SIZE` is the capacity of the submission channel the
/// engine drains on every tick.
pub struct LightEngine<'a, R: Rng, const MAX_LEDS: usize, const COMMAND_CHANNEL_SIZE: usize> {
    commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    intake: Intake,
    formation: Formation,
    leds_per_strip: usize,
    channels: [ChannelState; 2],
    flip_source: [FlipPayload; 2],
    play_counter: [u16; 2],
    last_play_counter: [u16; 2],
    frames: [[Rgb; MAX_LEDS]; 2],
    rng: R,
}

impl<'a, R: Rng, const MAX_LEDS: usize, const COMMAND_CHANNEL_SIZE: usize>
    LightEngine<'a, R, MAX_LEDS, COMMAND_CHANNEL_SIZE>
{
    pub fn new(
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
        config: &EngineConfig,
        rng: R,
    ) -> Self {
        let leds_per_strip = usize::from(config.leds_per_strip).min(MAX_LEDS);
        Self {
            commands,
            intake: Intake::new(),
            formation: config.formation,
            leds_per_strip,
            channels: [ChannelState::empty(); 2],
            flip_source: [FlipPayload::default(); 2],
            play_counter: [0; 2],
            last_play_counter: [0; 2],
            frames: [[Rgb { r: 0, g: 0, b: 0 }; MAX_LEDS]; 2],
            rng,
        }
    }

    /// Submit a decoded command directly (same-context producers).
    ///
    /// Duplicate packet ids are ignored; the command is staged and becomes
    /// active only once its release instant arrives inside [`Self::tick`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn submit(
        &mut self,
        packet_id: u16,
        command: &LightCommand,
        latency: Duration,
        now: Instant,
    ) {
        let mut command = *command;
        // FLASH_ALTERNATE carries its flip-flop contract implicitly; a
        // packet without colors gets the classic red/green pair.
        if command.effect == EFFECT_FLASH_ALTERNATE {
            command.modifiers = command.modifiers.with(MODIFIER_FLIP_FLOP);
            if color_sum(&command) == 0 {
                command.left.color = RED;
                command.right.color = GREEN;
            }
        }
        self.intake.submit(
            packet_id,
            &command,
            latency,
            now.as_micros() as i64,
            self.leds_per_strip as u16,
        );
    }

    /// Signal a detected beat; releases staged START_WITH_BEAT commands.
    #[allow(clippy::cast_possible_truncation)]
    pub fn notify_beat(&mut self, now: Instant) {
        self.intake.notify_beat(now.as_micros() as i64);
    }

    /// Clear both channels by staging an internal BLANK command.
    ///
    /// Bypasses packet-id deduplication so a stop always wins.
    #[allow(clippy::cast_possible_truncation)]
    pub fn stop(&mut self) {
        let blank = LightCommand::from_effect(EFFECT_BLANK);
        for side in [Side::Left, Side::Right] {
            self.intake.stage(
                0,
                &blank,
                side,
                Duration::from_micros(0),
                0,
                self.leds_per_strip as u16,
            );
        }
    }

    /// Advance the whole state machine by one frame.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, now: Instant) {
        let now_micros = now.as_micros() as i64;

        while let Ok(submission) = self.commands.try_receive() {
            self.submit(submission.packet_id, &submission.command, submission.latency, now);
        }

        // Phase 1: promote released commands, whole block at a time.
        let mut effect_changed = [false; 2];
        for side in [Side::Left, Side::Right] {
            let lr = side.index();
            self.channels[lr].applied = false;
            if let Some(mut data) = self.intake.take_released(side, now_micros) {
                effect::apply_release_defaults(&mut data, side, &mut self.rng);
                effect_changed[lr] = self.channels[lr].effect != data.effect;
                data.applied = true;
                self.flip_source[lr] = data.flip;
                self.channels[lr] = data;
                #[cfg(feature = "esp32-log")]
                println!("channel {} -> effect {}", lr, self.channels[lr].effect);
            }
        }

        for side in [Side::Left, Side::Right] {
            let lr = side.index();

            // NONE is inert: no transition, no repetition.
            if self.channels[lr].effect == EFFECT_NONE {
                effect_changed[lr] = false;
                self.channels[lr].applied = false;
                self.channels[lr].repeat = false;
            }
            // Guards the modulo below.
            if self.channels[lr].duration_ms == 0 {
                self.channels[lr].repeat = false;
            }

            // Phase 2: timeline arithmetic.
            let duration_micros = self.channels[lr].duration_micros();
            let elapsed = now_micros - self.channels[lr].start_time_micros;
            if effect_changed[lr] {
                self.channels[lr].last_step = u16::MAX;
                self.play_counter[lr] = self.channels[lr].repeat_counter;
                self.last_play_counter[lr] = self.channels[lr].repeat_counter;
            } else if self.channels[lr].repeat {
                self.play_counter[lr] = self
                    .channels[lr]
                    .repeat_counter
                    .wrapping_add(elapsed.div_euclid(duration_micros) as u16);
            } else {
                // Pinned, so the flip stays synchronized between devices.
                self.play_counter[lr] = self.channels[lr].repeat_counter;
            }
            self.channels[lr].delta_time_micros = if self.channels[lr].repeat {
                elapsed.rem_euclid(duration_micros)
            } else {
                elapsed
            };

            // Phase 3: flip assignment on transition, release or rollover.
            let rolled = self.play_counter[lr] != self.last_play_counter[lr];
            if effect_changed[lr] || self.channels[lr].applied || rolled {
                let swapped = self.channels[lr].modifiers.flip_flop()
                    && self.play_counter[lr] % 2 == 1;
                self.channels[lr].flip = if swapped {
                    self.flip_source[side.other().index()]
                } else {
                    self.flip_source[lr]
                };
            }
            self.last_play_counter[lr] = self.play_counter[lr];

            // Phase 4: dispatch.
            let mut cx = RenderCx {
                side,
                formation: self.formation,
                now_micros,
                rng: &mut self.rng,
            };
            effect::render(
                &mut self.channels[lr],
                &mut cx,
                &mut self.frames[lr][..self.leds_per_strip],
            );
        }
    }

    /// Rendered frames of both strips.
    pub fn frames(&self) -> (&[Rgb], &[Rgb]) {
        (
            &self.frames[0][..self.leds_per_strip],
            &self.frames[1][..self.leds_per_strip],
        )
    }

    /// Active state of one channel (observability, tests).
    pub fn channel(&self, side: Side) -> &ChannelState {
        &self.channels[side.index()]
    }

    /// Timestamp of the last KEEP_ALIVE packet, if any was seen.
    #[allow(clippy::cast_sign_loss)]
    pub fn last_keep_alive(&self) -> Option<Instant> {
        self.intake
            .last_keep_alive_micros()
            .map(|micros| Instant::from_micros(micros.max(0) as u64))
    }

    pub const fn formation(&self) -> Formation {
        self.formation
    }
}

fn color_sum(command: &LightCommand) -> u16 {
    let left = &command.left.color;
    let right = &command.right.color;
    u16::from(left.r)
        + u16::from(left.g)
        + u16::from(left.b)
        + u16::from(right.r)
        + u16::from(right.g)
        + u16::from(right.b)
}
