//! Wire packet codec and effect id space.
//!
//! A `LightCommand` is the 20-byte packet every producer (mesh, long-range
//! remote, internal `stop`) hands to the engine. The byte layout is fixed
//! for interoperability across mixed-firmware fleets, so encoding and
//! decoding work on explicit offsets rather than in-memory layout.

use crate::color::Rgb;

/// Size of an encoded [`LightCommand`] in bytes.
pub const LIGHT_COMMAND_SIZE: usize = 20;

pub const EFFECT_KEEP_ALIVE: u8 = 0;
pub const EFFECT_NONE: u8 = 1;
pub const EFFECT_BLANK: u8 = 2;
pub const EFFECT_CHECK: u8 = 3;

// 10..=29: unsynchronized ambient / utility effects
pub const EFFECT_FIXED: u8 = 10;
pub const EFFECT_STROBE: u8 = 11;
pub const EFFECT_BREATH: u8 = 12;
pub const EFFECT_HEARTBEAT: u8 = 13;
pub const EFFECT_PROGRESS: u8 = 14;
pub const EFFECT_PROGRESS4: u8 = 15;
pub const EFFECT_PROGRESS_RAINBOW: u8 = 16;
pub const EFFECT_FIREFLY: u8 = 20;
pub const EFFECT_STARS: u8 = 21;

// 100..: beat-synchronized effects
pub const EFFECT_FLASH: u8 = 100;
pub const EFFECT_FLASH_ALTERNATE: u8 = 101;
pub const EFFECT_FLASH_YELLOW: u8 = 102;
pub const EFFECT_THREE_STEPS: u8 = 103;
pub const EFFECT_THREE_STEPS_ALTERNATE: u8 = 104;
pub const EFFECT_RAINBOW_RANK_BEAT: u8 = 105;
pub const EFFECT_VUE_METER: u8 = 106;
pub const EFFECT_WAVE_BACK: u8 = 107;

// 200..: meta-commands, handled by the transport and ignored here
pub const EFFECT_REBOOT: u8 = 200;
pub const EFFECT_FORCE_UPDATE: u8 = 201;
pub const EFFECT_FEEDBACK: u8 = 202;

/// Known effect ids that can be carried in a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    KeepAlive = EFFECT_KEEP_ALIVE,
    None = EFFECT_NONE,
    Blank = EFFECT_BLANK,
    Check = EFFECT_CHECK,
    Fixed = EFFECT_FIXED,
    Strobe = EFFECT_STROBE,
    Breath = EFFECT_BREATH,
    Heartbeat = EFFECT_HEARTBEAT,
    Progress = EFFECT_PROGRESS,
    Progress4 = EFFECT_PROGRESS4,
    ProgressRainbow = EFFECT_PROGRESS_RAINBOW,
    Firefly = EFFECT_FIREFLY,
    Stars = EFFECT_STARS,
    Flash = EFFECT_FLASH,
    FlashAlternate = EFFECT_FLASH_ALTERNATE,
    FlashYellow = EFFECT_FLASH_YELLOW,
    ThreeSteps = EFFECT_THREE_STEPS,
    ThreeStepsAlternate = EFFECT_THREE_STEPS_ALTERNATE,
    RainbowRankBeat = EFFECT_RAINBOW_RANK_BEAT,
    VueMeter = EFFECT_VUE_METER,
    WaveBack = EFFECT_WAVE_BACK,
    Reboot = EFFECT_REBOOT,
    ForceUpdate = EFFECT_FORCE_UPDATE,
    Feedback = EFFECT_FEEDBACK,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_KEEP_ALIVE => Self::KeepAlive,
            EFFECT_NONE => Self::None,
            EFFECT_BLANK => Self::Blank,
            EFFECT_CHECK => Self::Check,
            EFFECT_FIXED => Self::Fixed,
            EFFECT_STROBE => Self::Strobe,
            EFFECT_BREATH => Self::Breath,
            EFFECT_HEARTBEAT => Self::Heartbeat,
            EFFECT_PROGRESS => Self::Progress,
            EFFECT_PROGRESS4 => Self::Progress4,
            EFFECT_PROGRESS_RAINBOW => Self::ProgressRainbow,
            EFFECT_FIREFLY => Self::Firefly,
            EFFECT_STARS => Self::Stars,
            EFFECT_FLASH => Self::Flash,
            EFFECT_FLASH_ALTERNATE => Self::FlashAlternate,
            EFFECT_FLASH_YELLOW => Self::FlashYellow,
            EFFECT_THREE_STEPS => Self::ThreeSteps,
            EFFECT_THREE_STEPS_ALTERNATE => Self::ThreeStepsAlternate,
            EFFECT_RAINBOW_RANK_BEAT => Self::RainbowRankBeat,
            EFFECT_VUE_METER => Self::VueMeter,
            EFFECT_WAVE_BACK => Self::WaveBack,
            EFFECT_REBOOT => Self::Reboot,
            EFFECT_FORCE_UPDATE => Self::ForceUpdate,
            EFFECT_FEEDBACK => Self::Feedback,
            _ => return None,
        })
    }
}

pub const MODIFIER_IGNORE_LEFT: u8 = 1;
pub const MODIFIER_IGNORE_RIGHT: u8 = 2;
pub const MODIFIER_REPEAT: u8 = 4;
pub const MODIFIER_FLIP_FLOP: u8 = 8;
pub const MODIFIER_MASTER_INCLUDED: u8 = 16;
pub const MODIFIER_START_WITH_BEAT: u8 = 32;
pub const MODIFIER_SIX_COLUMN_MODE: u8 = 128;

/// Effect modifier bitmask.
///
/// Bits are independent; IGNORE_LEFT together with IGNORE_RIGHT renders
/// nothing, which is legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const fn contains(self, bit: u8) -> bool {
        self.0 & bit == bit
    }

    pub const fn with(self, bit: u8) -> Self {
        Self(self.0 | bit)
    }

    pub const fn ignore_left(self) -> bool {
        self.contains(MODIFIER_IGNORE_LEFT)
    }

    pub const fn ignore_right(self) -> bool {
        self.contains(MODIFIER_IGNORE_RIGHT)
    }

    pub const fn repeat(self) -> bool {
        self.contains(MODIFIER_REPEAT)
    }

    pub const fn flip_flop(self) -> bool {
        self.contains(MODIFIER_FLIP_FLOP)
    }

    pub const fn master_included(self) -> bool {
        self.contains(MODIFIER_MASTER_INCLUDED)
    }

    pub const fn start_with_beat(self) -> bool {
        self.contains(MODIFIER_START_WITH_BEAT)
    }

    pub const fn six_column_mode(self) -> bool {
        self.contains(MODIFIER_SIX_COLUMN_MODE)
    }
}

/// Per-channel color and fade timing block of a packet.
///
/// Timing fields are in units of 10 ms (0-2550 ms).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelParams {
    pub color: Rgb,
    pub fadein_time: u8,
    pub on_time: u8,
    pub fadeout_time: u8,
}

impl ChannelParams {
    fn decode(raw: &[u8]) -> Self {
        Self {
            color: Rgb {
                r: raw[0],
                g: raw[1],
                b: raw[2],
            },
            fadein_time: raw[3],
            on_time: raw[4],
            fadeout_time: raw[5],
        }
    }

    fn encode(&self, raw: &mut [u8]) {
        raw[0] = self.color.r;
        raw[1] = self.color.g;
        raw[2] = self.color.b;
        raw[3] = self.fadein_time;
        raw[4] = self.on_time;
        raw[5] = self.fadeout_time;
    }
}

/// Error returned when decoding from a buffer shorter than
/// [`LIGHT_COMMAND_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLength(pub usize);

/// Decoded light command packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightCommand {
    pub effect: u8,
    pub modifiers: Modifiers,
    pub repeat_counter: u16,
    pub duration_ms: u16,
    pub option: u16,
    pub left: ChannelParams,
    pub right: ChannelParams,
}

impl LightCommand {
    /// Shorthand for a command that carries only an effect id.
    pub const fn from_effect(effect: u8) -> Self {
        Self {
            effect,
            modifiers: Modifiers(0),
            repeat_counter: 0,
            duration_ms: 0,
            option: 0,
            left: ChannelParams {
                color: Rgb { r: 0, g: 0, b: 0 },
                fadein_time: 0,
                on_time: 0,
                fadeout_time: 0,
            },
            right: ChannelParams {
                color: Rgb { r: 0, g: 0, b: 0 },
                fadein_time: 0,
                on_time: 0,
                fadeout_time: 0,
            },
        }
    }

    /// Decode a command from its wire representation.
    pub fn decode(raw: &[u8]) -> Result<Self, InvalidLength> {
        if raw.len() < LIGHT_COMMAND_SIZE {
            return Err(InvalidLength(raw.len()));
        }
        Ok(Self {
            effect: raw[0],
            modifiers: Modifiers(raw[1]),
            repeat_counter: u16::from_le_bytes([raw[2], raw[3]]),
            duration_ms: u16::from_le_bytes([raw[4], raw[5]]),
            option: u16::from_le_bytes([raw[6], raw[7]]),
            left: ChannelParams::decode(&raw[8..14]),
            right: ChannelParams::decode(&raw[14..20]),
        })
    }

    /// Encode the command into its wire representation.
    pub fn encode(&self, raw: &mut [u8; LIGHT_COMMAND_SIZE]) {
        raw[0] = self.effect;
        raw[1] = self.modifiers.0;
        raw[2..4].copy_from_slice(&self.repeat_counter.to_le_bytes());
        raw[4..6].copy_from_slice(&self.duration_ms.to_le_bytes());
        raw[6..8].copy_from_slice(&self.option.to_le_bytes());
        self.left.encode(&mut raw[8..14]);
        self.right.encode(&mut raw[14..20]);
    }
}
