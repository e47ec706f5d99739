#![no_std]

pub mod channel;
pub mod color;
pub mod effect;
pub mod engine;
pub mod frame_scheduler;
pub mod gamma;
mod intake;
pub mod packet;
pub mod position;
pub mod rng;
pub mod state;

pub use channel::{CommandChannel, CommandReceiver, CommandSender, Submission};
pub use engine::{EngineConfig, LightEngine};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::ws2812_lut;
pub use packet::{ChannelParams, EffectId, LightCommand, Modifiers, LIGHT_COMMAND_SIZE};
pub use position::Formation;
pub use state::{ChannelState, FlipPayload, Side};
pub use rng::{Rng, SplitMix64};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract two-strip output trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait and only calls it when a
/// rendered frame differs from the previously flushed one.
pub trait StripOutput {
    /// Write both strips to the hardware
    fn write(&mut self, left: &[Rgb], right: &[Rgb]);
}
