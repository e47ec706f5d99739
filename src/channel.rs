//! Portable bounded submission channel for `no_std` environments.
//!
//! The transport layer (mesh receive callback, interrupt context, another
//! task) pushes decoded commands here; the tick loop drains them. Built on
//! `critical-section` and `heapless::Deque`, so the handoff into the engine
//! is a single atomic queue operation and the active channel state is never
//! shared across contexts.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::Deque;

use crate::packet::LightCommand;

/// A decoded command together with its transport metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub packet_id: u16,
    pub command: LightCommand,
    /// Estimated one-way delivery latency for this packet.
    pub latency: Duration,
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrySendError(pub Submission);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, thread-safe command channel.
///
/// Uses critical sections for synchronization, making it suitable for
/// embedded environments. Backed by a fixed-size `heapless::Deque`.
pub struct CommandChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Submission, SIZE>>>,
}

impl<const SIZE: usize> CommandChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    ///
    /// Multiple senders can coexist; they share access to the same queue.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { channel: self }
    }

    /// Get a receiver handle for this channel.
    ///
    /// The engine's tick loop should be the only receiver.
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { channel: self }
    }

    fn try_send(&self, value: Submission) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    fn try_receive(&self) -> Result<Submission, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const SIZE: usize> Default for CommandChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`CommandChannel`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Submit a decoded command to the engine.
    ///
    /// Returns `Err(TrySendError(..))` if the channel is full; the command
    /// is then dropped, which is equivalent to a lost packet.
    pub fn submit(
        &self,
        packet_id: u16,
        command: LightCommand,
        latency: Duration,
    ) -> Result<(), TrySendError> {
        self.channel.try_send(Submission {
            packet_id,
            command,
            latency,
        })
    }
}

/// A receiver handle for a [`CommandChannel`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Try to receive a pending submission.
    pub fn try_receive(&self) -> Result<Submission, TryReceiveError> {
        self.channel.try_receive()
    }
}
