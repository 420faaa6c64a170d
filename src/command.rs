//! Zone request vocabulary.
//!
//! Requests address one zone each and travel through a [`Channel`] from
//! wherever control code runs to the engine, which drains them at the
//! start of every tick.

use crate::channel::{Channel, Receiver, Sender};
use crate::color::Rgb16;

/// Index of a zone inside the engine.
pub type ZoneId = u8;

/// Operation requested on a single zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneCommand {
    /// Feed a new input color.
    SetInputColor(Rgb16),
    /// Restart the color cycle from hue zero with a new period and
    /// enable it.
    ResetColorCycle { period: u16 },
    /// Change the color cycle period and enable it, keeping the current
    /// hue phase.
    RecalculateColorCycle { period: u16 },
    /// Turn hue cycling on or off.
    SetColorCycleEnabled(bool),
    /// Restart breathing from its startup phase with a new period and
    /// enable it.
    ResetBreathing { period: u16 },
    /// Turn breathing on or off.
    SetBreathingEnabled(bool),
    /// Park breathing in its pass-through phase.
    SetBreathingPassThrough,
    /// Add tick drift to the color cycle.
    AddCycleDrift(i16),
    /// Add tick drift to breathing.
    AddBreathingDrift(i16),
}

/// A command addressed to one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRequest {
    pub zone: ZoneId,
    pub command: ZoneCommand,
}

/// Type alias for request sender
pub type RequestSender<'a, const SIZE: usize> = Sender<'a, ZoneRequest, SIZE>;

/// Type alias for request receiver
pub type RequestReceiver<'a, const SIZE: usize> = Receiver<'a, ZoneRequest, SIZE>;

/// Type alias for the request channel
pub type RequestChannel<const SIZE: usize> = Channel<ZoneRequest, SIZE>;
