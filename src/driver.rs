//! Transition driver abstraction and phase routing.

use crate::error::FailureKind;
use crate::types::{ActionPhase, Glow};

/// Application callback invoked with each observed phase.
pub type PhaseCallback = fn(ActionPhase);

/// Where the phase reports of a dispatched transition must be delivered.
///
/// The driver stores the sink it received with [`TransitionDriver::set_glow`]
/// and tags every report with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseSink {
    /// Nobody tracks this transition; reports are dropped.
    Discard,
    /// The status monitor tracks this transition.
    Status,
    /// Reports feed the identify pulse monitor.
    Sequence,
}

/// A phase report tagged with its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseEvent {
    pub sink: PhaseSink,
    pub phase: ActionPhase,
}

impl PhaseEvent {
    #[inline]
    pub const fn new(sink: PhaseSink, phase: ActionPhase) -> Self {
        Self { sink, phase }
    }

    /// An identify tick produced by the sequence controller's timer.
    #[inline]
    pub const fn sequence_tick() -> Self {
        Self::new(PhaseSink::Sequence, ActionPhase::InProgress)
    }
}

/// Trait for abstracting the hardware that animates the LEDs.
///
/// Implement this for your PWM or LED-driver backend. After `set_glow` the
/// driver reports zero or more [`ActionPhase::InProgress`] followed by exactly
/// one [`ActionPhase::Done`] (or nothing, if superseded), each wrapped in a
/// [`PhaseEvent`] carrying the given sink. Reports are handed back to
/// [`LightController::handle_phase`](crate::LightController::handle_phase),
/// usually through a [`PhaseChannel`](crate::PhaseChannel) when they originate
/// in an interrupt.
///
/// The driver is the source of truth for final property values: it writes
/// them to the property store before reporting `Done`.
pub trait TransitionDriver {
    /// Prepares the hardware.
    fn initialize(&mut self) -> Result<(), FailureKind>;

    /// Starts a transition towards `glow`, replacing any running one.
    fn set_glow(&mut self, glow: Glow, sink: PhaseSink);
}
