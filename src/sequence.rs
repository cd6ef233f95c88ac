//! Identify/blink sequence control.
//!
//! The timer that paces identify sequences lives outside the core. While a
//! sequence runs, each of its ticks is delivered to
//! [`LightController::handle_phase`](crate::LightController::handle_phase) as
//! [`PhaseEvent::sequence_tick`](crate::PhaseEvent::sequence_tick).

use crate::driver::PhaseCallback;
use crate::error::FailureKind;

/// Kind of indicator sequence to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceMode {
    /// Attention pulse used while the bulb is being identified.
    Identify,
    /// Repeating blink, e.g. while commissioning.
    Blink,
    /// Slow breathing indicator.
    Breathe,
}

/// Trait for abstracting the sequence timer subsystem.
pub trait SequenceController {
    /// Prepares the timers.
    fn initialize(&mut self) -> Result<(), FailureKind>;

    /// Starts a sequence. Each tick must come back as a sequence phase event.
    fn trigger_sequence(&mut self, mode: SequenceMode);

    /// Cancels the pending sequence timer, if any.
    fn revoke_pending_sequence(&mut self);

    /// Arms the factory-reset indication, reporting its progress to `callback`.
    fn trigger_reset_action(&mut self, callback: PhaseCallback);
}
