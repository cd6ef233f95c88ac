//! Phase-driven monitors.
//!
//! A [`PhaseMonitor`] is a small state machine (`None` -> `InProgress` -> `Done`)
//! advanced only by phase reports from the transition driver. What happens on
//! each phase is delegated to a [`PhaseReaction`]. Two reactions exist:
//!
//! - [`StatusTracker`] keeps the cached [`LightStatus`] and notifies the application.
//! - [`SequencePulse`] flashes the bulb on every identify tick.

use crate::driver::{PhaseCallback, TransitionDriver};
use crate::processor::CommandProcessor;
use crate::property::PropertyStore;
use crate::time::TransitionTime;
use crate::types::{ActionPhase, LightStatus};

/// Behavior plugged into a [`PhaseMonitor`].
pub trait PhaseReaction {
    /// Called for every [`ActionPhase::InProgress`] report.
    fn in_progress<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        _processor: &mut CommandProcessor<S, D>,
    ) {
    }

    /// Called for the [`ActionPhase::Done`] report.
    fn done<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        _processor: &mut CommandProcessor<S, D>,
    ) {
    }

    /// Called after every handled phase, including [`ActionPhase::None`].
    fn notify(&mut self, _phase: ActionPhase) {}
}

/// Phase state machine parameterized by its reaction.
#[derive(Debug, Clone)]
pub struct PhaseMonitor<R: PhaseReaction> {
    reaction: R,
    phase: ActionPhase,
}

impl<R: PhaseReaction> PhaseMonitor<R> {
    pub const fn new(reaction: R) -> Self {
        Self {
            reaction,
            phase: ActionPhase::None,
        }
    }

    /// Last phase handled.
    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn reaction(&self) -> &R {
        &self.reaction
    }

    pub fn reaction_mut(&mut self) -> &mut R {
        &mut self.reaction
    }

    /// Handles one phase report.
    ///
    /// Must be called from the main execution context, never re-entered from
    /// inside a command.
    pub fn handle<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        phase: ActionPhase,
        processor: &mut CommandProcessor<S, D>,
    ) {
        match phase {
            ActionPhase::InProgress => self.reaction.in_progress(processor),
            ActionPhase::Done => self.reaction.done(processor),
            ActionPhase::None => {}
        }
        self.phase = phase;
        self.reaction.notify(phase);
    }

    /// Returns to `None` without running the reaction.
    pub fn reset(&mut self) {
        self.phase = ActionPhase::None;
    }
}

/// Keeps the application-visible status in sync with tracked transitions.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    status: LightStatus,
    callback: Option<PhaseCallback>,
    step: TransitionTime,
    /// Duration of the dispatched transition, loaded on its first progress report.
    pending: Option<TransitionTime>,
}

impl StatusTracker {
    pub fn new(status: LightStatus, step: TransitionTime) -> Self {
        Self {
            status,
            callback: None,
            step,
            pending: None,
        }
    }

    /// Current cached snapshot.
    pub fn status(&self) -> &LightStatus {
        &self.status
    }

    /// Starts tracking a dispatched transition of length `duration`.
    ///
    /// The cached status is untouched until the first progress report.
    pub fn arm(&mut self, duration: TransitionTime, callback: Option<PhaseCallback>) {
        self.pending = Some(duration);
        self.callback = callback;
    }

    /// Registers `callback` for upcoming reports without seeding the countdown.
    pub fn set_callback(&mut self, callback: Option<PhaseCallback>) {
        self.callback = callback;
    }
}

impl PhaseReaction for StatusTracker {
    fn in_progress<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        _processor: &mut CommandProcessor<S, D>,
    ) {
        // Floored at one step; only Done brings it to zero.
        let remaining = self.pending.take().unwrap_or(self.status.time_remaining);
        self.status.time_remaining = remaining.saturating_sub(self.step).max(self.step);
    }

    fn done<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        processor: &mut CommandProcessor<S, D>,
    ) {
        self.pending = None;
        self.status = LightStatus::from_store(processor.store());
    }

    fn notify(&mut self, phase: ActionPhase) {
        if let Some(callback) = self.callback {
            callback(phase);
        }
    }
}

/// Identify indicator: every tick flashes full brightness once.
///
/// Fire-and-forget: the flush is not tracked, and `Done` or `None` reports
/// do nothing.
#[derive(Debug, Clone, Copy)]
pub struct SequencePulse {
    flush: TransitionTime,
}

impl SequencePulse {
    pub const fn new(flush: TransitionTime) -> Self {
        Self { flush }
    }
}

impl PhaseReaction for SequencePulse {
    fn in_progress<S: PropertyStore, D: TransitionDriver>(
        &mut self,
        processor: &mut CommandProcessor<S, D>,
    ) {
        let saved = processor.store().default_transition();
        processor.flush(self.flush);
        processor.store_mut().set_default_transition(saved);
    }
}
