//! Top-level bulb controller.
//!
//! Provides [`LightController`], which owns the command processor, both phase
//! monitors and the sequence controller for one bulb. It is constructed once
//! at bring-up and passed by reference to whatever delivers commands
//! (Bluetooth mesh, Zigbee, Z-Wave, a button task).
//!
//! Concurrency model: everything runs in one cooperative context. Commands
//! must be submitted one at a time, and phase reports produced in interrupt
//! context must be queued (see [`PhaseChannel`](crate::PhaseChannel)) and handed
//! in from the main loop.

use crate::channel::PhaseReceiver;
use crate::config::LightConfig;
use crate::driver::{PhaseCallback, PhaseEvent, PhaseSink, TransitionDriver};
use crate::error::{InitError, Subsystem};
use crate::monitor::{PhaseMonitor, SequencePulse, StatusTracker};
use crate::processor::CommandProcessor;
use crate::property::PropertyStore;
use crate::sequence::{SequenceController, SequenceMode};
use crate::time::TransitionTime;
use crate::types::{
    ActionPhase, ColorTemperatureCommand, Glow, HueSaturationCommand, LightStatus,
};

/// Device-agnostic control core of one smart bulb.
///
/// # Type Parameters
/// * `S` - Property store implementation
/// * `D` - Transition driver implementation
/// * `Q` - Sequence controller implementation
pub struct LightController<S: PropertyStore, D: TransitionDriver, Q: SequenceController> {
    processor: CommandProcessor<S, D>,
    status: PhaseMonitor<StatusTracker>,
    pulse: PhaseMonitor<SequencePulse>,
    sequencer: Q,
}

impl<S: PropertyStore, D: TransitionDriver, Q: SequenceController> LightController<S, D, Q> {
    /// Brings the bulb up.
    ///
    /// With `reset` set, properties are restored to factory defaults first.
    /// Subsystems are initialized in order: property store, sequence control,
    /// transition driver. The status cache is then loaded from the store.
    ///
    /// # Errors
    /// Returns the first subsystem that failed. The bulb must not process
    /// commands in that case.
    pub fn init(
        mut store: S,
        mut driver: D,
        mut sequencer: Q,
        config: LightConfig,
        reset: bool,
    ) -> Result<Self, InitError> {
        store
            .initialize(reset)
            .map_err(|kind| InitError::new(Subsystem::PropertyStore, kind))?;
        sequencer
            .initialize()
            .map_err(|kind| InitError::new(Subsystem::SequenceControl, kind))?;
        driver
            .initialize()
            .map_err(|kind| InitError::new(Subsystem::TransitionDriver, kind))?;

        let status = LightStatus::from_store(&store);
        debug!("light core up, reset={}", reset);

        Ok(Self {
            processor: CommandProcessor::new(store, driver, config),
            status: PhaseMonitor::new(StatusTracker::new(status, config.countdown_step)),
            pulse: PhaseMonitor::new(SequencePulse::new(config.flush_duration)),
            sequencer,
        })
    }

    /// Current cached status.
    ///
    /// Reflects the last completed tracked transition, or the values read at
    /// initialization.
    pub fn status(&self) -> &LightStatus {
        self.status.reaction().status()
    }

    /// Last phase seen by the status monitor.
    pub fn phase(&self) -> ActionPhase {
        self.status.phase()
    }

    /// Turns the light on. No-op if it is already on.
    pub fn turn_on(
        &mut self,
        transition: TransitionTime,
        callback: Option<PhaseCallback>,
    ) -> Option<Glow> {
        let glow = self.processor.turn_on(transition, PhaseSink::Status)?;
        self.track(glow, callback);
        Some(glow)
    }

    /// Turns the light off. No-op if it is already off or at zero brightness.
    pub fn turn_off(
        &mut self,
        transition: TransitionTime,
        callback: Option<PhaseCallback>,
    ) -> Option<Glow> {
        let glow = self.processor.turn_off(transition, PhaseSink::Status)?;
        self.track(glow, callback);
        Some(glow)
    }

    /// Sets color temperature and brightness.
    ///
    /// Without a callback the transition is not tracked and the status cache
    /// is left alone.
    pub fn set_color_temperature(
        &mut self,
        command: ColorTemperatureCommand,
        callback: Option<PhaseCallback>,
    ) -> Option<Glow> {
        let glow = self
            .processor
            .set_color_temperature(command, Self::sink_for(callback))?;
        self.track_if_requested(glow, callback);
        Some(glow)
    }

    /// Sets hue, saturation and brightness.
    ///
    /// Without a callback the transition is not tracked and the status cache
    /// is left alone.
    pub fn set_hue_saturation(
        &mut self,
        command: HueSaturationCommand,
        callback: Option<PhaseCallback>,
    ) -> Option<Glow> {
        let glow = self
            .processor
            .set_hue_saturation(command, Self::sink_for(callback))?;
        self.track_if_requested(glow, callback);
        Some(glow)
    }

    /// Starts an indicator sequence.
    pub fn start_sequence(&mut self, mode: SequenceMode) {
        debug!("start sequence {:?}", mode);
        self.sequencer.trigger_sequence(mode);
    }

    /// Stops the running sequence and forces the bulb fully off.
    pub fn halt_sequence(&mut self) {
        debug!("halt sequence");
        self.sequencer.revoke_pending_sequence();
        self.pulse.reset();
        self.processor.force_off();
    }

    /// Registers the callback reporting factory-reset progress.
    pub fn register_reset(&mut self, callback: PhaseCallback) {
        self.sequencer.trigger_reset_action(callback);
    }

    /// Routes one phase report to its monitor.
    pub fn handle_phase(&mut self, event: PhaseEvent) {
        match event.sink {
            PhaseSink::Discard => {}
            PhaseSink::Status => self.status.handle(event.phase, &mut self.processor),
            PhaseSink::Sequence => self.pulse.handle(event.phase, &mut self.processor),
        }
    }

    /// Drains every queued phase report. Returns how many were handled.
    pub fn process_pending<const SIZE: usize>(&mut self, events: &PhaseReceiver<'_, SIZE>) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_receive() {
            self.handle_phase(event);
            handled += 1;
        }
        handled
    }

    pub fn store(&self) -> &S {
        self.processor.store()
    }

    pub fn driver(&self) -> &D {
        self.processor.driver()
    }

    pub fn driver_mut(&mut self) -> &mut D {
        self.processor.driver_mut()
    }

    pub fn sequencer(&self) -> &Q {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Q {
        &mut self.sequencer
    }

    fn sink_for(callback: Option<PhaseCallback>) -> PhaseSink {
        if callback.is_some() {
            PhaseSink::Status
        } else {
            PhaseSink::Discard
        }
    }

    fn track_if_requested(&mut self, glow: Glow, callback: Option<PhaseCallback>) {
        if callback.is_some() {
            self.track(glow, callback);
        } else {
            self.status.reaction_mut().set_callback(None);
        }
    }

    fn track(&mut self, glow: Glow, callback: Option<PhaseCallback>) {
        // A pending Done of the replaced transition will still resync the cache.
        if self.status.phase() == ActionPhase::InProgress {
            warn!("superseding an in-flight transition");
        }
        self.status.reaction_mut().arm(glow.transition(), callback);
    }
}
