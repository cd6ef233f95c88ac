//! Shared test infrastructure for smart-bulb-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use smart_bulb_core::{
    ActionPhase, FactoryDefaults, FailureKind, Glow, GlowCommand, LightConfig, LightController,
    MemoryPropertyStore, PhaseCallback, PhaseEvent, PhaseSink, PropertyId, PropertyStore,
    SequenceController, SequenceMode, TransitionDriver,
};

// ============================================================================
// Shared Property Store
// ============================================================================

/// Property store shared between the controller and the mock driver, the way
/// firmware drivers write final values into the same storage the core reads.
#[derive(Clone, Default)]
pub struct SharedStore {
    props: Rc<RefCell<MemoryPropertyStore>>,
    init_result: Option<FailureKind>,
}

impl SharedStore {
    pub fn new(defaults: FactoryDefaults) -> Self {
        Self {
            props: Rc::new(RefCell::new(MemoryPropertyStore::new(defaults))),
            init_result: None,
        }
    }

    /// Store whose backing storage cannot be opened.
    pub fn failing(kind: FailureKind) -> Self {
        Self {
            init_result: Some(kind),
            ..Self::new(FactoryDefaults::default())
        }
    }

    /// Writes a property from outside the controller.
    pub fn put(&self, id: PropertyId, value: u16) {
        self.props.borrow_mut().set(id, value);
    }

    pub fn read(&self, id: PropertyId) -> u16 {
        self.props.borrow().get(id)
    }
}

impl PropertyStore for SharedStore {
    fn initialize(&mut self, reset: bool) -> Result<(), FailureKind> {
        if let Some(kind) = self.init_result {
            return Err(kind);
        }
        if reset {
            self.restore_defaults();
        }
        Ok(())
    }

    fn get(&self, id: PropertyId) -> u16 {
        self.props.borrow().get(id)
    }

    fn set(&mut self, id: PropertyId, value: u16) {
        self.props.borrow_mut().set(id, value);
    }

    fn restore_defaults(&mut self) {
        self.props.borrow_mut().restore_defaults();
    }
}

// ============================================================================
// Mock Transition Driver
// ============================================================================

/// Mock driver that records every dispatch and applies targets on completion
pub struct MockDriver {
    store: SharedStore,
    history: heapless::Vec<(Glow, PhaseSink), 32>,
    init_result: Result<(), FailureKind>,
    persists_transition: bool,
}

impl MockDriver {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            history: heapless::Vec::new(),
            init_result: Ok(()),
            persists_transition: false,
        }
    }

    pub fn failing(store: SharedStore, kind: FailureKind) -> Self {
        Self {
            init_result: Err(kind),
            ..Self::new(store)
        }
    }

    /// Makes the driver store every dispatched duration as the default
    /// transition, like drivers that persist their last transition time.
    pub fn persisting_transition(mut self) -> Self {
        self.persists_transition = true;
        self
    }

    pub fn history(&self) -> &[(Glow, PhaseSink)] {
        &self.history
    }

    pub fn dispatch_count(&self) -> usize {
        self.history.len()
    }

    pub fn last(&self) -> Option<(Glow, PhaseSink)> {
        self.history.last().copied()
    }

    /// Progress report for the running transition.
    pub fn progress(&self) -> PhaseEvent {
        PhaseEvent::new(self.current_sink(), ActionPhase::InProgress)
    }

    /// Applies the running transition's target to the store and reports Done.
    pub fn complete(&mut self) -> PhaseEvent {
        if let Some((glow, _)) = self.last() {
            self.store.put(PropertyId::OnOff, u16::from(glow.on));
            self.store.put(PropertyId::ColorMode, glow.mode().as_raw());
            match glow.command {
                GlowCommand::ColorTemperature(ctl) => {
                    self.store.put(PropertyId::Brightness, u16::from(ctl.brightness));
                    self.store.put(PropertyId::ColorTemperature, ctl.temperature);
                }
                GlowCommand::HueSaturation(hsl) => {
                    self.store.put(PropertyId::Brightness, u16::from(hsl.brightness));
                    self.store.put(PropertyId::Hue, u16::from(hsl.hue));
                    self.store.put(PropertyId::Saturation, u16::from(hsl.saturation));
                }
            }
        }
        PhaseEvent::new(self.current_sink(), ActionPhase::Done)
    }

    fn current_sink(&self) -> PhaseSink {
        self.last().map(|(_, sink)| sink).unwrap_or(PhaseSink::Discard)
    }
}

impl TransitionDriver for MockDriver {
    fn initialize(&mut self) -> Result<(), FailureKind> {
        self.init_result
    }

    fn set_glow(&mut self, glow: Glow, sink: PhaseSink) {
        if self.persists_transition {
            self.store
                .put(PropertyId::DefaultTransitionTime, glow.transition().as_millis());
        }
        let _ = self.history.push((glow, sink));
    }
}

// ============================================================================
// Mock Sequence Controller
// ============================================================================

#[derive(Default)]
pub struct MockSequencer {
    pub triggered: Vec<SequenceMode>,
    pub revoked: usize,
    pub reset_callback: Option<PhaseCallback>,
    pub init_result: Option<FailureKind>,
}

impl SequenceController for MockSequencer {
    fn initialize(&mut self) -> Result<(), FailureKind> {
        match self.init_result {
            Some(kind) => Err(kind),
            None => Ok(()),
        }
    }

    fn trigger_sequence(&mut self, mode: SequenceMode) {
        self.triggered.push(mode);
    }

    fn revoke_pending_sequence(&mut self) {
        self.revoked += 1;
    }

    fn trigger_reset_action(&mut self, callback: PhaseCallback) {
        self.reset_callback = Some(callback);
    }
}

// ============================================================================
// Phase Recorder
// ============================================================================

thread_local! {
    static PHASES: RefCell<Vec<ActionPhase>> = const { RefCell::new(Vec::new()) };
}

/// Application callback that records phases for the current test thread
pub fn record(phase: ActionPhase) {
    PHASES.with(|phases| phases.borrow_mut().push(phase));
}

pub fn recorder() -> Option<PhaseCallback> {
    Some(record as PhaseCallback)
}

pub fn recorded() -> Vec<ActionPhase> {
    PHASES.with(|phases| phases.borrow().clone())
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestController = LightController<SharedStore, MockDriver, MockSequencer>;

/// Builds an initialized controller over a fresh store with factory defaults
pub fn controller() -> (TestController, SharedStore) {
    controller_with(FactoryDefaults::default(), LightConfig::default())
}

pub fn controller_with(defaults: FactoryDefaults, config: LightConfig) -> (TestController, SharedStore) {
    let store = SharedStore::new(defaults);
    let driver = MockDriver::new(store.clone());
    let light = LightController::init(store.clone(), driver, MockSequencer::default(), config, false)
        .expect("mock subsystems always initialize");
    (light, store)
}
