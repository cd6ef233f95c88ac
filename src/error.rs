//! Bring-up errors.
//!
//! Commands never fail: out-of-range parameters are clamped. The only fallible
//! step is initialization of the collaborating subsystems.

/// How a subsystem failed to come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureKind {
    /// The subsystem reported a definite failure.
    Fail,
    /// The subsystem could not tell whether it succeeded.
    Unknown,
}

/// The subsystem that failed during [`LightController::init`](crate::LightController::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    PropertyStore,
    SequenceControl,
    TransitionDriver,
}

/// Initialization failure. Fatal to bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitError {
    pub subsystem: Subsystem,
    pub kind: FailureKind,
}

impl InitError {
    pub const fn new(subsystem: Subsystem, kind: FailureKind) -> Self {
        Self { subsystem, kind }
    }
}

impl core::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Subsystem::PropertyStore => write!(f, "property store"),
            Subsystem::SequenceControl => write!(f, "sequence control"),
            Subsystem::TransitionDriver => write!(f, "transition driver"),
        }
    }
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            FailureKind::Fail => write!(f, "{} failed to initialize", self.subsystem),
            FailureKind::Unknown => {
                write!(f, "{} initialization ended in an unknown state", self.subsystem)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}
