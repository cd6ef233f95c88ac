#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LightController`**: Owns one bulb's control core, built once by `init`
//! - **`CommandProcessor`**: Turns on/off, color temperature and hue/saturation commands into bounded driver calls
//! - **`PropertyStore`**: Trait to implement for your persistent bulb attributes
//! - **`TransitionDriver`**: Trait to implement for your LED hardware
//! - **`SequenceController`**: Trait to implement for your identify/blink timers
//! - **`PhaseMonitor`**: State machine advanced by `ActionPhase` reports
//! - **`PhaseEvent`**: A phase report tagged with the monitor it belongs to
//! - **`PhaseChannel`**: Interrupt-safe queue carrying phase reports to the main loop
//! - **`TransitionTime`**: Millisecond durations, with a "use default" sentinel
//!
//! Commands never fail. Brightness, hue and saturation are capped at
//! [`MAX_LEVEL`], color temperature is clamped to the stored bounds, and the
//! sentinel duration is replaced by the stored default.

#[macro_use]
mod fmt;

pub mod channel;
pub mod colors;
pub mod config;
pub mod controller;
pub mod dimming;
pub mod driver;
pub mod error;
pub mod monitor;
pub mod processor;
pub mod property;
pub mod sequence;
pub mod time;
pub mod types;

pub use channel::{PhaseChannel, PhaseReceiver, PhaseSender, TryReceiveError, TrySendError};
pub use config::{LightConfig, LightConfigBuilder};
pub use controller::LightController;
pub use dimming::DimmingCurve;
pub use driver::{PhaseCallback, PhaseEvent, PhaseSink, TransitionDriver};
pub use error::{FailureKind, InitError, Subsystem};
pub use monitor::{PhaseMonitor, PhaseReaction, SequencePulse, StatusTracker};
pub use processor::CommandProcessor;
pub use property::{FactoryDefaults, MemoryPropertyStore, PropertyId, PropertyStore};
pub use sequence::{SequenceController, SequenceMode};
pub use time::TransitionTime;
pub use types::{
    ActionPhase, ColorMode, ColorTemperatureCommand, Glow, GlowCommand, HueSaturationCommand,
    LightStatus, MAX_LEVEL, clamp_level,
};

// Re-export Srgb from palette for drivers using the color previews
pub use palette::Srgb;
