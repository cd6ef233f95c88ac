//! Core types shared by commands, the driver and the status cache.

use crate::time::TransitionTime;

/// Highest valid brightness, hue or saturation level.
///
/// `255` is reserved on the wire and is never produced by this crate.
pub const MAX_LEVEL: u8 = 0xFE;

/// Clamps a level into `0..=MAX_LEVEL`.
#[inline]
pub const fn clamp_level(level: u8) -> u8 {
    if level > MAX_LEVEL { MAX_LEVEL } else { level }
}

/// Which coordinate system currently governs color output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// Color temperature + lightness (CTL).
    #[default]
    ColorTemperature,
    /// Hue, saturation + lightness (HSL).
    HueSaturation,
}

impl ColorMode {
    /// Raw value used by property stores.
    pub const fn as_raw(self) -> u16 {
        match self {
            ColorMode::ColorTemperature => 0,
            ColorMode::HueSaturation => 1,
        }
    }

    /// Decodes a raw property value.
    pub const fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            0 => Some(ColorMode::ColorTemperature),
            1 => Some(ColorMode::HueSaturation),
            _ => None,
        }
    }
}

/// Where a transition is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionPhase {
    /// Nothing is happening.
    #[default]
    None,
    /// The transition is animating.
    InProgress,
    /// The transition just completed.
    Done,
}

/// Cached, application-visible snapshot of the bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightStatus {
    pub on: bool,
    pub brightness: u8,
    pub hue: u8,
    pub saturation: u8,
    pub temperature: u16,
    /// Remaining time of the tracked transition. Zero when idle or done.
    pub time_remaining: TransitionTime,
}

/// Request to enter or adjust color temperature mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorTemperatureCommand {
    pub brightness: u8,
    pub transition: TransitionTime,
    pub temperature: u16,
}

impl ColorTemperatureCommand {
    #[inline]
    pub const fn new(temperature: u16, brightness: u8, transition: TransitionTime) -> Self {
        Self {
            brightness,
            transition,
            temperature,
        }
    }
}

/// Request to enter or adjust hue/saturation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HueSaturationCommand {
    pub brightness: u8,
    pub transition: TransitionTime,
    pub hue: u8,
    pub saturation: u8,
}

impl HueSaturationCommand {
    #[inline]
    pub const fn new(hue: u8, saturation: u8, brightness: u8, transition: TransitionTime) -> Self {
        Self {
            brightness,
            transition,
            hue,
            saturation,
        }
    }
}

/// Target handed to the transition driver, tagged by color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlowCommand {
    ColorTemperature(ColorTemperatureCommand),
    HueSaturation(HueSaturationCommand),
}

impl GlowCommand {
    /// Color mode the driver should run this command in.
    pub const fn mode(&self) -> ColorMode {
        match self {
            GlowCommand::ColorTemperature(_) => ColorMode::ColorTemperature,
            GlowCommand::HueSaturation(_) => ColorMode::HueSaturation,
        }
    }

    pub const fn brightness(&self) -> u8 {
        match self {
            GlowCommand::ColorTemperature(ctl) => ctl.brightness,
            GlowCommand::HueSaturation(hsl) => hsl.brightness,
        }
    }

    pub const fn transition(&self) -> TransitionTime {
        match self {
            GlowCommand::ColorTemperature(ctl) => ctl.transition,
            GlowCommand::HueSaturation(hsl) => hsl.transition,
        }
    }
}

/// A fully bounded driver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glow {
    /// Target on/off state once the transition completes.
    pub on: bool,
    pub command: GlowCommand,
}

impl Glow {
    #[inline]
    pub const fn mode(&self) -> ColorMode {
        self.command.mode()
    }

    #[inline]
    pub const fn transition(&self) -> TransitionTime {
        self.command.transition()
    }
}
