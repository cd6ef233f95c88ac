//! Property store abstraction.
//!
//! The store holds the authoritative bulb attributes. It is owned by a
//! collaborator (flash, NVRAM, a mesh model) and accessed synchronously.

use crate::error::FailureKind;
use crate::time::TransitionTime;
use crate::types::{ColorMode, LightStatus, clamp_level};

/// Identifiers of the properties the control core reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PropertyId {
    OnOff,
    Brightness,
    Hue,
    Saturation,
    ColorTemperature,
    ColorTemperatureMin,
    ColorTemperatureMax,
    ColorMode,
    DefaultTransitionTime,
}

impl PropertyId {
    /// Every property, in storage order.
    pub const ALL: [PropertyId; 9] = [
        PropertyId::OnOff,
        PropertyId::Brightness,
        PropertyId::Hue,
        PropertyId::Saturation,
        PropertyId::ColorTemperature,
        PropertyId::ColorTemperatureMin,
        PropertyId::ColorTemperatureMax,
        PropertyId::ColorMode,
        PropertyId::DefaultTransitionTime,
    ];

    const fn index(self) -> usize {
        match self {
            PropertyId::OnOff => 0,
            PropertyId::Brightness => 1,
            PropertyId::Hue => 2,
            PropertyId::Saturation => 3,
            PropertyId::ColorTemperature => 4,
            PropertyId::ColorTemperatureMin => 5,
            PropertyId::ColorTemperatureMax => 6,
            PropertyId::ColorMode => 7,
            PropertyId::DefaultTransitionTime => 8,
        }
    }
}

/// Key/value accessor for the current bulb attributes.
///
/// All values travel as `u16`; the provided helpers decode them and saturate
/// anything out of range instead of failing.
pub trait PropertyStore {
    /// Reads a raw property value.
    fn get(&self, id: PropertyId) -> u16;

    /// Writes a raw property value.
    fn set(&mut self, id: PropertyId, value: u16);

    /// Restores every property to its factory default.
    fn restore_defaults(&mut self);

    /// Brings the store up, restoring factory defaults first when `reset` is set.
    fn initialize(&mut self, reset: bool) -> Result<(), FailureKind> {
        if reset {
            self.restore_defaults();
        }
        Ok(())
    }

    fn on_off(&self) -> bool {
        self.get(PropertyId::OnOff) != 0
    }

    fn brightness(&self) -> u8 {
        level(self.get(PropertyId::Brightness))
    }

    fn hue(&self) -> u8 {
        level(self.get(PropertyId::Hue))
    }

    fn saturation(&self) -> u8 {
        level(self.get(PropertyId::Saturation))
    }

    fn color_temperature(&self) -> u16 {
        self.get(PropertyId::ColorTemperature)
    }

    /// Returns the configured `(min, max)` color temperature bounds.
    fn color_temperature_bounds(&self) -> (u16, u16) {
        (
            self.get(PropertyId::ColorTemperatureMin),
            self.get(PropertyId::ColorTemperatureMax),
        )
    }

    /// Current color mode. Unknown raw values fall back to color temperature.
    fn color_mode(&self) -> ColorMode {
        let raw = self.get(PropertyId::ColorMode);
        ColorMode::from_raw(raw).unwrap_or_else(|| {
            warn!("unknown color mode {}, using color temperature", raw);
            ColorMode::ColorTemperature
        })
    }

    /// Default transition time. A stored sentinel reads as zero.
    fn default_transition(&self) -> TransitionTime {
        let stored = TransitionTime::from_millis(self.get(PropertyId::DefaultTransitionTime));
        stored.or_default(TransitionTime::ZERO)
    }

    fn set_default_transition(&mut self, transition: TransitionTime) {
        self.set(PropertyId::DefaultTransitionTime, transition.as_millis());
    }
}

#[inline]
fn level(raw: u16) -> u8 {
    clamp_level(u8::try_from(raw).unwrap_or(u8::MAX))
}

impl LightStatus {
    /// Reads the authoritative snapshot from `store`, with no transition pending.
    pub fn from_store<S: PropertyStore + ?Sized>(store: &S) -> Self {
        Self {
            on: store.on_off(),
            brightness: store.brightness(),
            hue: store.hue(),
            saturation: store.saturation(),
            temperature: store.color_temperature(),
            time_remaining: TransitionTime::ZERO,
        }
    }
}

/// Factory property values, applied on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryDefaults {
    pub on: bool,
    pub brightness: u8,
    pub hue: u8,
    pub saturation: u8,
    pub temperature: u16,
    pub temperature_min: u16,
    pub temperature_max: u16,
    pub mode: ColorMode,
    pub transition: TransitionTime,
}

impl FactoryDefaults {
    /// Raw value of `id` under these defaults.
    pub const fn value(&self, id: PropertyId) -> u16 {
        match id {
            PropertyId::OnOff => self.on as u16,
            PropertyId::Brightness => self.brightness as u16,
            PropertyId::Hue => self.hue as u16,
            PropertyId::Saturation => self.saturation as u16,
            PropertyId::ColorTemperature => self.temperature,
            PropertyId::ColorTemperatureMin => self.temperature_min,
            PropertyId::ColorTemperatureMax => self.temperature_max,
            PropertyId::ColorMode => self.mode.as_raw(),
            PropertyId::DefaultTransitionTime => self.transition.as_millis(),
        }
    }
}

impl Default for FactoryDefaults {
    fn default() -> Self {
        Self {
            on: false,
            brightness: 254,
            hue: 0,
            saturation: 0,
            temperature: 4000,
            temperature_min: 2700,
            temperature_max: 6500,
            mode: ColorMode::ColorTemperature,
            transition: TransitionTime::from_millis(1000),
        }
    }
}

/// In-memory property store.
///
/// Useful on hosts and as the RAM mirror of a persistent store.
#[derive(Debug, Clone)]
pub struct MemoryPropertyStore {
    values: [u16; PropertyId::ALL.len()],
    defaults: FactoryDefaults,
}

impl MemoryPropertyStore {
    /// Creates a store populated with `defaults`.
    pub fn new(defaults: FactoryDefaults) -> Self {
        let mut store = Self {
            values: [0; PropertyId::ALL.len()],
            defaults,
        };
        store.restore_defaults();
        store
    }

    pub fn defaults(&self) -> &FactoryDefaults {
        &self.defaults
    }
}

impl Default for MemoryPropertyStore {
    fn default() -> Self {
        Self::new(FactoryDefaults::default())
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get(&self, id: PropertyId) -> u16 {
        self.values[id.index()]
    }

    fn set(&mut self, id: PropertyId, value: u16) {
        self.values[id.index()] = value;
    }

    fn restore_defaults(&mut self) {
        for id in PropertyId::ALL {
            self.values[id.index()] = self.defaults.value(id);
        }
    }
}
