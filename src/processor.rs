//! Command processing.
//!
//! Translates high-level lighting commands into bounded driver invocations.
//! Every command reads the current state first; redundant commands are
//! dropped without touching the driver, and out-of-range parameters are
//! clamped rather than rejected.

use crate::config::LightConfig;
use crate::driver::{PhaseSink, TransitionDriver};
use crate::property::PropertyStore;
use crate::time::TransitionTime;
use crate::types::{
    ColorMode, ColorTemperatureCommand, Glow, GlowCommand, HueSaturationCommand, MAX_LEVEL,
    clamp_level,
};

/// Owns the property store and the transition driver and issues every dispatch.
pub struct CommandProcessor<S: PropertyStore, D: TransitionDriver> {
    store: S,
    driver: D,
    config: LightConfig,
}

impl<S: PropertyStore, D: TransitionDriver> CommandProcessor<S, D> {
    pub fn new(store: S, driver: D, config: LightConfig) -> Self {
        Self {
            store,
            driver,
            config,
        }
    }

    /// Fades the light on from its stored level.
    ///
    /// Returns `None` without dispatching if the light is already on.
    pub fn turn_on(&mut self, transition: TransitionTime, sink: PhaseSink) -> Option<Glow> {
        let level = self.store.brightness();
        if self.store.on_off() {
            trace!("turn_on ignored, already on");
            return None;
        }

        let transition = self.config.dimming.scale(self.resolve(transition), level);
        let command = self.command_for(self.store.color_mode(), level, transition);
        Some(self.dispatch(Glow { on: true, command }, sink))
    }

    /// Fades the light off.
    ///
    /// Returns `None` without dispatching if the light is already off or dark.
    /// The duration is scaled by the level the fade starts from.
    pub fn turn_off(&mut self, transition: TransitionTime, sink: PhaseSink) -> Option<Glow> {
        let level = self.store.brightness();
        if !self.store.on_off() || level == 0 {
            trace!("turn_off ignored, already off");
            return None;
        }

        let transition = self.config.dimming.scale(self.resolve(transition), level);
        let command = self.command_for(self.store.color_mode(), 0, transition);
        Some(self.dispatch(Glow { on: false, command }, sink))
    }

    /// Moves to a color temperature and brightness.
    ///
    /// Returns `None` if the bulb is already in color temperature mode at exactly
    /// the requested temperature and brightness.
    pub fn set_color_temperature(
        &mut self,
        command: ColorTemperatureCommand,
        sink: PhaseSink,
    ) -> Option<Glow> {
        let current = self.store.color_temperature();
        let (min, max) = self.store.color_temperature_bounds();
        let level = self.store.brightness();
        let mode = self.store.color_mode();

        if current == command.temperature
            && level == command.brightness
            && mode == ColorMode::ColorTemperature
        {
            trace!("set_color_temperature ignored, unchanged");
            return None;
        }

        // Lower bound wins over a misconfigured max < min.
        let temperature = command.temperature.min(max).max(min);
        let bounded = ColorTemperatureCommand {
            brightness: clamp_level(command.brightness),
            transition: self.substitute(command.transition),
            temperature,
        };

        let glow = Glow {
            on: bounded.brightness > 0,
            command: GlowCommand::ColorTemperature(bounded),
        };
        Some(self.dispatch(glow, sink))
    }

    /// Moves to a hue, saturation and brightness.
    ///
    /// Returns `None` if the bulb is already in hue/saturation mode at exactly
    /// the requested values.
    pub fn set_hue_saturation(
        &mut self,
        command: HueSaturationCommand,
        sink: PhaseSink,
    ) -> Option<Glow> {
        let hue = self.store.hue();
        let saturation = self.store.saturation();
        let level = self.store.brightness();
        let mode = self.store.color_mode();

        if hue == command.hue
            && saturation == command.saturation
            && level == command.brightness
            && mode == ColorMode::HueSaturation
        {
            trace!("set_hue_saturation ignored, unchanged");
            return None;
        }

        let bounded = HueSaturationCommand {
            brightness: clamp_level(command.brightness),
            transition: self.substitute(command.transition),
            hue: clamp_level(command.hue),
            saturation: clamp_level(command.saturation),
        };

        let glow = Glow {
            on: bounded.brightness > 0,
            command: GlowCommand::HueSaturation(bounded),
        };
        Some(self.dispatch(glow, sink))
    }

    /// Full-brightness pulse in the current color, regardless of on/off state.
    pub(crate) fn flush(&mut self, transition: TransitionTime) -> Glow {
        let command = self.command_for(self.store.color_mode(), MAX_LEVEL, transition);
        self.dispatch(Glow { on: true, command }, PhaseSink::Discard)
    }

    /// Unconditional instant off.
    pub(crate) fn force_off(&mut self) -> Glow {
        let command = self.command_for(self.store.color_mode(), 0, TransitionTime::ZERO);
        self.dispatch(Glow { on: false, command }, PhaseSink::Discard)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Replaces the sentinel by the stored default without persisting it.
    fn resolve(&self, transition: TransitionTime) -> TransitionTime {
        transition.or_default(self.store.default_transition())
    }

    /// Replaces the sentinel by the stored default and persists that default.
    fn substitute(&mut self, transition: TransitionTime) -> TransitionTime {
        if !transition.is_use_default() {
            return transition;
        }
        let default = self.store.default_transition();
        debug!("using default transition {} ms", default.as_millis());
        self.store.set_default_transition(default);
        default
    }

    /// Builds a command in `mode` completing the color fields from the store.
    fn command_for(&self, mode: ColorMode, brightness: u8, transition: TransitionTime) -> GlowCommand {
        match mode {
            ColorMode::ColorTemperature => GlowCommand::ColorTemperature(ColorTemperatureCommand {
                brightness,
                transition,
                temperature: self.store.color_temperature(),
            }),
            ColorMode::HueSaturation => GlowCommand::HueSaturation(HueSaturationCommand {
                brightness,
                transition,
                hue: self.store.hue(),
                saturation: self.store.saturation(),
            }),
        }
    }

    fn dispatch(&mut self, glow: Glow, sink: PhaseSink) -> Glow {
        debug!(
            "dispatch {:?} on={} brightness={} over {} ms to {:?}",
            glow.mode(),
            glow.on,
            glow.command.brightness(),
            glow.transition().as_millis(),
            sink
        );
        self.driver.set_glow(glow, sink);
        glow
    }
}
