//! Tunables of the control core.

use crate::dimming::DimmingCurve;
use crate::time::TransitionTime;

/// Countdown step applied to the cached remaining time on every progress report.
pub const DEFAULT_COUNTDOWN_STEP: TransitionTime = TransitionTime::from_millis(100);

/// Duration of the full-brightness flush issued on each identify tick.
pub const DEFAULT_FLUSH_DURATION: TransitionTime = TransitionTime::from_millis(50);

/// Configuration shared by the command processor and the phase monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightConfig {
    pub dimming: DimmingCurve,
    pub countdown_step: TransitionTime,
    pub flush_duration: TransitionTime,
}

impl LightConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> LightConfigBuilder {
        LightConfigBuilder::new()
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            dimming: DimmingCurve::default(),
            countdown_step: DEFAULT_COUNTDOWN_STEP,
            flush_duration: DEFAULT_FLUSH_DURATION,
        }
    }
}

/// Builder for [`LightConfig`].
#[derive(Debug, Clone, Copy)]
pub struct LightConfigBuilder {
    config: LightConfig,
}

impl LightConfigBuilder {
    /// Starts from the default configuration.
    pub fn new() -> Self {
        Self {
            config: LightConfig::default(),
        }
    }

    /// Sets the curve used to scale on/off durations.
    pub fn dimming(mut self, curve: DimmingCurve) -> Self {
        self.config.dimming = curve;
        self
    }

    /// Sets the countdown granularity.
    ///
    /// A zero step is raised to 1 ms so the countdown keeps moving.
    pub fn countdown_step(mut self, step: TransitionTime) -> Self {
        self.config.countdown_step = if step == TransitionTime::ZERO {
            TransitionTime::from_millis(1)
        } else {
            step
        };
        self
    }

    /// Sets the identify flush duration.
    pub fn flush_duration(mut self, duration: TransitionTime) -> Self {
        self.config.flush_duration = duration;
        self
    }

    pub fn build(self) -> LightConfig {
        self.config
    }
}

impl Default for LightConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = LightConfig::builder()
            .dimming(DimmingCurve::linear())
            .countdown_step(TransitionTime::from_millis(250))
            .flush_duration(TransitionTime::from_millis(20))
            .build();

        assert_eq!(config.dimming, DimmingCurve::linear());
        assert_eq!(config.countdown_step.as_millis(), 250);
        assert_eq!(config.flush_duration.as_millis(), 20);
    }

    #[test]
    fn zero_countdown_step_is_raised() {
        let config = LightConfig::builder().countdown_step(TransitionTime::ZERO).build();
        assert_eq!(config.countdown_step.as_millis(), 1);
    }
}
