//! Transition durations.

/// Duration of a light transition in milliseconds.
///
/// The raw value `0xFFFF` is reserved as [`TransitionTime::USE_DEFAULT`]: it asks
/// for the bulb's configured default transition and is always replaced before
/// a command reaches the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionTime(u16);

impl TransitionTime {
    /// Instant change.
    pub const ZERO: Self = TransitionTime(0);

    /// Sentinel meaning "use the default transition time".
    pub const USE_DEFAULT: Self = TransitionTime(0xFFFF);

    /// Longest transition that is not the sentinel.
    pub const MAX: Self = TransitionTime(0xFFFE);

    /// Creates a transition time from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u16) -> Self {
        TransitionTime(millis)
    }

    /// Returns the duration in milliseconds.
    #[inline]
    pub const fn as_millis(self) -> u16 {
        self.0
    }

    /// Returns true for the "use default" sentinel.
    #[inline]
    pub const fn is_use_default(self) -> bool {
        self.0 == Self::USE_DEFAULT.0
    }

    /// Returns `self`, or `default` when `self` is the sentinel.
    #[inline]
    pub const fn or_default(self, default: TransitionTime) -> Self {
        if self.is_use_default() { default } else { self }
    }

    /// Scales the duration by `factor / 255`.
    ///
    /// The result never exceeds `self`, so a non-sentinel input can only produce
    /// the sentinel if it already was one.
    #[inline]
    pub const fn scale(self, factor: u8) -> Self {
        TransitionTime(((self.0 as u32 * factor as u32) / 255) as u16)
    }

    /// Saturating subtraction (returns ZERO on underflow).
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        TransitionTime(self.0.saturating_sub(other.0))
    }
}

impl From<u16> for TransitionTime {
    fn from(millis: u16) -> Self {
        TransitionTime(millis)
    }
}

impl From<TransitionTime> for u16 {
    fn from(time: TransitionTime) -> Self {
        time.0
    }
}
