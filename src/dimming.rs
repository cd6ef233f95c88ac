//! Perceived-dimming curve for on/off transitions.
//!
//! Human brightness perception is roughly logarithmic, so a fade from a dim
//! level looks slow when it takes as long as a fade from full brightness.
//! Scaling the requested duration by the current level keeps the perceived
//! speed of on/off fades uniform.

use crate::time::TransitionTime;

/// CIE 1976 lightness (L*) of each linear level, rescaled to `0..=255`.
pub const PERCEIVED_LIGHTNESS: [u8; 256] = [
      0,   9,  18,  26,  33,  39,  44,  48,  52,  56,  60,  63,  66,  69,  72,  74,
     77,  79,  81,  84,  86,  88,  90,  92,  94,  96,  97,  99, 101, 103, 104, 106,
    107, 109, 110, 112, 113, 115, 116, 117, 119, 120, 121, 123, 124, 125, 126, 128,
    129, 130, 131, 132, 133, 134, 136, 137, 138, 139, 140, 141, 142, 143, 144, 145,
    146, 147, 148, 149, 150, 151, 151, 152, 153, 154, 155, 156, 157, 158, 159, 159,
    160, 161, 162, 163, 163, 164, 165, 166, 167, 167, 168, 169, 170, 171, 171, 172,
    173, 174, 174, 175, 176, 176, 177, 178, 179, 179, 180, 181, 181, 182, 183, 183,
    184, 185, 185, 186, 187, 187, 188, 189, 189, 190, 191, 191, 192, 192, 193, 194,
    194, 195, 196, 196, 197, 197, 198, 198, 199, 200, 200, 201, 201, 202, 203, 203,
    204, 204, 205, 205, 206, 206, 207, 208, 208, 209, 209, 210, 210, 211, 211, 212,
    212, 213, 213, 214, 215, 215, 216, 216, 217, 217, 218, 218, 219, 219, 220, 220,
    221, 221, 222, 222, 223, 223, 224, 224, 225, 225, 225, 226, 226, 227, 227, 228,
    228, 229, 229, 230, 230, 231, 231, 232, 232, 232, 233, 233, 234, 234, 235, 235,
    236, 236, 236, 237, 237, 238, 238, 239, 239, 240, 240, 240, 241, 241, 242, 242,
    242, 243, 243, 244, 244, 245, 245, 245, 246, 246, 247, 247, 247, 248, 248, 249,
    249, 249, 250, 250, 251, 251, 251, 252, 252, 253, 253, 253, 254, 254, 255, 255,
];

/// Lookup table mapping a brightness level to a `factor / 255` duration multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimmingCurve {
    factors: [u8; 256],
}

impl DimmingCurve {
    /// Creates a curve from a custom factor table.
    pub const fn new(factors: [u8; 256]) -> Self {
        Self { factors }
    }

    /// A curve that leaves every duration untouched.
    pub const fn linear() -> Self {
        Self { factors: [u8::MAX; 256] }
    }

    /// Returns the multiplier for `level`.
    #[inline]
    pub const fn factor(&self, level: u8) -> u8 {
        self.factors[level as usize]
    }

    /// Scales `transition` for a fade starting or ending at `level`.
    #[inline]
    pub const fn scale(&self, transition: TransitionTime, level: u8) -> TransitionTime {
        transition.scale(self.factor(level))
    }
}

impl Default for DimmingCurve {
    fn default() -> Self {
        Self::new(PERCEIVED_LIGHTNESS)
    }
}
