//! Color previews of glow targets.
//!
//! Drivers that mix RGB channels, and UIs that show the bulb, need the color a
//! [`GlowCommand`] settles on. Device units (levels `0..=254`, color temperature
//! in Kelvin) are converted to `palette::Srgb` in the 0.0-1.0 range.

use palette::{FromColor, Hsv, Srgb};

use crate::types::{GlowCommand, MAX_LEVEL};

/// Converts a device level to the 0.0-1.0 range.
#[inline]
pub fn level_fraction(level: u8) -> f32 {
    f32::from(level.min(MAX_LEVEL)) / f32::from(MAX_LEVEL)
}

/// Converts a device hue level to degrees.
#[inline]
pub fn hue_degrees(hue: u8) -> f32 {
    level_fraction(hue) * 360.0
}

/// Creates an RGB color from device hue, saturation and brightness levels.
pub fn hsv(hue: u8, saturation: u8, brightness: u8) -> Srgb {
    let hsv = Hsv::new(hue_degrees(hue), level_fraction(saturation), level_fraction(brightness));
    Srgb::from_color(hsv)
}

/// Approximates the white point of a black body at `kelvin`, at full brightness.
///
/// Valid from 1000 K to 40000 K; values outside are clamped.
pub fn kelvin(kelvin: u16) -> Srgb {
    let temp = (f32::from(kelvin) / 100.0).clamp(10.0, 400.0);

    let red = if temp <= 66.0 {
        255.0
    } else {
        329.698_73 * libm::powf(temp - 60.0, -0.133_204_76)
    };

    let green = if temp <= 66.0 {
        99.470_8 * libm::logf(temp) - 161.119_57
    } else {
        288.122_17 * libm::powf(temp - 60.0, -0.075_514_85)
    };

    let blue = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.517_73 * libm::logf(temp - 10.0) - 305.044_8
    };

    Srgb::new(
        red.clamp(0.0, 255.0) / 255.0,
        green.clamp(0.0, 255.0) / 255.0,
        blue.clamp(0.0, 255.0) / 255.0,
    )
}

/// Color a command settles on.
pub fn glow_color(command: &GlowCommand) -> Srgb {
    match command {
        GlowCommand::HueSaturation(hsl) => hsv(hsl.hue, hsl.saturation, hsl.brightness),
        GlowCommand::ColorTemperature(ctl) => {
            let white = kelvin(ctl.temperature);
            let scale = level_fraction(ctl.brightness);
            Srgb::new(white.red * scale, white.green * scale, white.blue * scale)
        }
    }
}
