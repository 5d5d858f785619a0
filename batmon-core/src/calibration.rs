//! Raw reading to charge percentage
//!
//! The mapping is linear between two raw readings measured by hand on the board: one with a
//! depleted cell, one with a full cell. Readings outside that window are not clamped, so a
//! consumer can still tell an overcharged or deeply discharged cell apart from 100% / 0%.

use defmt::Format;

/// Raw reading of a depleted battery (measured manually)
pub const BAT_MIN: u16 = 545;

/// Raw reading of a full battery (measured manually)
pub const BAT_MAX: u16 = 700;

/// Raw ADC readings of an empty and a full battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct Calibration {
    pub empty: u16,
    pub full: u16,
}

impl Calibration {
    /// Calibration of the reference board
    pub const DEFAULT: Self = Self {
        empty: BAT_MIN,
        full: BAT_MAX,
    };

    /// Charge level in percent for a raw reading, unclamped
    pub fn percent(&self, raw_level: u16) -> f32 {
        let span = (f32::from(self.full) - f32::from(self.empty)) / 100.0;
        (f32::from(raw_level) - f32::from(self.empty)) / span
    }
}
