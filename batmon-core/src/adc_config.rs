//! Free-running ADC configuration
//!
//! The electrical intent (reference, input, conversion rate) is described here once, and turned
//! into register values by [`AdcConfig::divider`]. The firmware applies the result exactly once
//! during startup, before the conversion interrupt is unmasked.
//!
//! # Conversion timing
//! ```text
//! interval (ADC clock cycles) = 1 + INT + FRAC / 256
//! ```
//! A single conversion takes 96 cycles, so the interval can't be shorter than that.

use defmt::Format;

use crate::Error;

/// ADC clock cycles needed for one conversion
pub const CONVERSION_CYCLES: u32 = 96;

/// Highest external analog input on the RP2350A (GPIO29)
pub const MAX_CHANNEL: u8 = 3;

/// Resolution of a single conversion
pub const RESOLUTION_BITS: u8 = 12;

/// Voltage reference used for conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Reference {
    /// ADC_AVDD supply (3.3V), the only reference the RP2350 ADC has
    Avdd,
}

/// Free-running interval divider, as written to the ADC `DIV` register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct ClockDivider {
    pub int: u16,
    pub frac: u8,
}

/// What to sample and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct AdcConfig {
    pub reference: Reference,
    /// Single ended analog input
    pub channel: u8,
    /// Conversions per second in free-running mode
    pub sample_rate_hz: u32,
}

impl AdcConfig {
    /// Battery voltage divider on AIN3 (GPIO29, VSYS/3), sampled ~14.4k times per second
    pub const BATTERY: Self = Self {
        reference: Reference::Avdd,
        channel: 3,
        sample_rate_hz: 14_423,
    };

    /// Computes the interval divider for the given ADC clock
    pub fn divider(&self, adc_clock_hz: u32) -> Result<ClockDivider, Error> {
        if self.channel > MAX_CHANNEL {
            return Err(Error::InvalidChannel(self.channel));
        }
        if self.sample_rate_hz == 0 {
            return Err(Error::SampleRateTooLow);
        }

        // interval in 1/256 cycle units
        let interval = (u64::from(adc_clock_hz) << 8) / u64::from(self.sample_rate_hz);
        let cycles = interval >> 8;
        if cycles < u64::from(CONVERSION_CYCLES) {
            return Err(Error::SampleRateTooHigh);
        }

        let int = u16::try_from(cycles - 1).map_err(|_| Error::SampleRateTooLow)?;
        let frac = (interval & 0xFF) as u8;
        debug!("ADC divider int={} frac={}", int, frac);
        Ok(ClockDivider { int, frac })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADC_CLOCK_HZ: u32 = 48_000_000;

    #[test]
    fn battery_divider() {
        let divider = AdcConfig::BATTERY.divider(ADC_CLOCK_HZ).unwrap();
        assert_eq!(divider, ClockDivider { int: 3327, frac: 4 });
    }

    #[test]
    fn back_to_back_conversions_are_the_limit() {
        let config = AdcConfig {
            sample_rate_hz: 500_000,
            ..AdcConfig::BATTERY
        };
        assert_eq!(config.divider(ADC_CLOCK_HZ), Ok(ClockDivider { int: 95, frac: 0 }));

        let config = AdcConfig {
            sample_rate_hz: 1_000_000,
            ..AdcConfig::BATTERY
        };
        assert_eq!(config.divider(ADC_CLOCK_HZ), Err(Error::SampleRateTooHigh));
    }

    #[test]
    fn slow_rates_overflow_the_divider() {
        for sample_rate_hz in [0, 100] {
            let config = AdcConfig {
                sample_rate_hz,
                ..AdcConfig::BATTERY
            };
            assert_eq!(config.divider(ADC_CLOCK_HZ), Err(Error::SampleRateTooLow));
        }
    }

    #[test]
    fn rejects_missing_channel() {
        let config = AdcConfig {
            channel: 4,
            ..AdcConfig::BATTERY
        };
        assert_eq!(config.divider(ADC_CLOCK_HZ), Err(Error::InvalidChannel(4)));
    }
}
