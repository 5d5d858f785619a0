//! Shared Sample State
//!
//! The ADC conversion-complete interrupt is the only writer, the battery monitor task the only
//! reader. Both sides go through a critical section, so the task can never observe a torn
//! `raw_level` or a level from one conversion paired with the status pin of another.

use core::cell::Cell;

use critical_section::Mutex;
use defmt::Format;

/// Highest raw level the monitor works with (10-bit)
pub const RAW_MAX: u16 = 0x03FF;

/// Resolution the raw level is normalised to
const RAW_BITS: u8 = 10;

/// One conversion result together with the charge status pin sampled alongside it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Format)]
pub struct Sample {
    /// Raw battery voltage reading, 0..=1023
    pub raw_level: u16,
    /// Charge status pin level
    pub charging: bool,
}

/// Process-wide cell holding the latest [`Sample`]
pub struct SampleCell {
    inner: Mutex<Cell<Sample>>,
}

impl SampleCell {
    /// Creates a cell holding a zeroed sample
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Sample {
                raw_level: 0,
                charging: false,
            })),
        }
    }

    /// Replaces the stored sample. Meant for interrupt context.
    pub fn store(&self, sample: Sample) {
        critical_section::with(|cs| self.inner.borrow(cs).set(sample));
    }

    /// Returns the latest sample
    pub fn load(&self) -> Sample {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalises a conversion result of `resolution_bits` to the 10-bit raw level
///
/// Wider conversions drop their least significant bits, narrower ones are shifted up.
pub fn ten_bit(conversion: u16, resolution_bits: u8) -> u16 {
    let level = if resolution_bits > RAW_BITS {
        conversion
            .checked_shr(u32::from(resolution_bits - RAW_BITS))
            .unwrap_or(0)
    } else {
        conversion << (RAW_BITS - resolution_bits)
    };
    level & RAW_MAX
}
