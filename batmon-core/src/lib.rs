//! Battery monitor core
//!
//! Everything the battery monitor does that does not touch silicon lives here, so it can be
//! exercised on the host:
//! - [`sample`]: latest ADC reading shared between the conversion interrupt and the task
//! - [`calibration`]: raw reading to charge percentage
//! - [`adc_config`]: typed free-running ADC configuration
//! - [`message`]: the message protocol spoken with the rest of the firmware
//! - [`cadence`]: drift-free fixed period deadlines
//! - [`monitor`]: the per-tick state machine

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod adc_config;
pub mod cadence;
pub mod calibration;
pub mod message;
pub mod monitor;
pub mod sample;

use defmt::Format;

/// Errors raised while validating the monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Error {
    /// The requested analog input does not exist
    InvalidChannel(u8),
    /// Conversions cannot be started faster than the ADC completes them
    SampleRateTooHigh,
    /// The interval between conversions does not fit the clock divider
    SampleRateTooLow,
}
