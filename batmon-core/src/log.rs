//! Logging macros forwarding to `defmt`
//!
//! Host test builds have no global logger, so the macros expand to nothing there.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        defmt::trace!($($arg)*);
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        defmt::debug!($($arg)*);
    };
}

macro_rules! info {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        defmt::info!($($arg)*);
    };
}
