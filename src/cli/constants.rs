//! Program identity and the global display level.
//!
//! User-facing notices go to stderr through the [`display!`] and
//! [`displaylevel!`] macros, gated by a crate-global atomic:
//! 0 = silent, 1 = errors only, 2 = normal (progress and size reports).

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "tscrunch";
pub const AUTHOR: &str = "Antonio Savona";

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
