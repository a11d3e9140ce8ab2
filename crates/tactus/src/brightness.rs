//! Screen brightness level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen brightness in `[0.0, 1.0]`; `0.0` means the screen is off.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct Brightness(f32);

impl Brightness {
    /// Screen off.
    pub const OFF: Self = Self(0.0);
    /// Full brightness.
    pub const FULL: Self = Self(1.0);

    /// Create a brightness, clamping to `[0.0, 1.0]`. NaN counts as off.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::OFF
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The clamped value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if the screen is off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.0 == 0.0
    }
}

impl From<Brightness> for f32 {
    fn from(b: Brightness) -> Self {
        b.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}
