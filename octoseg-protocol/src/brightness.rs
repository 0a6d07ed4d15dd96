//! Brightness level to blanking threshold mapping
//!
//! The display has no PWM. Each digit is held for [`HOLD_STEPS`] delay
//! steps and blanked once the step counter reaches the threshold, so the
//! threshold is the digit's duty cycle out of 255. Perceived brightness is
//! far from linear in duty cycle, hence the lookup table.

/// Delay steps each digit is held for during one refresh
pub const HOLD_STEPS: u8 = 255;

/// Blanking threshold per level/2
///
/// Monotonic non-decreasing. The last entry equals [`HOLD_STEPS`], which the
/// step counter never reaches, so full level keeps digits lit all cycle.
pub const THRESHOLDS: [u8; 128] = [
    0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 4, //
    5, 5, 6, 6, 6, 7, 7, 8, 8, 8, 9, 10, 10, 10, 11, 12, 13, 14, //
    14, 15, 16, 17, 18, 20, 21, 22, 24, 26, 27, 28, 30, 31, 32, 34, 35, 36, //
    38, 39, 40, 41, 42, 44, 45, 46, 48, 49, 50, 52, 54, 56, 58, 59, 61, 63, //
    65, 67, 68, 69, 71, 72, 74, 76, 78, 80, 82, 85, 88, 90, 92, 95, 98, 100, //
    103, 106, 109, 112, 116, 119, 122, 125, 129, 134, 138, 142, 147, 151, //
    153, 156, 160, 163, 165, 170, 175, 180, 185, 190, 195, 200, 207, 214, 218, //
    221, 225, 228, 232, 234, 241, 248, 254, 255,
];

/// A brightness level as sent over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl Brightness {
    /// Dimmest setting
    pub const MIN: Self = Self(0);
    /// Brightest setting, and the power-on level
    pub const MAX: Self = Self(255);

    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Raw level 0-255
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Delay step at which a lit digit is forced dark
    pub const fn threshold(self) -> u8 {
        THRESHOLDS[(self.0 >> 1) as usize]
    }
}
