//! Text attributes and colors

use bitflags::bitflags;

bitflags! {
    /// Text attribute flags, combinable with `|`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attrs: u8 {
        const BOLD      = 0b0000_0001;
        const UNDERLINE = 0b0000_0010;
        const BLINK     = 0b0000_0100;
        const REVERSE   = 0b0000_1000;
        const ITALIC    = 0b0001_0000;
        const FAINT     = 0b0010_0000;
    }
}

impl Attrs {
    /// SGR parameter for each flag, in the order they are emitted
    pub(crate) const SGR: [(Attrs, u8); 6] = [
        (Attrs::BOLD, 1),
        (Attrs::FAINT, 2),
        (Attrs::ITALIC, 3),
        (Attrs::UNDERLINE, 4),
        (Attrs::BLINK, 5),
        (Attrs::REVERSE, 7),
    ];

    /// SGR parameters for the set flags, in emission order
    pub fn sgr_codes(self) -> impl Iterator<Item = u8> {
        Self::SGR
            .into_iter()
            .filter(move |&(flag, _)| self.contains(flag))
            .map(|(_, code)| code)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Attrs {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Attrs({=u8:#04x})", self.bits())
    }
}

/// The eight basic terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    pub const fn fg_code(self) -> u8 {
        30 + self as u8
    }

    pub const fn bg_code(self) -> u8 {
        40 + self as u8
    }
}

/// Current text style as tracked by the terminal writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Style {
    pub attrs: Attrs,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            attrs: Attrs::empty(),
            fg: Color::White,
            bg: Color::Black,
        }
    }
}
