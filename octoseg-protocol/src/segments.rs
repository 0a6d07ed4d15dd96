//! Segment bit layout and symbol table
//!
//! ```text
//!      A
//!    ┌───┐
//!  F │ G │ B
//!    ├───┤
//!  E │   │ C
//!    └───┘ .DP
//!      D
//! ```

/// Number of digits on the display
pub const DIGIT_COUNT: usize = 8;

/// One segment mask per digit, left to right
pub type Digits = [u8; DIGIT_COUNT];

pub const SEG_A: u8 = 0x01;
pub const SEG_B: u8 = 0x02;
pub const SEG_C: u8 = 0x04;
pub const SEG_D: u8 = 0x08;
pub const SEG_E: u8 = 0x10;
pub const SEG_F: u8 = 0x20;
pub const SEG_G: u8 = 0x40;
pub const SEG_DP: u8 = 0x80;

/// All segments off
pub const SYM_BLANK: u8 = 0;

/// A lone middle bar
pub const SYM_MINUS: u8 = SEG_G;

/// Hexadecimal digits 0-F
pub const HEX_SYMBOLS: [u8; 16] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_F | SEG_G | SEG_B | SEG_C,                         // 4
    SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,                 // 5
    SEG_A | SEG_F | SEG_E | SEG_D | SEG_C | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
    SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,         // A
    SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,                 // b
    SEG_A | SEG_D | SEG_E | SEG_F,                         // C
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,                 // d
    SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,                 // E
    SEG_A | SEG_E | SEG_F | SEG_G,                         // F
];

/// Look up the segment pattern for an uppercase hex character
pub fn hex_symbol(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(HEX_SYMBOLS[(byte - b'0') as usize]),
        b'A'..=b'F' => Some(HEX_SYMBOLS[(10 + byte - b'A') as usize]),
        _ => None,
    }
}
