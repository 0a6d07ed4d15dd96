//! Command stream decoder
//!
//! Turns the incoming byte stream into display updates, one byte at a time.
//! [`CommandDecoder::feed`] is called from the UART receive interrupt, so it
//! never blocks, never allocates and does a bounded amount of work.
//!
//! Symbols typed in ASCII or binary mode are collected in a staging buffer
//! and only published once all eight have arrived, which keeps a half
//! written number from ever reaching the display.

use crate::brightness::Brightness;
use crate::segments::{hex_symbol, Digits, DIGIT_COUNT, SEG_DP, SYM_BLANK, SYM_MINUS};

/// Current interpretation of the command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolMode {
    /// Waiting for a command letter
    #[default]
    Idle,
    /// Collecting ASCII symbols after `A`
    AsciiInput,
    /// Collecting raw segment masks after `B`
    BinaryInput,
    /// Waiting for the level byte after `L`
    BrightnessInput,
}

/// Effect of a decoded command on the live display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayUpdate {
    /// Replace all eight digits
    Commit(Digits),
    /// Blank all eight digits
    Blank,
    /// Change the brightness level
    Brightness(Brightness),
}

/// State machine for parsing display commands
#[derive(Debug, Clone)]
pub struct CommandDecoder {
    mode: ProtocolMode,
    staging: Digits,
    cursor: u8,
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDecoder {
    /// Create a new decoder in idle mode
    pub const fn new() -> Self {
        Self {
            mode: ProtocolMode::Idle,
            staging: [SYM_BLANK; DIGIT_COUNT],
            cursor: 0,
        }
    }

    /// Current protocol mode
    pub fn mode(&self) -> ProtocolMode {
        self.mode
    }

    /// Number of symbols staged so far (0-8)
    pub fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// Drop any partial sequence and return to idle
    pub fn reset(&mut self) {
        self.mode = ProtocolMode::Idle;
        self.staging = [SYM_BLANK; DIGIT_COUNT];
        self.cursor = 0;
    }

    /// Feed a single received byte to the decoder
    ///
    /// Returns the display change this byte completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<DisplayUpdate> {
        match self.mode {
            ProtocolMode::Idle => self.command(byte.to_ascii_uppercase()),
            ProtocolMode::AsciiInput => self.ascii(byte.to_ascii_uppercase()),
            // Raw masks are taken verbatim, no case folding
            ProtocolMode::BinaryInput => self.stage(byte),
            ProtocolMode::BrightnessInput => {
                self.mode = ProtocolMode::Idle;
                Some(DisplayUpdate::Brightness(Brightness::new(byte)))
            }
        }
    }

    /// Feed multiple bytes, returning the last update they produced
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<DisplayUpdate> {
        bytes.iter().fold(None, |last, &b| self.feed(b).or(last))
    }

    fn command(&mut self, letter: u8) -> Option<DisplayUpdate> {
        match letter {
            b'A' => self.begin(ProtocolMode::AsciiInput),
            b'B' => self.begin(ProtocolMode::BinaryInput),
            b'L' => {
                self.mode = ProtocolMode::BrightnessInput;
                None
            }
            b'R' => {
                self.reset();
                Some(DisplayUpdate::Blank)
            }
            // Unknown command letters are ignored
            _ => None,
        }
    }

    fn ascii(&mut self, symbol: u8) -> Option<DisplayUpdate> {
        match symbol {
            b'.' => {
                // Decimal point joins the previous symbol, cursor stays put
                if let Some(prev) = self.cursor.checked_sub(1) {
                    self.staging[prev as usize] |= SEG_DP;
                }
                None
            }
            b'R' => {
                self.reset();
                Some(DisplayUpdate::Blank)
            }
            b'-' => self.stage(SYM_MINUS),
            other => self.stage(hex_symbol(other).unwrap_or(SYM_BLANK)),
        }
    }

    fn begin(&mut self, mode: ProtocolMode) -> Option<DisplayUpdate> {
        self.reset();
        self.mode = mode;
        None
    }

    fn stage(&mut self, mask: u8) -> Option<DisplayUpdate> {
        if let Some(slot) = self.staging.get_mut(self.cursor as usize) {
            *slot = mask;
            self.cursor += 1;
        }

        if self.cursor as usize >= DIGIT_COUNT {
            let digits = self.staging;
            self.reset();
            return Some(DisplayUpdate::Commit(digits));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::HEX_SYMBOLS;
    use proptest::prelude::*;

    fn sym(c: u8) -> u8 {
        hex_symbol(c).unwrap()
    }

    #[test]
    fn test_ascii_hex_digits() {
        let mut decoder = CommandDecoder::new();
        let update = decoder.feed_bytes(b"A0123ABCF");

        assert_eq!(
            update,
            Some(DisplayUpdate::Commit([
                HEX_SYMBOLS[0],
                HEX_SYMBOLS[1],
                HEX_SYMBOLS[2],
                HEX_SYMBOLS[3],
                HEX_SYMBOLS[10],
                HEX_SYMBOLS[11],
                HEX_SYMBOLS[12],
                HEX_SYMBOLS[15],
            ]))
        );
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_ascii_lowercase_is_folded() {
        let mut decoder = CommandDecoder::new();
        let upper = decoder.feed_bytes(b"ADEADBEEF");
        let lower = decoder.feed_bytes(b"adeadbeef");
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_ascii_decimal_points() {
        let mut decoder = CommandDecoder::new();

        // Seven symbols are not enough to publish anything
        assert_eq!(decoder.feed_bytes(b"A1.2.34567"), None);
        assert_eq!(decoder.cursor(), 7);

        let update = decoder.feed(b'8');
        assert_eq!(
            update,
            Some(DisplayUpdate::Commit([
                sym(b'1') | SEG_DP,
                sym(b'2') | SEG_DP,
                sym(b'3'),
                sym(b'4'),
                sym(b'5'),
                sym(b'6'),
                sym(b'7'),
                sym(b'8'),
            ]))
        );
    }

    #[test]
    fn test_leading_decimal_point_is_noop() {
        let mut decoder = CommandDecoder::new();
        decoder.feed_bytes(b"A.");
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.mode(), ProtocolMode::AsciiInput);

        let update = decoder.feed_bytes(b"00000000");
        assert_eq!(update, Some(DisplayUpdate::Commit([HEX_SYMBOLS[0]; DIGIT_COUNT])));
    }

    #[test]
    fn test_ascii_minus_and_unknown() {
        let mut decoder = CommandDecoder::new();
        let update = decoder.feed_bytes(b"A-1 x?G-9");

        assert_eq!(
            update,
            Some(DisplayUpdate::Commit([
                SYM_MINUS,
                sym(b'1'),
                SYM_BLANK,
                SYM_BLANK,
                SYM_BLANK,
                SYM_BLANK,
                SYM_MINUS,
                sym(b'9'),
            ]))
        );
    }

    #[test]
    fn test_binary_is_verbatim() {
        let mut decoder = CommandDecoder::new();
        let payload = [0x00, 0xFF, b'R', b'a', 0x80, 0x7F, 0x1B, 0x52];
        decoder.feed(b'b');
        assert_eq!(decoder.mode(), ProtocolMode::BinaryInput);

        assert_eq!(decoder.feed_bytes(&payload), Some(DisplayUpdate::Commit(payload)));
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_reset_from_idle_is_idempotent() {
        let mut decoder = CommandDecoder::new();
        assert_eq!(decoder.feed(b'R'), Some(DisplayUpdate::Blank));
        assert_eq!(decoder.feed(b'r'), Some(DisplayUpdate::Blank));
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_reset_mid_ascii_sequence() {
        let mut decoder = CommandDecoder::new();
        decoder.feed_bytes(b"A123");
        assert_eq!(decoder.feed(b'R'), Some(DisplayUpdate::Blank));
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
        assert_eq!(decoder.cursor(), 0);

        // Following bytes are commands again, not payload
        assert_eq!(decoder.feed_bytes(b"45678"), None);
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_brightness() {
        let mut decoder = CommandDecoder::new();
        assert_eq!(
            decoder.feed_bytes(&[b'L', 0x00]),
            Some(DisplayUpdate::Brightness(Brightness::MIN))
        );
        assert_eq!(
            decoder.feed_bytes(&[b'l', 0xFF]),
            Some(DisplayUpdate::Brightness(Brightness::MAX))
        );
        // Level byte equal to a command letter is still a level
        assert_eq!(
            decoder.feed_bytes(&[b'L', b'R']),
            Some(DisplayUpdate::Brightness(Brightness::new(b'R')))
        );
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_unknown_command_ignored() {
        let mut decoder = CommandDecoder::new();
        assert_eq!(decoder.feed_bytes(b"xyz123\r\n"), None);
        assert_eq!(decoder.mode(), ProtocolMode::Idle);
    }

    #[test]
    fn test_restart_discards_partial_sequence() {
        let mut decoder = CommandDecoder::new();
        decoder.feed_bytes(b"B\x01\x02\x03");
        decoder.reset();
        let update = decoder.feed_bytes(b"AFFFFFFFF");
        assert_eq!(update, Some(DisplayUpdate::Commit([sym(b'F'); DIGIT_COUNT])));
    }

    proptest! {
        #[test]
        fn binary_payload_roundtrips(payload in any::<[u8; DIGIT_COUNT]>()) {
            let mut decoder = CommandDecoder::new();
            prop_assert_eq!(decoder.feed(b'B'), None);
            for &b in &payload[..DIGIT_COUNT - 1] {
                prop_assert_eq!(decoder.feed(b), None);
            }
            prop_assert_eq!(
                decoder.feed(payload[DIGIT_COUNT - 1]),
                Some(DisplayUpdate::Commit(payload))
            );
        }

        #[test]
        fn ascii_hex_matches_table(digits in proptest::collection::vec(0usize..16, DIGIT_COUNT)) {
            let mut decoder = CommandDecoder::new();
            decoder.feed(b'A');
            let mut expected = [0u8; DIGIT_COUNT];
            let mut update = None;
            for (slot, &d) in digits.iter().enumerate() {
                let c = b"0123456789ABCDEF"[d];
                expected[slot] = HEX_SYMBOLS[d];
                update = decoder.feed(c);
            }
            prop_assert_eq!(update, Some(DisplayUpdate::Commit(expected)));
            prop_assert!(expected.iter().all(|m| m & SEG_DP == 0));
        }

        #[test]
        fn cursor_never_exceeds_digit_count(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut decoder = CommandDecoder::new();
            for b in bytes {
                decoder.feed(b);
                prop_assert!(decoder.cursor() < DIGIT_COUNT);
            }
        }
    }
}
