//! Shift-register backend
//!
//! Two 74HC4094 registers are chained into one 16-bit word:
//!
//! ```text
//!  bit 15 ............ 8   7 ............. 0
//!  ┌─────────────────────┬───────────────────┐
//!  │ digit select (1-hot)│ segments HGFEDCBA │
//!  └─────────────────────┴───────────────────┘
//! ```
//!
//! The word is shifted out MSB first, one clock pulse per bit, and then
//! latched onto the outputs with a strobe pulse.

use octoseg_hal::OutputPin;
use octoseg_protocol::DIGIT_COUNT;

/// Word that lights nothing
pub const BLANK_WORD: u16 = 0;

/// Encode one digit for the shift-register chain
///
/// A digit with no lit segments selects no digit either, so an empty
/// symbol drives the same word as [`BLANK_WORD`].
///
/// `place` must be below [`DIGIT_COUNT`]; larger values wrap around the
/// eight select lines.
pub fn digit_word(place: usize, segments: u8) -> u16 {
    debug_assert!(place < DIGIT_COUNT);
    if segments == 0 {
        return BLANK_WORD;
    }
    (1u16 << ((place % DIGIT_COUNT) + 8)) | u16::from(segments)
}

/// Something that can latch a 16-bit digit word onto the display
pub trait SegmentBus {
    /// Shift `word` out and latch it
    fn load(&mut self, word: u16);

    /// Turn every digit off
    fn blank(&mut self) {
        self.load(BLANK_WORD);
    }
}

impl<T: SegmentBus + ?Sized> SegmentBus for &mut T {
    fn load(&mut self, word: u16) {
        (**self).load(word);
    }
}

/// Bit-banged shift-register chain on three output pins
pub struct ShiftChain<D, C, S> {
    data: D,
    clock: C,
    strobe: S,
}

impl<D: OutputPin, C: OutputPin, S: OutputPin> ShiftChain<D, C, S> {
    pub fn new(data: D, clock: C, strobe: S) -> Self {
        Self {
            data,
            clock,
            strobe,
        }
    }

    /// Give back the pins
    pub fn release(self) -> (D, C, S) {
        (self.data, self.clock, self.strobe)
    }
}

impl<D: OutputPin, C: OutputPin, S: OutputPin> SegmentBus for ShiftChain<D, C, S> {
    fn load(&mut self, word: u16) {
        for bit in (0..16).rev() {
            self.data.set_state(word & (1 << bit) != 0);
            self.clock.pulse();
        }
        self.strobe.pulse();
    }
}
