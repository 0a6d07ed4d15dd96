//! Time-multiplexed refresh with duty-cycle dimming
//!
//! Each digit is lit on its own for `HOLD_STEPS` short delays. When the
//! step counter reaches the brightness threshold the chain is blanked for
//! the rest of the slot, so a lower threshold means a shorter on-time.
//!
//! ```text
//!  digit n   ┌──────────────┐
//!  lit       │              └─────────────── (blank)
//!            0          threshold          255
//! ```

use embedded_hal::delay::DelayNs;
use octoseg_protocol::brightness::HOLD_STEPS;
use octoseg_protocol::DIGIT_COUNT;

use crate::backend::{digit_word, SegmentBus};
use crate::buffer::{DisplayBuffer, SharedDisplay};

/// Refresh timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiplexConfig {
    /// Delay per hold step in microseconds
    pub step_delay_us: u32,
}

impl MultiplexConfig {
    /// Nominal length of one pass over all digits in microseconds
    ///
    /// Counts only the hold steps; shifting each digit out adds a little.
    pub const fn frame_period_us(&self) -> u32 {
        DIGIT_COUNT as u32 * HOLD_STEPS as u32 * self.step_delay_us
    }

    /// Nominal refresh rate of the whole display
    pub const fn refresh_hz(&self) -> u32 {
        match self.frame_period_us() {
            0 => 0,
            period => 1_000_000 / period,
        }
    }
}

impl Default for MultiplexConfig {
    fn default() -> Self {
        // 8 digits x 255 steps x 2 us is a ~4 ms frame
        Self { step_delay_us: 2 }
    }
}

/// Foreground refresh loop
pub struct Multiplexer<B, D> {
    bus: B,
    delay: D,
    config: MultiplexConfig,
}

impl<B: SegmentBus, D: DelayNs> Multiplexer<B, D> {
    pub fn new(bus: B, delay: D, config: MultiplexConfig) -> Self {
        Self { bus, delay, config }
    }

    pub fn config(&self) -> &MultiplexConfig {
        &self.config
    }

    /// Draw one full pass over all digits
    pub fn refresh(&mut self, frame: &DisplayBuffer) {
        let threshold = frame.threshold();

        for (place, &segments) in frame.digits().iter().enumerate() {
            self.bus.load(digit_word(place, segments));

            for step in 0..HOLD_STEPS {
                if step == threshold {
                    self.bus.blank();
                }
                self.delay.delay_us(self.config.step_delay_us);
            }
        }
    }

    /// Refresh forever from the shared buffer
    ///
    /// The buffer is copied once per pass so a commit lands between
    /// frames and never halfway through one.
    pub fn run(&mut self, display: &SharedDisplay) -> ! {
        loop {
            let frame = display.snapshot();
            self.refresh(&frame);
        }
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
