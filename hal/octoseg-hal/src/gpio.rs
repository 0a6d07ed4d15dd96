//! GPIO pin abstractions
//!
//! The display needs three push-pull outputs (data, clock, strobe) and
//! no inputs.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Drive the pin high and straight back low
    ///
    /// Used for clock and strobe lines on shift registers, which latch
    /// on the rising edge.
    fn pulse(&mut self) {
        self.set_high();
        self.set_low();
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}
