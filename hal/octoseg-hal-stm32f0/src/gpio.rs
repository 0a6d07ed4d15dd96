//! GPIO adapters for STM32F0

use embassy_stm32::gpio::Output;
use octoseg_hal::OutputPin;

/// Push-pull output driving one shift-register line
pub struct Pin<'d>(Output<'d>);

impl<'d> Pin<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }

    pub fn into_inner(self) -> Output<'d> {
        self.0
    }
}

impl OutputPin for Pin<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
