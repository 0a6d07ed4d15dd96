//! STM32F0-specific HAL for the Octoseg firmware
//!
//! Adapters from `embassy-stm32` peripherals onto the `octoseg-hal`
//! traits, so the display crates can drive real pins and a real USART.
//!
//! - STM32F042K6 (display board)
//!
//! # Features
//!
//! - `stm32f042k6` - Enable support for STM32F042K6T6
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod delay;
pub mod gpio;
pub mod uart;

pub use delay::CycleDelay;
pub use gpio::Pin;
pub use uart::{usart_config, SerialRx, SerialTx, UartBusError};
