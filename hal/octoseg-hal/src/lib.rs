//! Octoseg Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the display logic is written
//! against. Chip-specific crates implement them, and host tests implement
//! them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  octoseg-display / octoseg-vt100        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  octoseg-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ octoseg-hal-  │
//!             │   stm32f0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication, with
//!   [`uart::IoRx`] adapting `embedded-io` readers

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use uart::{IoRx, SerialReadError, UartConfig, UartRx, UartTx};
