//! Seven-segment display driving for Octoseg
//!
//! This crate provides:
//! - `DisplayBuffer` / `SharedDisplay`: what the digits show and how bright,
//!   shared between the receive interrupt and the refresh loop
//! - `SegmentBus` trait and `ShiftChain`: loading one digit into the two
//!   chained shift registers
//! - `Multiplexer`: the foreground refresh loop with duty-cycle dimming
//! - `CommandLink`: echo and decode of the command byte stream
//!
//! # Architecture
//!
//! ```text
//!  UART RX irq ──► CommandLink ──► SharedDisplay ◄── Multiplexer ──► ShiftChain
//!       ▲              │                                               (74HC4094 x2)
//!       └── echo ◄─────┘
//! ```
//!
//! Only the receive side writes the shared buffer and only the multiplexer
//! reads it. Both go through a critical section, so a full eight digit
//! update is observed all at once or not at all.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod buffer;
pub mod link;
pub mod multiplex;

// Re-export key types
pub use backend::{digit_word, SegmentBus, ShiftChain, BLANK_WORD};
pub use buffer::{DisplayBuffer, SharedDisplay};
pub use link::CommandLink;
pub use multiplex::{MultiplexConfig, Multiplexer};
