//! Octoseg Display Command Protocol
//!
//! This crate defines the byte-oriented UART protocol used to drive the
//! 8-digit seven-segment display, plus the lookup tables it relies on.
//!
//! # Protocol Overview
//!
//! Commands are single letters, optionally followed by a payload:
//! ```text
//! ┌──────┬──────────────────────────────────────────────────────┐
//! │ R    │ blank all digits                                     │
//! │ A... │ up to 8 ASCII symbols: 0-9 A-F, '-', '.', other=blank │
//! │ B... │ exactly 8 raw segment masks (0bHGFEDCBA)             │
//! │ L l  │ brightness level 0-255                               │
//! └──────┴──────────────────────────────────────────────────────┘
//! ```
//!
//! Every byte is echoed back by the receiver. There is no framing,
//! checksum or acknowledgement; unknown bytes degrade to a blank symbol
//! or are ignored.

#![no_std]
#![deny(unsafe_code)]

pub mod brightness;
pub mod command;
pub mod segments;

pub use brightness::Brightness;
pub use command::{CommandDecoder, DisplayUpdate, ProtocolMode};
pub use segments::{Digits, DIGIT_COUNT};
