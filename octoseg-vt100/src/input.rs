//! Blocking key input over a UART
//!
//! A terminal sends a whole escape sequence back to back, so a gap of a
//! couple of milliseconds after ESC means the user pressed ESC itself.
//! These helpers busy-wait for that gap; the caller's context is tied up
//! for at most [`ESC_TIMEOUT_MS`] per byte of a pending sequence.

use embedded_hal::delay::DelayNs;
use octoseg_hal::UartRx;

use crate::keys::{KeyDecoder, KeyHandler};

/// How long to wait for the next byte of an escape sequence
pub const ESC_TIMEOUT_MS: u32 = 2;

/// Decode `byte`, then keep pulling bytes while a sequence is open
///
/// Returns once the decoder is back in the ground state. On a receive
/// error the open sequence is expired before the error is returned, so
/// the decoder is never left waiting.
pub fn handle_key<H, R, D>(
    decoder: &mut KeyDecoder<H>,
    byte: u8,
    rx: &mut R,
    delay: &mut D,
) -> Result<(), R::Error>
where
    H: KeyHandler,
    R: UartRx,
    D: DelayNs,
{
    decoder.feed(byte);

    while decoder.is_pending() {
        delay.delay_ms(ESC_TIMEOUT_MS);

        match rx.try_read_byte() {
            Ok(Some(next)) => decoder.feed(next),
            Ok(None) => decoder.expire(),
            Err(e) => {
                decoder.expire();
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Wait for a byte from the terminal and decode it
pub fn read_key<H, R, D>(decoder: &mut KeyDecoder<H>, rx: &mut R, delay: &mut D) -> Result<(), R::Error>
where
    H: KeyHandler,
    R: UartRx,
    D: DelayNs,
{
    let byte = rx.read_byte()?;
    handle_key(decoder, byte, rx, delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{KeyEvent, SpecialKey};
    use heapless::{Deque, Vec};

    #[derive(Debug, PartialEq)]
    enum RxError {
        Empty,
        Overrun,
    }

    /// Receiver fed from a script; `None` entries are gaps where no byte
    /// has arrived yet when polled
    struct ScriptedRx {
        script: Deque<Option<u8>, 16>,
        fail_next_poll: bool,
    }

    impl ScriptedRx {
        fn new(items: &[Option<u8>]) -> Self {
            let mut script = Deque::new();
            for &item in items {
                script.push_back(item).unwrap();
            }
            Self {
                script,
                fail_next_poll: false,
            }
        }
    }

    impl UartRx for ScriptedRx {
        type Error = RxError;

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, RxError> {
            for slot in buf.iter_mut() {
                // Blocking reads skip over gaps
                loop {
                    match self.script.pop_front() {
                        Some(Some(b)) => {
                            *slot = b;
                            break;
                        }
                        Some(None) => continue,
                        None => return Err(RxError::Empty),
                    }
                }
            }
            Ok(buf.len())
        }

        fn try_read_byte(&mut self) -> Result<Option<u8>, RxError> {
            if self.fail_next_poll {
                self.fail_next_poll = false;
                return Err(RxError::Overrun);
            }
            Ok(self.script.pop_front().flatten())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    type Recorder = Vec<KeyEvent, 16>;

    fn decoder() -> KeyDecoder<impl FnMut(KeyEvent)> {
        KeyDecoder::with_handler(|_: KeyEvent| {})
    }

    #[test]
    fn test_lone_escape_times_out() {
        let mut events = Recorder::new();
        let mut decoder = KeyDecoder::with_handler(|e| events.push(e).unwrap());
        let mut rx = ScriptedRx::new(&[Some(0x1B), None, Some(b'x')]);
        let mut delay = CountingDelay::default();

        read_key(&mut decoder, &mut rx, &mut delay).unwrap();
        assert!(!decoder.is_pending());
        drop(decoder);

        assert_eq!(events.as_slice(), &[KeyEvent::special(SpecialKey::Esc)]);
        assert_eq!(delay.total_ns, u64::from(ESC_TIMEOUT_MS) * 1_000_000);
        // The byte after the gap belongs to the next keypress
        assert_eq!(rx.try_read_byte(), Ok(Some(b'x')));
    }

    #[test]
    fn test_page_up_sequence() {
        let mut events = Recorder::new();
        let mut decoder = KeyDecoder::with_handler(|e| events.push(e).unwrap());
        let mut rx = ScriptedRx::new(&[Some(b'['), Some(b'5'), Some(b'~')]);
        let mut delay = CountingDelay::default();

        handle_key(&mut decoder, 0x1B, &mut rx, &mut delay).unwrap();
        drop(decoder);

        assert_eq!(events.as_slice(), &[KeyEvent::special(SpecialKey::PageUp)]);
        assert_eq!(delay.total_ns, 3 * u64::from(ESC_TIMEOUT_MS) * 1_000_000);
    }

    #[test]
    fn test_receive_error_expires_sequence() {
        let mut events = Recorder::new();
        let mut decoder = KeyDecoder::with_handler(|e| events.push(e).unwrap());
        let mut rx = ScriptedRx::new(&[]);
        rx.fail_next_poll = true;
        let mut delay = CountingDelay::default();

        let result = handle_key(&mut decoder, 0x1B, &mut rx, &mut delay);
        assert_eq!(result, Err(RxError::Overrun));
        assert!(!decoder.is_pending());
        drop(decoder);

        assert_eq!(events.as_slice(), &[KeyEvent::special(SpecialKey::Esc)]);
    }

    #[test]
    fn test_plain_key_does_not_wait() {
        let mut decoder = decoder();
        let mut rx = ScriptedRx::new(&[]);
        let mut delay = CountingDelay::default();

        handle_key(&mut decoder, b'k', &mut rx, &mut delay).unwrap();
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_unregistered_handler_never_waits() {
        let mut decoder: KeyDecoder<fn(KeyEvent)> = KeyDecoder::new();
        let mut rx = ScriptedRx::new(&[Some(b'[')]);
        let mut delay = CountingDelay::default();

        handle_key(&mut decoder, 0x1B, &mut rx, &mut delay).unwrap();
        assert_eq!(delay.total_ns, 0);
        assert_eq!(rx.try_read_byte(), Ok(Some(b'[')));
    }
}
