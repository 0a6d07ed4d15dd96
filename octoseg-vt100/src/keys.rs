//! Terminal key decoding
//!
//! VT100-style terminals send most keys as the byte itself, but arrows,
//! Insert/Delete/PageUp/PageDown, F1-F4 and Home/End arrive as escape
//! sequences:
//!
//! ```text
//! ESC [ A..D        arrows (up, down, right, left)
//! ESC [ 2|3|5|6 ~   insert, delete, page up, page down
//! ESC O P..S        F1-F4
//! ESC O H|F         home, end
//! ```
//!
//! A sequence that breaks off partway is not discarded: the bytes consumed
//! so far are reported as ESC plus literals and the offending byte is
//! decoded again from the ground state.

use heapless::Deque;

const ESC: u8 = 0x1B;

/// Keys reported with the special flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpecialKey {
    Esc,
    Enter,
    Tab,
    Backspace,
    Up,
    Down,
    Right,
    Left,
    Insert,
    Delete,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    Home,
    End,
}

impl SpecialKey {
    /// Code carried in the key event
    pub const fn code(self) -> u8 {
        match self {
            SpecialKey::Esc => ESC,
            SpecialKey::Enter => 13,
            SpecialKey::Tab => 9,
            SpecialKey::Backspace => 8,
            SpecialKey::Up => b'A',
            SpecialKey::Down => b'B',
            SpecialKey::Right => b'C',
            SpecialKey::Left => b'D',
            SpecialKey::Insert => b'2',
            SpecialKey::Delete => b'3',
            SpecialKey::PageUp => b'5',
            SpecialKey::PageDown => b'6',
            SpecialKey::F1 => b'P',
            SpecialKey::F2 => b'Q',
            SpecialKey::F3 => b'R',
            SpecialKey::F4 => b'S',
            SpecialKey::Home => b'H',
            SpecialKey::End => b'F',
        }
    }

    /// Parse a special key from its event code
    pub fn from_code(code: u8) -> Option<Self> {
        let key = match code {
            ESC => SpecialKey::Esc,
            13 => SpecialKey::Enter,
            9 => SpecialKey::Tab,
            8 => SpecialKey::Backspace,
            b'A' => SpecialKey::Up,
            b'B' => SpecialKey::Down,
            b'C' => SpecialKey::Right,
            b'D' => SpecialKey::Left,
            b'2' => SpecialKey::Insert,
            b'3' => SpecialKey::Delete,
            b'5' => SpecialKey::PageUp,
            b'6' => SpecialKey::PageDown,
            b'P' => SpecialKey::F1,
            b'Q' => SpecialKey::F2,
            b'R' => SpecialKey::F3,
            b'S' => SpecialKey::F4,
            b'H' => SpecialKey::Home,
            b'F' => SpecialKey::End,
            _ => return None,
        };
        Some(key)
    }
}

/// A decoded keypress
///
/// Special and literal codes overlap (`Up` and `'A'` are both 65), the
/// `special` flag tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub code: u8,
    pub special: bool,
}

impl KeyEvent {
    pub const fn literal(code: u8) -> Self {
        Self {
            code,
            special: false,
        }
    }

    pub const fn special(key: SpecialKey) -> Self {
        Self {
            code: key.code(),
            special: true,
        }
    }

    /// The special key, if this event is one
    pub fn key(&self) -> Option<SpecialKey> {
        if self.special {
            SpecialKey::from_code(self.code)
        } else {
            None
        }
    }
}

/// Receiver of decoded key events
pub trait KeyHandler {
    fn on_key(&mut self, event: KeyEvent);
}

impl<F: FnMut(KeyEvent)> KeyHandler for F {
    fn on_key(&mut self, event: KeyEvent) {
        self(event)
    }
}

/// Decoder state between bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Not inside a sequence
    #[default]
    Ground,
    /// Got ESC
    Esc,
    /// Got ESC [
    Bracket,
    /// Got ESC O
    O,
    /// Got ESC [ and a digit, waiting for `~`
    AwaitTilde(u8),
}

/// Bytes waiting to be decoded again after an abort
///
/// The deepest abort (a broken `ESC [ n ~`) requeues the remembered digit
/// and the current byte; neither can abort again from ground.
type Pending = Deque<u8, 2>;

/// State machine turning terminal input into [`KeyEvent`]s
#[derive(Debug)]
pub struct KeyDecoder<H> {
    state: KeyState,
    handler: Option<H>,
}

impl<H> Default for KeyDecoder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> KeyDecoder<H> {
    /// Create a decoder with no handler; input is dropped until one is set
    pub const fn new() -> Self {
        Self {
            state: KeyState::Ground,
            handler: None,
        }
    }

    /// Create a decoder delivering events to `handler`
    pub const fn with_handler(handler: H) -> Self {
        Self {
            state: KeyState::Ground,
            handler: Some(handler),
        }
    }

    /// Register the handler, replacing any previous one
    pub fn set_handler(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// Unregister and return the handler
    pub fn take_handler(&mut self) -> Option<H> {
        self.handler.take()
    }

    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    /// True while inside an escape sequence
    ///
    /// The caller should wait [`crate::ESC_TIMEOUT_MS`] for the next byte
    /// and call [`KeyDecoder::expire`] if none arrives.
    pub fn is_pending(&self) -> bool {
        self.state != KeyState::Ground
    }
}

impl<H: KeyHandler> KeyDecoder<H> {
    /// Decode one byte received from the terminal
    pub fn feed(&mut self, byte: u8) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };

        let mut pending = Pending::new();
        requeue(&mut pending, byte);
        self.state = drain(self.state, handler, &mut pending);
    }

    /// Treat the current sequence as finished
    ///
    /// Called when no further byte arrived within the timeout. A lone ESC
    /// becomes an ESC keypress; longer fragments are reported as ESC plus
    /// literals.
    pub fn expire(&mut self) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };

        let mut pending = Pending::new();
        let state = abort(self.state, handler, &mut pending);
        self.state = drain(state, handler, &mut pending);
    }
}

/// Put `byte` at the front of the worklist
///
/// At most two bytes are ever queued: a rejected byte plus the digit of a
/// broken `ESC [ n` sequence. Stepping from ground never requeues.
fn requeue(pending: &mut Pending, byte: u8) {
    let queued = pending.push_front(byte);
    debug_assert!(queued.is_ok(), "key worklist overflow");
}

fn drain<H: KeyHandler>(mut state: KeyState, handler: &mut H, pending: &mut Pending) -> KeyState {
    while let Some(byte) = pending.pop_front() {
        state = step(state, byte, handler, pending);
    }
    state
}

fn step<H: KeyHandler>(state: KeyState, byte: u8, handler: &mut H, pending: &mut Pending) -> KeyState {
    match state {
        KeyState::Ground => match byte {
            ESC => KeyState::Esc,
            13 | 9 | 8 => {
                handler.on_key(KeyEvent {
                    code: byte,
                    special: true,
                });
                KeyState::Ground
            }
            _ => {
                handler.on_key(KeyEvent::literal(byte));
                KeyState::Ground
            }
        },
        KeyState::Esc => match byte {
            b'[' => KeyState::Bracket,
            b'O' => KeyState::O,
            _ => reject(state, byte, handler, pending),
        },
        KeyState::Bracket => match byte {
            b'A'..=b'D' => {
                handler.on_key(KeyEvent {
                    code: byte,
                    special: true,
                });
                KeyState::Ground
            }
            b'2' | b'3' | b'5' | b'6' => KeyState::AwaitTilde(byte),
            _ => reject(state, byte, handler, pending),
        },
        KeyState::O => match byte {
            b'P'..=b'S' | b'H' | b'F' => {
                handler.on_key(KeyEvent {
                    code: byte,
                    special: true,
                });
                KeyState::Ground
            }
            _ => reject(state, byte, handler, pending),
        },
        KeyState::AwaitTilde(code) => match byte {
            b'~' => {
                handler.on_key(KeyEvent {
                    code,
                    special: true,
                });
                KeyState::Ground
            }
            _ => reject(state, byte, handler, pending),
        },
    }
}

/// Abort on an unexpected byte, which is decoded again afterwards
fn reject<H: KeyHandler>(state: KeyState, byte: u8, handler: &mut H, pending: &mut Pending) -> KeyState {
    requeue(pending, byte);
    abort(state, handler, pending)
}

/// Report the partial sequence as ESC plus literals
fn abort<H: KeyHandler>(state: KeyState, handler: &mut H, pending: &mut Pending) -> KeyState {
    match state {
        KeyState::Ground => {}
        KeyState::Esc => {
            handler.on_key(KeyEvent::special(SpecialKey::Esc));
        }
        KeyState::Bracket => {
            handler.on_key(KeyEvent::special(SpecialKey::Esc));
            handler.on_key(KeyEvent::literal(b'['));
        }
        KeyState::O => {
            handler.on_key(KeyEvent::special(SpecialKey::Esc));
            handler.on_key(KeyEvent::literal(b'O'));
        }
        KeyState::AwaitTilde(code) => {
            handler.on_key(KeyEvent::special(SpecialKey::Esc));
            handler.on_key(KeyEvent::literal(b'['));
            // The digit goes before whatever byte broke the sequence
            requeue(pending, code);
        }
    }
    KeyState::Ground
}
