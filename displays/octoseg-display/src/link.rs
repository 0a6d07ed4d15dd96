//! Command byte handling on the receive side

use octoseg_hal::UartTx;
use octoseg_protocol::{CommandDecoder, DisplayUpdate};

use crate::buffer::SharedDisplay;

/// Echoes, decodes and publishes incoming command bytes
///
/// Each byte is echoed before it is decoded, so the host sees its echo
/// before the display can change because of it.
pub struct CommandLink<T> {
    tx: T,
    decoder: CommandDecoder,
}

impl<T: UartTx> CommandLink<T> {
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            decoder: CommandDecoder::new(),
        }
    }

    pub fn decoder(&self) -> &CommandDecoder {
        &self.decoder
    }

    /// Handle one received byte
    ///
    /// The byte is always decoded and applied, even when the echo fails;
    /// the echo error is returned afterwards.
    pub fn on_byte(
        &mut self,
        byte: u8,
        display: &SharedDisplay,
    ) -> Result<Option<DisplayUpdate>, T::Error> {
        let echoed = self.tx.write_byte(byte);

        let update = self.decoder.feed(byte);
        if let Some(update) = update {
            display.apply(update);
        }

        echoed.map(|()| update)
    }

    pub fn release(self) -> T {
        self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DisplayBuffer;
    use heapless::Vec;
    use octoseg_protocol::segments::{hex_symbol, SEG_DP};
    use octoseg_protocol::Brightness;
    use proptest::prelude::*;

    /// Transmitter that records what the display showed at each echo
    struct EchoRecorder<'a> {
        display: &'a SharedDisplay,
        echoes: Vec<(u8, DisplayBuffer), 64>,
        fail: bool,
    }

    impl<'a> EchoRecorder<'a> {
        fn new(display: &'a SharedDisplay) -> Self {
            Self {
                display,
                echoes: Vec::new(),
                fail: false,
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct TxFault;

    impl UartTx for EchoRecorder<'_> {
        type Error = TxFault;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), TxFault> {
            if self.fail {
                return Err(TxFault);
            }
            for &byte in data {
                self.echoes.push((byte, self.display.snapshot())).unwrap();
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), TxFault> {
            Ok(())
        }
    }

    fn send(link: &mut CommandLink<EchoRecorder<'_>>, display: &SharedDisplay, bytes: &[u8]) {
        for &byte in bytes {
            link.on_byte(byte, display).unwrap();
        }
    }

    fn hex(bytes: &[u8; 8]) -> [u8; 8] {
        bytes.map(|b| hex_symbol(b).unwrap())
    }

    #[test]
    fn test_ascii_commit() {
        let display = SharedDisplay::new();
        let mut link = CommandLink::new(EchoRecorder::new(&display));

        send(&mut link, &display, b"A0123ABCD");
        assert_eq!(display.snapshot().digits(), &hex(b"0123ABCD"));
    }

    #[test]
    fn test_decimal_points() {
        let display = SharedDisplay::new();
        let mut link = CommandLink::new(EchoRecorder::new(&display));

        send(&mut link, &display, b"A1.2.345678");
        let digits = *display.snapshot().digits();

        let mut expected = hex(b"12345678");
        expected[0] |= SEG_DP;
        expected[1] |= SEG_DP;
        assert_eq!(digits, expected);
    }

    #[test]
    fn test_binary_and_brightness() {
        let display = SharedDisplay::new();
        let mut link = CommandLink::new(EchoRecorder::new(&display));

        send(&mut link, &display, &[b'B', 1, 2, 4, 8, 16, 32, 64, 128]);
        send(&mut link, &display, &[b'L', 0]);

        let state = display.snapshot();
        assert_eq!(state.digits(), &[1, 2, 4, 8, 16, 32, 64, 128]);
        assert_eq!(state.brightness(), Brightness::MIN);
    }

    #[test]
    fn test_reset_blanks_live_display() {
        let display = SharedDisplay::new();
        let mut link = CommandLink::new(EchoRecorder::new(&display));

        send(&mut link, &display, b"AFFFFFFFF");
        assert!(!display.snapshot().is_blank());

        send(&mut link, &display, b"A12R");
        assert!(display.snapshot().is_blank());
    }

    #[test]
    fn test_echo_failure_still_applies() {
        let display = SharedDisplay::new();
        let mut recorder = EchoRecorder::new(&display);
        recorder.fail = true;
        let mut link = CommandLink::new(recorder);

        assert_eq!(link.on_byte(b'L', &display), Err(TxFault));
        assert_eq!(link.on_byte(0x10, &display), Err(TxFault));
        assert_eq!(display.snapshot().brightness(), Brightness::new(0x10));
    }

    proptest! {
        #[test]
        fn prop_echo_precedes_effects(bytes in proptest::collection::vec(any::<u8>(), 0..48)) {
            let display = SharedDisplay::new();
            let mut link = CommandLink::new(EchoRecorder::new(&display));

            let mut before = Vec::<DisplayBuffer, 64>::new();
            for &byte in &bytes {
                before.push(display.snapshot()).unwrap();
                link.on_byte(byte, &display).unwrap();
            }

            let recorder = link.release();
            prop_assert_eq!(recorder.echoes.len(), bytes.len());
            for (i, (echoed, seen)) in recorder.echoes.iter().enumerate() {
                prop_assert_eq!(*echoed, bytes[i]);
                // At echo time the display still shows the state from before the byte
                prop_assert_eq!(*seen, before[i]);
            }
        }
    }
}
