//! UART driver for STM32F0
//!
//! Wraps the embassy USART transmitter for the blocking echo path and
//! maps its errors onto [`UartBusError`]. The receive side goes through
//! the generic `embedded-io` adapter, so a blocking USART receiver can
//! feed the VT100 key reader.

use embassy_stm32::mode::{Blocking, Mode};
use embassy_stm32::usart::{self, Error as UsartError};
use octoseg_hal::uart::{DataBits, Parity, StopBits};
use octoseg_hal::{IoRx, UartConfig, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too long for a single transfer
    BufferTooLong,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooLong,
            _ => UartBusError::Other,
        }
    }
}

/// Build the embassy USART configuration for a link
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Blocking transmitter on top of an embassy `UartTx`
///
/// Async-capable transmitters work too; only the blocking calls are used.
pub struct SerialTx<'d, M: Mode> {
    inner: usart::UartTx<'d, M>,
}

impl<'d, M: Mode> SerialTx<'d, M> {
    pub fn new(inner: usart::UartTx<'d, M>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> usart::UartTx<'d, M> {
        self.inner
    }
}

impl<M: Mode> UartTx for SerialTx<'_, M> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.blocking_flush()?;
        Ok(())
    }
}

/// Blocking receiver with a non-blocking poll, for the key reader
pub type SerialRx<'d> = IoRx<usart::UartRx<'d, Blocking>>;
