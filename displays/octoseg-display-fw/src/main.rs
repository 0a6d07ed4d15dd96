//! Octoseg Display Firmware
//!
//! Firmware for the 8-digit seven-segment display (STM32F042K6).
//! Commands arrive on USART2 and every byte is echoed straight back.
//!
//! The refresh loop owns thread mode and never yields. Byte handling runs
//! on an interrupt executor so it preempts the loop between steps.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::USART2;
use embassy_stm32::usart::{self, RingBufferedUartRx, Uart};
use octoseg_display::{CommandLink, MultiplexConfig, Multiplexer, SharedDisplay, ShiftChain};
use octoseg_hal::UartConfig;
use octoseg_hal_stm32f0::{usart_config, CycleDelay, Pin, SerialTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    USART2 => usart::InterruptHandler<USART2>;
});

/// Core clock once HSI48 is selected
const SYSCLK_HZ: u32 = 48_000_000;

/// Live display state
static DISPLAY: SharedDisplay = SharedDisplay::new();

/// Executor for the receive task, borrowing the otherwise unused USART1 vector
static EXECUTOR_RX: InterruptExecutor = InterruptExecutor::new();

/// DMA ring for incoming command bytes
static RX_RING: StaticCell<[u8; 32]> = StaticCell::new();

#[interrupt]
unsafe fn USART1() {
    EXECUTOR_RX.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Octoseg Display Firmware starting...");

    // Run the core from the 48 MHz internal oscillator
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hsi48 = Some(Hsi48Config { sync_from_usb: false });
        config.rcc.sys = Sysclk::HSI48;
    }
    let p = embassy_stm32::init(config);

    // Shift-register chain (PA0=data, PA1=clock, PA4=strobe)
    let data = Pin::new(Output::new(p.PA0, Level::Low, Speed::High));
    let clock = Pin::new(Output::new(p.PA1, Level::Low, Speed::High));
    let strobe = Pin::new(Output::new(p.PA4, Level::Low, Speed::High));

    // Setup UART for commands (PA2=TX, PA3=RX on F042K6)
    let link_config = UartConfig::default();
    let uart = Uart::new(
        p.USART2,
        p.PA3, // RX
        p.PA2, // TX
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        usart_config(&link_config),
    )
    .unwrap();

    let (tx, rx) = uart.split();
    let rx = rx.into_ring_buffered(RX_RING.init([0; 32]));

    interrupt::USART1.set_priority(Priority::P1);
    let spawner = EXECUTOR_RX.start(interrupt::USART1);
    spawner.spawn(uart_rx_task(rx, SerialTx::new(tx))).unwrap();

    info!("Listening at {} baud", link_config.baudrate);

    let mux_config = MultiplexConfig::default();
    info!(
        "Refresh frame {} us ({} Hz) at {} MHz",
        mux_config.frame_period_us(),
        mux_config.refresh_hz(),
        SYSCLK_HZ / 1_000_000
    );

    let chain = ShiftChain::new(data, clock, strobe);
    let mut mux = Multiplexer::new(chain, CycleDelay::new(SYSCLK_HZ), mux_config);
    mux.run(&DISPLAY)
}

/// UART receive task - echoes and decodes display commands
#[embassy_executor::task]
async fn uart_rx_task(mut rx: RingBufferedUartRx<'static>, tx: SerialTx<'static, Async>) {
    info!("UART RX task started");

    let mut link = CommandLink::new(tx);
    let mut buf = [0u8; 8];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match link.on_byte(byte, &DISPLAY) {
                        Ok(Some(update)) => debug!("Display update: {:?}", update),
                        Ok(None) => trace!("RX {=u8:#04x} ({:?})", byte, link.decoder().mode()),
                        Err(e) => warn!("Echo failed: {:?}", e),
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
