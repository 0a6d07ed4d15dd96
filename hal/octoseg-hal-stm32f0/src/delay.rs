//! Cycle-counted busy wait

use embedded_hal::delay::DelayNs;

/// Busy-wait delay counted in core clock cycles
///
/// Spins on the core clock with no timer reads per call, so short waits
/// cost close to what they ask for. Waits are at least as long as
/// requested.
#[derive(Debug, Clone, Copy)]
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    /// Delay for a core running at `sysclk_hz`
    pub const fn new(sysclk_hz: u32) -> Self {
        Self {
            cycles_per_us: sysclk_hz / 1_000_000,
        }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let whole = (ns / 1_000).saturating_mul(self.cycles_per_us);
        let part = (ns % 1_000) * self.cycles_per_us / 1_000;
        cortex_m::asm::delay(whole.saturating_add(part).max(1));
    }

    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(self.cycles_per_us));
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}
