use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};

use crate::pl011::{Pl011, QEMU_VIRT_UART0};

/// Writes log records straight to a PL011.
pub struct UartLogger {
    base: usize,
    level: LevelFilter,
}

impl UartLogger {
    /// # Safety
    /// See [`Pl011::new`].
    pub const unsafe fn new(base: usize, level: LevelFilter) -> Self {
        Self { base, level }
    }
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // SAFETY: upheld by the caller of `UartLogger::new`.
        let mut uart = unsafe { Pl011::new(self.base) };
        let _ = writeln!(uart, "[{} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: UartLogger =
    // SAFETY: UART0 is always mapped on the QEMU virt machine.
    unsafe { UartLogger::new(QEMU_VIRT_UART0, LevelFilter::Warn) };

/// Route `log` records at `Warn` and above to UART0.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn records_below_level_are_dropped() {
        let mut register = [0u8; 4];
        let logger = unsafe { UartLogger::new(register.as_mut_ptr() as usize, LevelFilter::Warn) };

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("quiet"))
                .build(),
        );
        assert_eq!(register[0], 0);

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("bareio")
                .args(format_args!("loud"))
                .build(),
        );
        assert_eq!(register[0], b'\n');
    }
}
