//! Transmit side of the ARM PL011 UART.

use core::fmt;
use core::ptr;

/// UART0 on the QEMU `virt` machine.
pub const QEMU_VIRT_UART0: usize = 0x0900_0000;

/// Byte offset of the data register (UARTDR).
const DATA_REGISTER: usize = 0x00;

/// A PL011 whose data register is written directly.
///
/// The flag register is not polled; QEMU accepts every byte immediately.
#[derive(Debug)]
pub struct Pl011 {
    base: usize,
}

impl Pl011 {
    /// # Safety
    /// `base` must be the address of a mapped PL011 register block, or of at
    /// least four writable bytes, for as long as the value is used.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        let data = (self.base + DATA_REGISTER) as *mut u8;
        // SAFETY: `new` requires `base` to address the register block.
        unsafe { ptr::write_volatile(data, byte) };
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

impl fmt::Write for Pl011 {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn bytes_land_in_the_data_register() {
        let mut register = [0u8; 4];
        let mut uart = unsafe { Pl011::new(register.as_mut_ptr() as usize) };
        uart.write_bytes(b"ab");
        assert_eq!(register[0], b'b');
        uart.write_byte(b'\n');
        assert_eq!(register, [b'\n', 0, 0, 0]);
    }

    #[test]
    fn formatted_output_ends_with_last_byte() {
        let mut register = [0u8; 4];
        let mut uart = unsafe { Pl011::new(register.as_mut_ptr() as usize) };
        write!(uart, "fault: {}", 42).unwrap();
        assert_eq!(register[0], b'2');
    }
}
