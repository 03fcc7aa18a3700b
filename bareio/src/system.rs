/// Byte sink the runtime prints to.
///
/// Writes are unbuffered and cannot fail from the runtime's point of view.
pub trait Console {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// `bytes` followed by a single `\n`.
    fn write_line(&mut self, bytes: &[u8]) {
        self.write_bytes(bytes);
        self.write_byte(b'\n');
    }
}

/// Privileged calls into machine firmware.
pub trait Firmware {
    /// Power the machine off. On hardware this does not return.
    fn request_shutdown(&mut self);
}

/// Everything a script can observably do.
pub trait Machine: Console + Firmware {}

impl<T: Console + Firmware + ?Sized> Machine for T {}

impl<C: Console + ?Sized> Console for &mut C {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}

impl<F: Firmware + ?Sized> Firmware for &mut F {
    fn request_shutdown(&mut self) {
        (**self).request_shutdown();
    }
}
