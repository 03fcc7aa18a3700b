use std::io::{self, Write};

use bareio::{Console, Firmware};
use log::{debug, error};

/// Runs scripts against a byte stream, usually stdout.
///
/// The console is infallible, so the first write error is kept and later
/// writes are dropped. A shutdown request only sets a flag.
pub struct HostMachine<W: Write> {
    out: W,
    error: Option<io::Error>,
    shutdown_requested: bool,
}

impl HostMachine<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> HostMachine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            shutdown_requested: false,
        }
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Flush the writer and hand it back, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Console for HostMachine<W> {
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(bytes) {
            error!("console write failed: {err}");
            self.error = Some(err);
        }
    }
}

impl<W: Write> Firmware for HostMachine<W> {
    fn request_shutdown(&mut self) {
        debug!("shutdown requested");
        self.shutdown_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_reach_the_buffer() {
        let mut machine = HostMachine::new(Vec::new());
        machine.write_line(b"Bare IO!");
        machine.write_byte(b'x');
        assert!(!machine.shutdown_requested());
        assert_eq!(machine.finish().unwrap(), b"Bare IO!\nx");
    }

    #[test]
    fn shutdown_sets_flag() {
        let mut machine = HostMachine::new(Vec::new());
        machine.request_shutdown();
        assert!(machine.shutdown_requested());
    }

    #[test]
    fn first_write_error_is_reported() {
        let mut machine = HostMachine::new(Broken);
        machine.write_str("a");
        machine.write_str("b");
        let err = machine.finish().err().unwrap();
        assert_eq!(err.to_string(), "pipe closed");
    }
}
