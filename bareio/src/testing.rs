//! In-memory machine for running scripts without hardware.

use std::vec::Vec;

use crate::{Console, Firmware};

/// Records every byte written and counts shutdown requests.
///
/// Shutdown requests return, so the interpreter unwinds with
/// [`Unwind::Halted`](crate::Unwind::Halted) instead of stopping the process.
#[derive(Debug, Default)]
pub struct RecordingMachine {
    pub output: Vec<u8>,
    pub shutdowns: usize,
}

impl RecordingMachine {
    /// Output as text; invalid UTF-8 is shown as `<binary>`.
    pub fn output_str(&self) -> &str {
        std::str::from_utf8(&self.output).unwrap_or("<binary>")
    }

    pub fn halted(&self) -> bool {
        self.shutdowns > 0
    }
}

impl Console for RecordingMachine {
    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
}

impl Firmware for RecordingMachine {
    fn request_shutdown(&mut self) {
        self.shutdowns += 1;
    }
}
