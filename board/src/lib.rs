//! BareIO on the QEMU `virt` machine (aarch64).
//!
//! The firmware binary (`bareio-qemu`, feature `image`) embeds one script
//! compiled by `stage0` at build time and runs it against UART0 and PSCI:
//!
//! ```text
//! BAREIO_SCRIPT=scripts/hello.bio cargo build -p board --features image \
//!     --target aarch64-unknown-none --release
//! qemu-system-aarch64 -M virt -cpu cortex-a53 -nographic \
//!     -kernel target/aarch64-unknown-none/release/bareio-qemu
//! ```

#![cfg_attr(not(test), no_std)]

pub mod logger;
pub mod pl011;
pub mod psci;

use core::fmt;

use bareio::{
    Console, Fault, Firmware, InterpreterSettings, Machine, Outcome, Script,
};
use log::debug;

use crate::pl011::{Pl011, QEMU_VIRT_UART0};

/// Bytes reserved for the boot stack by `link.ld`.
pub const STACK_SIZE: usize = 0x80000;

/// Argument nesting allowed on the board.
///
/// Each level costs a few evaluator frames; the limit leaves at least
/// `STACK_SIZE / MAX_DEPTH` bytes per level so `NestingTooDeep` fires before
/// the stack runs into `.bss`.
pub const MAX_DEPTH: usize = 64;

const _: () = assert!(STACK_SIZE / MAX_DEPTH >= 8192);

pub fn settings() -> InterpreterSettings {
    InterpreterSettings {
        max_depth: MAX_DEPTH,
    }
}

/// UART0 for output, PSCI for shutdown.
pub struct QemuVirt {
    uart: Pl011,
}

impl QemuVirt {
    /// # Safety
    /// Must run on the QEMU `virt` machine with UART0 identity mapped.
    pub unsafe fn new() -> Self {
        Self {
            // SAFETY: forwarded to the caller.
            uart: unsafe { Pl011::new(QEMU_VIRT_UART0) },
        }
    }
}

impl Console for QemuVirt {
    fn write_byte(&mut self, byte: u8) {
        self.uart.write_byte(byte);
    }
}

impl Firmware for QemuVirt {
    fn request_shutdown(&mut self) {
        psci::system_off();
    }
}

/// `core::fmt` adapter over a [`Console`].
pub struct ConsoleWriter<'a>(pub &'a mut dyn Console);

impl fmt::Write for ConsoleWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}

/// Print `fault: <description>` on the console.
pub fn report_fault(console: &mut dyn Console, fault: &Fault) {
    let _ = fmt::Write::write_fmt(
        &mut ConsoleWriter(console),
        format_args!("fault: {fault}\n"),
    );
}

/// Run `script` from the globals context with [`settings`] and report a fault if it raises one.
pub fn execute<M: Machine>(machine: &mut M, script: &Script<'_>) -> Result<(), Fault> {
    match bareio::run_with(machine, script, settings()) {
        Ok(Outcome::Halted) => Ok(()),
        Ok(Outcome::Completed(result)) => {
            debug!("script completed with {result:?}");
            Ok(())
        }
        Err(fault) => {
            report_fault(machine, &fault);
            Err(fault)
        }
    }
}

/// Run `script`, then power off. Used as the body of the firmware entry point.
pub fn boot(script: &Script<'_>) -> ! {
    logger::init();
    // SAFETY: only the firmware binary calls `boot`, on the virt machine.
    let mut machine = unsafe { QemuVirt::new() };
    let _ = execute(&mut machine, script);
    psci::halt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bareio::testing::RecordingMachine;
    use bareio::{Builtin, Message, Object, ObjectKind};

    fn leak<T: 'static>(items: Vec<T>) -> &'static [T] {
        Box::leak(items.into_boxed_slice())
    }

    /// `"x" printRange(<depth - 1>, 1) 0`, bottoming out in `0`.
    fn nested(depth: usize) -> Script<'static> {
        let one = Script::new(leak(vec![Message::Literal(Object::Integer(1)), Message::End]));
        let mut script =
            Script::new(leak(vec![Message::Literal(Object::Integer(0)), Message::End]));
        for _ in 0..depth {
            let arguments = leak(vec![script, one]);
            script = Script::new(leak(vec![
                Message::Literal(Object::string(b"x")),
                Message::send_with(Builtin::PrintRange, arguments),
                Message::Literal(Object::Integer(0)),
                Message::End,
            ]));
        }
        script
    }

    fn execute_on_board_stack(depth: usize) -> Result<(), Fault> {
        std::thread::Builder::new()
            .stack_size(STACK_SIZE)
            .spawn(move || {
                let mut machine = RecordingMachine::default();
                execute(&mut machine, &nested(depth))
            })
            .unwrap()
            .join()
            .unwrap()
    }

    static FAULTING: [Message<'static>; 3] = [
        Message::Literal(Object::Integer(3)),
        Message::send(Builtin::Halt),
        Message::End,
    ];

    static HALTING: [Message<'static>; 6] = [
        Message::Literal(Object::string(b"Bare IO!")),
        Message::send(Builtin::Print),
        Message::ResetContext,
        Message::send(Builtin::Halt),
        Message::Literal(Object::Integer(1)),
        Message::End,
    ];

    #[test]
    fn fault_is_reported_on_console() {
        let mut machine = RecordingMachine::default();
        let result = execute(&mut machine, &Script::new(&FAULTING));
        assert_eq!(
            result,
            Err(Fault::UnknownBuiltin {
                builtin: Builtin::Halt,
                receiver: ObjectKind::Integer,
            })
        );
        assert!(machine.output_str().starts_with("fault: "));
        assert!(machine.output_str().ends_with('\n'));
        assert!(!machine.halted());
    }

    #[test]
    fn halt_ends_execution_cleanly() {
        let mut machine = RecordingMachine::default();
        assert_eq!(execute(&mut machine, &Script::new(&HALTING)), Ok(()));
        assert_eq!(machine.output_str(), "Bare IO!\n");
        assert!(machine.halted());
    }

    #[test]
    fn linker_reserves_stack_size() {
        let script = include_str!("../link.ld");
        let line = script
            .lines()
            .find(|line| line.trim_start().starts_with("__stack_size"))
            .unwrap();
        let value = line.split('=').nth(1).unwrap().trim().trim_end_matches(';');
        let value = usize::from_str_radix(value.trim_start_matches("0x"), 16).unwrap();
        assert_eq!(value, STACK_SIZE);
    }

    #[test]
    fn deepest_allowed_nesting_fits_the_stack() {
        assert_eq!(execute_on_board_stack(MAX_DEPTH), Ok(()));
    }

    #[test]
    fn nesting_past_the_limit_faults_on_the_stack() {
        assert_eq!(
            execute_on_board_stack(MAX_DEPTH + 1),
            Err(Fault::NestingTooDeep { limit: MAX_DEPTH })
        );
    }
}
