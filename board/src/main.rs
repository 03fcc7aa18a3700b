#![no_std]
#![no_main]

use core::fmt::Write;
use core::panic::PanicInfo;

use board::pl011::{Pl011, QEMU_VIRT_UART0};
use board::psci;

include!(concat!(env!("OUT_DIR"), "/script.rs"));

// Entry from QEMU: set up the stack, clear .bss, enter Rust.
#[cfg(target_arch = "aarch64")]
core::arch::global_asm!(
    ".section .text._start, \"ax\"",
    ".global _start",
    "_start:",
    "    ldr x0, =__stack_top",
    "    mov sp, x0",
    "    ldr x0, =__bss_start",
    "    ldr x1, =__bss_end",
    "2:  cmp x0, x1",
    "    b.hs 3f",
    "    str xzr, [x0], #8",
    "    b 2b",
    "3:  bl bareio_runtime_main",
    "4:  wfe",
    "    b 4b",
);

#[unsafe(no_mangle)]
pub extern "C" fn bareio_runtime_main() -> ! {
    board::boot(&SCRIPT)
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // SAFETY: UART0 is always mapped on the virt machine.
    let mut uart = unsafe { Pl011::new(QEMU_VIRT_UART0) };
    let _ = writeln!(uart, "panic: {info}");
    psci::halt()
}
