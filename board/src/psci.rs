//! Power State Coordination Interface calls through the hypervisor conduit.

const FAST_CALL: u32 = 1 << 31;
const STANDARD_SERVICE: u32 = 4 << 24;

/// PSCI 0.2 `SYSTEM_OFF`.
pub const SYSTEM_OFF: u32 = FAST_CALL | STANDARD_SERVICE | 0x8;

/// Ask the firmware to power the machine off.
///
/// Returns only if the call was not honoured.
#[cfg(target_arch = "aarch64")]
pub fn system_off() {
    // SAFETY: SYSTEM_OFF takes no arguments; x0 is clobbered by the result.
    unsafe {
        core::arch::asm!(
            "hvc #0",
            inout("x0") SYSTEM_OFF as u64 => _,
            options(nomem, nostack),
        );
    }
}

#[cfg(not(target_arch = "aarch64"))]
pub fn system_off() {
    log::warn!("PSCI SYSTEM_OFF is only available on aarch64");
}

/// Stop the core for good.
pub fn halt() -> ! {
    system_off();
    loop {
        wait_for_event();
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn wait_for_event() {
    // SAFETY: `wfe` has no memory effects.
    unsafe { core::arch::asm!("wfe", options(nomem, nostack)) };
}

#[cfg(not(target_arch = "aarch64"))]
#[inline(always)]
fn wait_for_event() {
    core::hint::spin_loop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_off_function_id() {
        assert_eq!(SYSTEM_OFF, 0x8400_0008);
    }
}
