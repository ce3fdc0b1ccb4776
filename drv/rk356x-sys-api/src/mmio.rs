// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// 32-bit access to memory-mapped registers at absolute physical addresses.
pub trait Mmio {
    fn read32(&self, addr: usize) -> u32;
    fn write32(&self, addr: usize, value: u32);
}

/// Direct volatile access, for use on the target with the MMU off or
/// identity-mapped.
pub struct Volatile(());

impl Volatile {
    /// # Safety
    ///
    /// Every address later passed to this handle must be a mapped, 4-byte
    /// aligned device register, and nothing else may be accessing the same
    /// registers concurrently.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl Mmio for Volatile {
    fn read32(&self, addr: usize) -> u32 {
        // Safety: guaranteed by the contract of `Volatile::new`.
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    fn write32(&self, addr: usize, value: u32) {
        // Safety: guaranteed by the contract of `Volatile::new`.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

/// Rockchip GRF/CRU/PMU registers take a write-enable mask in their upper
/// half: only the low bits whose mask bit is set are changed by a write.
/// This builds such a write.
pub const fn hiword_update(mask: u16, value: u16) -> u32 {
    (mask as u32) << 16 | (value & mask) as u32
}

/// A masked write that sets every bit in `bits`.
pub const fn hiword_mask(bits: u16) -> u32 {
    hiword_update(bits, bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiword_helpers() {
        assert_eq!(hiword_update(0x0100, 0x0100), 0x0100_0100);
        assert_eq!(hiword_update(0x00c0, 0x0040), 0x00c0_0040);
        // Bits outside the mask are dropped.
        assert_eq!(hiword_update(0x000f, 0x00ff), 0x000f_000f);
        assert_eq!(hiword_mask(0x000f), 0x000f_000f);
    }
}
