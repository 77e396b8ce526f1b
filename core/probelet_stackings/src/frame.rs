//! Decoded register frame buffer.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
use crate::memory::Endianness;
use crate::stacking::Stacking;
use alloc::vec;
use alloc::vec::Vec;

/// The canonical register buffer produced by one decode call.
///
/// The byte layout follows the decoded descriptor exactly and is the
/// compatibility contract with the downstream debugging-protocol
/// formatter. A fresh zero-initialized buffer is allocated per call;
/// slots the decode did not populate stay zeroed and report absent
/// through [`RegisterFrame::is_present`], so a missing register is
/// always distinguishable from a stale value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFrame {
    endianness: Endianness,
    bytes: Vec<u8>,
    present: Vec<bool>,
}

impl RegisterFrame {
    pub(crate) fn new(stacking: &Stacking, endianness: Endianness) -> Self {
        RegisterFrame {
            endianness,
            bytes: vec![0; stacking.frame_size],
            present: vec![false; stacking.num_registers()],
        }
    }

    /// Byte order the buffer contents use.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The raw buffer in the descriptor's byte layout.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Whether the decode populated the register at canonical index
    /// `register`.
    pub fn is_present(&self, register: usize) -> bool {
        self.present.get(register).copied().unwrap_or(false)
    }

    pub(crate) fn mark_present(&mut self, register: usize) {
        if let Some(slot) = self.present.get_mut(register) {
            *slot = true;
        }
    }

    /// Value of a populated 32-bit register, by canonical index into
    /// `stacking`'s register list. Returns `None` for absent registers,
    /// non-32-bit registers, and indices outside the descriptor.
    pub fn register_u32(&self, stacking: &Stacking, register: usize) -> Option<u32> {
        if !self.is_present(register) {
            return None;
        }
        let reg = stacking.registers.get(register)?;
        if reg.width_bits != 32 {
            return None;
        }
        let offset = usize::from(reg.offset?);
        self.endianness.get_u32(&self.bytes, offset).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacking::{stacked, unstacked, ReadStrategy, RegisterOffset, StackGrowth, Stacking};

    const REGISTERS: [RegisterOffset; 2] = [stacked(0, 0, 32), unstacked(1, 32)];

    const STACKING: Stacking = Stacking {
        frame_size: 8,
        growth: StackGrowth::Down,
        registers: &REGISTERS,
        strategy: ReadStrategy::FixedLayout,
        fixup: None,
        frame_align: None,
    };

    #[test]
    fn fresh_frame_is_zeroed_and_absent() {
        let frame = RegisterFrame::new(&STACKING, Endianness::Little);
        assert_eq!(frame.as_bytes(), &[0u8; 8]);
        assert!(!frame.is_present(0));
        assert!(!frame.is_present(1));
        assert!(!frame.is_present(99));
    }

    #[test]
    fn register_u32_requires_presence() {
        let mut frame = RegisterFrame::new(&STACKING, Endianness::Little);
        frame.bytes_mut()[..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        assert_eq!(frame.register_u32(&STACKING, 0), None);
        frame.mark_present(0);
        assert_eq!(frame.register_u32(&STACKING, 0), Some(0xDEAD_BEEF));
    }

    #[test]
    fn register_u32_is_none_for_unstacked_slots() {
        let mut frame = RegisterFrame::new(&STACKING, Endianness::Little);
        frame.mark_present(1);
        assert_eq!(frame.register_u32(&STACKING, 1), None);
    }
}
