//! Target memory access boundary.
//!
//! The debug transport owns the physical connection; this module only
//! defines the blocking read primitives the decoder needs plus
//! byte-order-aware accessors over buffers already read from the target.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
use crate::error::{Error, StkResult};

/// Byte order of the target CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl Endianness {
    /// Reads a `u16` from `bytes` at `index` in this byte order.
    pub fn get_u16(&self, bytes: &[u8], index: usize) -> StkResult<u16> {
        let raw: [u8; 2] =
            bytes.get(index..index + 2).and_then(|s| s.try_into().ok()).ok_or(Error::OutOfBoundsRead { index })?;
        Ok(match self {
            Endianness::Little => u16::from_le_bytes(raw),
            Endianness::Big => u16::from_be_bytes(raw),
        })
    }

    /// Reads a `u32` from `bytes` at `index` in this byte order.
    pub fn get_u32(&self, bytes: &[u8], index: usize) -> StkResult<u32> {
        let raw: [u8; 4] =
            bytes.get(index..index + 4).and_then(|s| s.try_into().ok()).ok_or(Error::OutOfBoundsRead { index })?;
        Ok(match self {
            Endianness::Little => u32::from_le_bytes(raw),
            Endianness::Big => u32::from_be_bytes(raw),
        })
    }

    /// Writes a `u32` into `bytes` at `index` in this byte order.
    pub fn set_u32(&self, bytes: &mut [u8], index: usize, value: u32) -> StkResult<()> {
        let slot = bytes.get_mut(index..index + 4).ok_or(Error::OutOfBoundsRead { index })?;
        slot.copy_from_slice(&match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        });
        Ok(())
    }
}

/// Blocking memory reads over the debug connection.
///
/// The connection is a process-wide exclusive resource and the target CPU
/// must stay halted for the duration of every call; both are the caller's
/// responsibility. Methods take `&mut self` to reflect the exclusive
/// access. Any failure is fatal for the decode in progress; nothing is
/// retried here.
pub trait TargetMemory {
    /// Byte order of the connected target.
    fn endianness(&self) -> Endianness;

    /// Reads `buffer.len()` bytes starting at `address`.
    fn read_bytes(&mut self, address: u64, buffer: &mut [u8]) -> StkResult<()>;

    /// Reads a `u16` at `address` in target byte order.
    fn read_u16(&mut self, address: u64) -> StkResult<u16> {
        let mut raw = [0u8; 2];
        self.read_bytes(address, &mut raw)?;
        self.endianness().get_u16(&raw, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_u16_respects_byte_order() {
        let bytes = [0x12, 0x34];
        assert_eq!(Endianness::Little.get_u16(&bytes, 0).unwrap(), 0x3412);
        assert_eq!(Endianness::Big.get_u16(&bytes, 0).unwrap(), 0x1234);
    }

    #[test]
    fn get_u32_respects_byte_order() {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(Endianness::Little.get_u32(&bytes, 0).unwrap(), 0x78563412);
        assert_eq!(Endianness::Big.get_u32(&bytes, 0).unwrap(), 0x12345678);
    }

    #[test]
    fn set_u32_respects_byte_order() {
        let mut bytes = [0u8; 4];
        Endianness::Little.set_u32(&mut bytes, 0, 0x78563412).unwrap();
        assert_eq!(bytes, [0x12, 0x34, 0x56, 0x78]);
        Endianness::Big.set_u32(&mut bytes, 0, 0x78563412).unwrap();
        assert_eq!(bytes, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn accessors_reject_out_of_bounds_indices() {
        let mut bytes = [0u8; 4];
        assert_eq!(Endianness::Little.get_u16(&bytes, 3).unwrap_err(), Error::OutOfBoundsRead { index: 3 });
        assert_eq!(Endianness::Little.get_u32(&bytes, 1).unwrap_err(), Error::OutOfBoundsRead { index: 1 });
        assert_eq!(Endianness::Little.set_u32(&mut bytes, 2, 0).unwrap_err(), Error::OutOfBoundsRead { index: 2 });
    }

    struct TwoBytes;

    impl TargetMemory for TwoBytes {
        fn endianness(&self) -> Endianness {
            Endianness::Little
        }

        fn read_bytes(&mut self, address: u64, buffer: &mut [u8]) -> StkResult<()> {
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = (address as u8).wrapping_add(i as u8);
            }
            Ok(())
        }
    }

    #[test]
    fn read_u16_uses_read_bytes_and_endianness() {
        assert_eq!(TwoBytes.read_u16(0x40).unwrap(), 0x4140);
    }
}
