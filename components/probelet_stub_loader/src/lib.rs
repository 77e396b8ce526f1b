//! Flashing Stub Image Metadata
//!
//! Compiled-in records describing the flashing stub shipped for each
//! supported chip: where its code and data load, where execution starts,
//! and where the host polls the stub's trace control block. The records
//! are produced from the stub build and consumed by the flash loader
//! when it runs the stub on a halted target; nothing here touches the
//! target itself.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
#![no_std]

/// A contiguous load region in target address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubRegion {
    /// First address of the region.
    pub base: u64,
    /// Region length in bytes.
    pub len: u32,
}

impl StubRegion {
    /// Whether `address` falls inside the region.
    pub const fn contains(&self, address: u64) -> bool {
        address >= self.base && address < self.base + self.len as u64
    }
}

/// Load-time description of one chip's flashing stub image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubFlasherImage {
    /// Bytes of zero-initialized data the stub needs after its image.
    pub bss_size: u32,
    /// Instruction RAM region the stub code loads into.
    pub iram: StubRegion,
    /// Data RAM region for the stub's data and working buffers.
    pub dram: StubRegion,
    /// Entry address the target starts executing the stub from.
    pub entry_addr: u64,
    /// Address of the stub's apptrace control block, the host/stub
    /// communication channel.
    pub apptrace_ctrl_addr: u64,
}

/// ESP32-C6 flashing stub image.
pub const ESP32C6: StubFlasherImage = StubFlasherImage {
    bss_size: 0x13c,
    iram: StubRegion { base: 0x4080_0000, len: 0x4000 },
    dram: StubRegion { base: 0x4080_4000, len: 0x2_0000 },
    entry_addr: 0x4080_111a,
    apptrace_ctrl_addr: 0x4080_4144,
};
