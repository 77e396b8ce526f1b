//! Stack-frame descriptors.
//!
//! A [`Stacking`] describes how one architecture/RTOS-port combination
//! lays out a thread's saved register state in memory: the frame size,
//! where each canonical register lives, how the frame is read, and which
//! post-read corrections apply. Descriptors are compiled constants and
//! never mutated at runtime.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0

/// Location of one canonical register within a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOffset {
    /// Canonical register number, stable across all descriptors. Follows
    /// the GDB feature order of the architecture so cross-architecture
    /// consumers can compare registers by id.
    pub id: u16,

    /// Byte offset of the register in the output buffer, or `None` when
    /// the port does not stack this register at all.
    pub offset: Option<u16>,

    /// Register width in bits, always a multiple of 8.
    pub width_bits: u16,
}

/// A register stored in the frame at `offset`.
pub const fn stacked(id: u16, offset: u16, width_bits: u16) -> RegisterOffset {
    RegisterOffset { id, offset: Some(offset), width_bits }
}

/// A register the port never saves to the frame.
pub const fn unstacked(id: u16, width_bits: u16) -> RegisterOffset {
    RegisterOffset { id, offset: None, width_bits }
}

/// Direction in which the stack grows on this architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackGrowth {
    /// Stack addresses decrease as the stack grows.
    Down,
    /// Stack addresses increase as the stack grows.
    Up,
}

impl StackGrowth {
    /// Signed direction used in alignment corrections.
    pub const fn direction(self) -> i64 {
        match self {
            StackGrowth::Down => -1,
            StackGrowth::Up => 1,
        }
    }
}

/// How the frame reader captures a thread's saved registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// The frame layout is fixed across firmware builds; one contiguous
    /// read of `frame_size` bytes captures it verbatim.
    FixedLayout,

    /// The frame layout varies across firmware versions and build
    /// configurations. The firmware publishes a table of per-register
    /// byte offsets, one `u16` slot per canonical register, located via
    /// `offsets_symbol`. A table entry of `0xFFFF` marks the register as
    /// absent from this build's frame.
    OffsetTable {
        /// Symbol naming the offset table in the target image.
        offsets_symbol: &'static str,
    },
}

/// Post-read correction applied by the normalizer.
///
/// These undo artifacts the hardware or the context-save routine leaves
/// in the stored frame; they run only after the whole buffer has been
/// populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixup {
    /// Armv7-M hardware may insert 4 bytes on exception entry to 8-byte
    /// align the stack, recording that in xPSR[9]. The port stores the
    /// post-alignment SP, so when the bit is set the stacked SP must be
    /// moved back by one word against the growth direction.
    ExceptionStackAlign {
        /// Byte offset of xPSR in the output buffer.
        xpsr_offset: usize,
        /// Byte offset of SP in the output buffer.
        sp_offset: usize,
    },

    /// Xtensa context-save routines run with PS.EXCM set and store PS
    /// mid-save, so the stacked value carries a transient exception-mode
    /// marker. Clear it so the thread reports its resting state.
    ClearPsExcm {
        /// Byte offset of PS in the output buffer.
        ps_offset: usize,
    },
}

/// Describes the saved-register frame of one architecture/RTOS variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stacking {
    /// Size of the output buffer in bytes. Every stored register lies
    /// within `[0, frame_size)`.
    pub frame_size: usize,

    /// Stack growth direction of the architecture.
    pub growth: StackGrowth,

    /// One entry per canonical output register, in canonical order.
    pub registers: &'static [RegisterOffset],

    /// How the frame is read from target memory.
    pub strategy: ReadStrategy,

    /// Correction applied after a successful read, if any.
    pub fixup: Option<Fixup>,

    /// Power-of-two alignment forced onto the frame base address before
    /// the read, for architectures whose call convention aligns the
    /// stack but whose port stores the raw pointer. Descriptors that
    /// correct alignment through [`Fixup::ExceptionStackAlign`] leave
    /// this `None` to avoid double-correcting.
    pub frame_align: Option<u64>,
}

impl Stacking {
    /// Number of canonical output registers.
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }
}

/// Aligns a frame base address before the read.
///
/// Rounds down to `align`; on a downward-growing stack a rounded-down
/// base would point past the frame start, so round up instead.
pub(crate) fn align_frame_base(base: u64, align: u64, growth: StackGrowth) -> u64 {
    let aligned = base & !(align - 1);
    if aligned != base && growth == StackGrowth::Down { aligned + align } else { aligned }
}
