//! Frame decode engine.
//!
//! One decode call runs the descriptor's optional pre-read alignment,
//! then the frame reader, then the normalizer, and returns the canonical
//! register buffer. The pass is single-shot and non-resumable: any
//! transport failure aborts it, and no state survives between calls.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
use crate::error::{Error, StkResult};
use crate::frame::RegisterFrame;
use crate::memory::TargetMemory;
use crate::stacking::{align_frame_base, Fixup, ReadStrategy, Stacking};
use crate::symbols::SymbolLookup;

bitflags::bitflags! {
    /// Armv7-M xPSR bits the normalizer inspects.
    struct Xpsr: u32 {
        /// Hardware 8-byte aligned the stack on exception entry.
        const STKALIGN = 1 << 9;
    }
}

bitflags::bitflags! {
    /// Xtensa PS bits the normalizer inspects.
    struct XtensaPs: u32 {
        /// Exception mode, set while the context-save routine runs.
        const EXCM = 1 << 4;
    }
}

/// Offset-table entry marking a register as absent from this build's
/// frame.
const OFFSET_ABSENT: u16 = u16::MAX;

fn table_offset(raw: u16) -> Option<u16> {
    if raw == OFFSET_ABSENT { None } else { Some(raw) }
}

/// Decodes one thread's saved register frame from a halted target.
///
/// `frame_base` is the saved stack/context pointer taken from the thread
/// control block. The target must stay halted, and the caller must hold
/// exclusive access to the debug connection, for the whole call.
///
/// On success the returned buffer follows the descriptor's byte layout
/// exactly. On failure the partial buffer is discarded; callers must not
/// assume anything about registers read before the failure.
pub fn decode_thread_frame<M, S>(
    stacking: &Stacking,
    target: &mut M,
    symbols: &S,
    frame_base: u64,
) -> StkResult<RegisterFrame>
where
    M: TargetMemory,
    S: SymbolLookup,
{
    let base = match stacking.frame_align {
        Some(align) => align_frame_base(frame_base, align, stacking.growth),
        None => frame_base,
    };

    log::debug!("Decoding thread frame at {base:#X} ({} registers)", stacking.num_registers());

    let mut frame = RegisterFrame::new(stacking, target.endianness());

    match stacking.strategy {
        ReadStrategy::FixedLayout => read_fixed(stacking, target, base, &mut frame)?,
        ReadStrategy::OffsetTable { offsets_symbol } => {
            // Checked precondition: the table symbol must resolve before
            // the first register read.
            let table = symbols.resolve(offsets_symbol).ok_or(Error::SymbolUnresolved { symbol: offsets_symbol })?;
            read_offset_table(stacking, target, table, base, &mut frame)?;
        }
    }

    if let Some(fixup) = stacking.fixup {
        apply_fixup(fixup, stacking, &mut frame)?;
    }

    Ok(frame)
}

/// Bulk read of a fixed-layout frame: one contiguous transport read of
/// `frame_size` bytes, copied verbatim into the buffer.
fn read_fixed<M: TargetMemory>(
    stacking: &Stacking,
    target: &mut M,
    base: u64,
    frame: &mut RegisterFrame,
) -> StkResult<()> {
    target.read_bytes(base, frame.bytes_mut()).inspect_err(|err| {
        log::error!("Failed to read stacked frame: {err}");
    })?;

    for (i, reg) in stacking.registers.iter().enumerate() {
        if reg.offset.is_some() {
            frame.mark_present(i);
        }
    }
    Ok(())
}

/// Per-register read driven by a firmware-published offset table.
///
/// For each canonical slot the table supplies the register's byte offset
/// within the stored frame, or [`OFFSET_ABSENT`] when this build does
/// not stack it. The static descriptor decides the output position; a
/// slot the descriptor marks unstacked is skipped even if the table
/// claims it is available.
fn read_offset_table<M: TargetMemory>(
    stacking: &Stacking,
    target: &mut M,
    table: u64,
    base: u64,
    frame: &mut RegisterFrame,
) -> StkResult<()> {
    for (i, reg) in stacking.registers.iter().enumerate() {
        let raw = target.read_u16(table + 2 * i as u64).map_err(|err| {
            log::error!("Failed to read register offset {i}: {err}");
            err.with_register(i)
        })?;

        let (Some(stacked_at), Some(out)) = (table_offset(raw), reg.offset) else {
            continue;
        };

        let width = usize::from(reg.width_bits / 8);
        let out = usize::from(out);
        let slot = frame.bytes_mut().get_mut(out..out + width).ok_or(Error::OutOfBoundsRead { index: out })?;
        target.read_bytes(base + u64::from(stacked_at), slot).map_err(|err| {
            log::error!("Failed to read register {i}: {err}");
            err.with_register(i)
        })?;
        frame.mark_present(i);
    }
    Ok(())
}

/// Applies the descriptor's post-read correction. Runs only once the
/// whole buffer is populated, since [`Fixup::ExceptionStackAlign`] needs
/// a valid flags value.
fn apply_fixup(fixup: Fixup, stacking: &Stacking, frame: &mut RegisterFrame) -> StkResult<()> {
    let endianness = frame.endianness();
    match fixup {
        Fixup::ExceptionStackAlign { xpsr_offset, sp_offset } => {
            let xpsr = Xpsr::from_bits_retain(endianness.get_u32(frame.as_bytes(), xpsr_offset)?);
            if xpsr.contains(Xpsr::STKALIGN) {
                let sp = endianness.get_u32(frame.as_bytes(), sp_offset)?;
                let adjusted = (i64::from(sp) - 4 * stacking.growth.direction()) as u32;
                endianness.set_u32(frame.bytes_mut(), sp_offset, adjusted)?;
            }
        }
        Fixup::ClearPsExcm { ps_offset } => {
            let ps = XtensaPs::from_bits_retain(endianness.get_u32(frame.as_bytes(), ps_offset)?);
            endianness.set_u32(frame.bytes_mut(), ps_offset, ps.difference(XtensaPs::EXCM).bits())?;
        }
    }
    Ok(())
}
