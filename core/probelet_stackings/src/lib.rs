//! # RTOS Register-Frame Decoding
//!
//! ## Introduction
//!
//! This library reconstructs a thread's CPU registers from the saved
//! context block an RTOS keeps in target memory. Given a halted target,
//! a [`Stacking`] descriptor for the architecture/RTOS-port combination,
//! and the frame base address taken from the thread control block, it
//! produces one canonical, architecture-neutral register buffer a
//! debugger front end can format into thread and backtrace views.
//!
//! Frame layouts differ per architecture, per RTOS port, and even per
//! firmware build of the same combination. Descriptors therefore pick
//! one of two read strategies: a fixed layout captured with a single
//! bulk read, or a dynamic layout resolved at decode time from an
//! offset table the firmware itself publishes. Post-read fixups then
//! correct hardware-introduced artifacts such as exception-entry stack
//! alignment and transient status bits left by the context-save routine.
//!
//! ## Public API
//!
//! The primary entry point is [`decode_thread_frame`]:
//!
//! ```ignore
//! let stacking = nuttx::stacking(nuttx::TargetCore::CortexM);
//! let frame = decode_thread_frame(stacking, &mut target, &symbols, thread.saved_sp)?;
//! for i in 0..stacking.num_registers() {
//!     if let Some(value) = frame.register_u32(stacking, i) {
//!         // hand off to the protocol formatter
//!     }
//! }
//! ```
//!
//! The target must be halted and the caller must hold exclusive access
//! to the debug connection for the whole call; decoding never retries,
//! caches, or runs concurrently.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod decode;
pub mod error;
mod frame;
mod memory;
mod stacking;
mod symbols;

pub mod nuttx;

#[cfg(test)]
mod testing;

pub use decode::decode_thread_frame;
pub use frame::RegisterFrame;
pub use memory::{Endianness, TargetMemory};
pub use stacking::{stacked, unstacked, Fixup, ReadStrategy, RegisterOffset, StackGrowth, Stacking};
pub use symbols::SymbolLookup;
