//! Symbol resolution boundary.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0

/// Resolves firmware symbols to target addresses.
///
/// Offset-table stackings locate their per-register offset table through
/// a symbol published by the firmware image. Resolution happens outside
/// this crate (typically from the image's symbol table); the decoder only
/// checks the result before the first register read.
pub trait SymbolLookup {
    /// Resolved address of `symbol` in the target image, if present.
    fn resolve(&self, symbol: &str) -> Option<u64>;
}
