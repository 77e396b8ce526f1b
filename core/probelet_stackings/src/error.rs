//! Error codes for the probelet_stackings crate
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
use core::fmt;

/// The error type for frame decoding operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A target memory read failed. The whole decode is abandoned; the
    /// partially filled buffer is never handed to the caller.
    TransportRead {
        /// Target address of the failed read.
        address: u64,
        /// Canonical register index being read, when the failure happened
        /// inside a per-register read loop.
        register: Option<usize>,
    },

    /// The symbol locating the dynamic offset table could not be resolved.
    /// Checked before the first register read of an offset-table decode.
    SymbolUnresolved {
        /// Name of the unresolved symbol.
        symbol: &'static str,
    },

    /// Attempted to access past the end of an in-memory register buffer.
    OutOfBoundsRead {
        /// Byte position in the buffer that triggered the access.
        index: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TransportRead { address, register: Some(register) } => {
                write!(fmt, "Failed to read target memory at {address:X} for register {register}")
            }
            Error::TransportRead { address, register: None } => {
                write!(fmt, "Failed to read target memory at {address:X}")
            }
            Error::SymbolUnresolved { symbol } => {
                write!(fmt, "Failed to resolve the register offset table symbol {symbol}")
            }
            Error::OutOfBoundsRead { index } => {
                write!(fmt, "Attempted to read past buffer bounds at index {index}")
            }
        }
    }
}

/// A specialized result type for the probelet_stackings crate.
pub type StkResult<T> = Result<T, Error>;

impl Error {
    /// Attach the canonical register index to errors raised inside a
    /// per-register read loop. Indices already present are kept.
    pub fn with_register(self, index: usize) -> Self {
        match self {
            Error::TransportRead { address, register } => {
                Error::TransportRead { address, register: register.or(Some(index)) }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    fn assert_display(err: Error, expected: &str) {
        assert_eq!(format!("{err}"), expected);
    }

    #[test]
    fn transport_read_display_with_register() {
        assert_display(
            Error::TransportRead { address: 0x2000_1000, register: Some(3) },
            "Failed to read target memory at 20001000 for register 3",
        );
    }

    #[test]
    fn transport_read_display_without_register() {
        assert_display(
            Error::TransportRead { address: 0x2000_1000, register: None },
            "Failed to read target memory at 20001000",
        );
    }

    #[test]
    fn symbol_unresolved_display() {
        assert_display(
            Error::SymbolUnresolved { symbol: "g_reg_offs" },
            "Failed to resolve the register offset table symbol g_reg_offs",
        );
    }

    #[test]
    fn out_of_bounds_read_display() {
        assert_display(Error::OutOfBoundsRead { index: 104 }, "Attempted to read past buffer bounds at index 104");
    }

    #[test]
    fn with_register_fills_missing_index() {
        let err = Error::TransportRead { address: 0x10, register: None }.with_register(7);
        assert_eq!(err, Error::TransportRead { address: 0x10, register: Some(7) });
    }

    #[test]
    fn with_register_keeps_existing_index() {
        let err = Error::TransportRead { address: 0x10, register: Some(2) }.with_register(7);
        assert_eq!(err, Error::TransportRead { address: 0x10, register: Some(2) });
    }

    #[test]
    fn with_register_leaves_other_variants_untouched() {
        let err = Error::SymbolUnresolved { symbol: "g_reg_offs" }.with_register(7);
        assert_eq!(err, Error::SymbolUnresolved { symbol: "g_reg_offs" });
    }
}
