//! Test doubles shared by the crate's unit tests.
use crate::error::{Error, StkResult};
use crate::memory::{Endianness, TargetMemory};
use crate::symbols::SymbolLookup;
use std::collections::BTreeMap;

/// Symbol table resolving at most one name.
pub(crate) struct Symbols(Option<(&'static str, u64)>);

impl Symbols {
    pub(crate) fn none() -> Self {
        Symbols(None)
    }

    pub(crate) fn at(symbol: &'static str, address: u64) -> Self {
        Symbols(Some((symbol, address)))
    }
}

impl SymbolLookup for Symbols {
    fn resolve(&self, symbol: &str) -> Option<u64> {
        match self.0 {
            Some((name, address)) if name == symbol => Some(address),
            _ => None,
        }
    }
}

/// Scripted little-endian target memory with read accounting and fault
/// injection. Reads of unloaded addresses fail like a bus fault.
pub(crate) struct FakeTarget {
    memory: BTreeMap<u64, u8>,
    pub(crate) reads: usize,
    pub(crate) fail_at: Option<u64>,
}

impl FakeTarget {
    pub(crate) fn new() -> Self {
        FakeTarget { memory: BTreeMap::new(), reads: 0, fail_at: None }
    }

    pub(crate) fn load(&mut self, base: u64, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.memory.insert(base + i as u64, *byte);
        }
    }

    pub(crate) fn load_u16(&mut self, base: u64, value: u16) {
        self.load(base, &value.to_le_bytes());
    }

    pub(crate) fn load_u32(&mut self, base: u64, value: u32) {
        self.load(base, &value.to_le_bytes());
    }
}

impl TargetMemory for FakeTarget {
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    fn read_bytes(&mut self, address: u64, buffer: &mut [u8]) -> StkResult<()> {
        self.reads += 1;
        for (i, slot) in buffer.iter_mut().enumerate() {
            let at = address + i as u64;
            if self.fail_at == Some(at) {
                return Err(Error::TransportRead { address: at, register: None });
            }
            *slot = *self.memory.get(&at).ok_or(Error::TransportRead { address: at, register: None })?;
        }
        Ok(())
    }
}
