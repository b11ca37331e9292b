// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use itertools::Itertools;
use std::fmt;

use crate::{InterpreterError, Program};

/// The number of zeroed cells appended after the program by [`MemoryLimit::default_scratch`]
pub const DEFAULT_SCRATCH: usize = 1024;

/// The most cells [`MemoryLimit::Unbounded`] memory will hold. Addresses at or past this are an
/// [`InterpreterError::AddressOutOfRange`].
pub const MAX_UNBOUNDED_CELLS: usize = 1 << 27;

/// How far an interpreter's memory may extend past the end of its program
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum MemoryLimit {
    /// Memory grows on demand, up to [`MAX_UNBOUNDED_CELLS`]. Reads past the end are `0`, writes
    /// past the end extend it.
    #[default]
    Unbounded,
    /// Memory is a fixed arena of the program plus this many zeroed cells. Accessing anything
    /// past that is an [`InterpreterError::AddressOutOfRange`].
    Scratch(usize),
}

impl MemoryLimit {
    /// A fixed arena with [`DEFAULT_SCRATCH`] extra cells
    pub const fn default_scratch() -> Self {
        Self::Scratch(DEFAULT_SCRATCH)
    }
}

/// A flat, contiguous memory arena, shared by code and data
#[derive(Clone)]
pub(crate) struct Memory {
    cells: Vec<i64>,
    limit: MemoryLimit,
}

static ZERO: i64 = 0;

impl Memory {
    pub(crate) fn new(program: &Program, limit: MemoryLimit) -> Self {
        let mut cells = Vec::with_capacity(Self::arena_len(program, limit));
        cells.extend_from_slice(program);
        if let MemoryLimit::Scratch(extra) = limit {
            cells.resize(program.len() + extra, 0);
        }
        Self { cells, limit }
    }

    fn arena_len(program: &Program, limit: MemoryLimit) -> usize {
        match limit {
            MemoryLimit::Unbounded => program.len(),
            MemoryLimit::Scratch(extra) => program.len() + extra,
        }
    }

    /// Restore the program image, dropping anything grown or written past it
    pub(crate) fn reset(&mut self, program: &Program) {
        self.cells.clear();
        self.cells.extend_from_slice(program);
        if let MemoryLimit::Scratch(extra) = self.limit {
            self.cells.resize(program.len() + extra, 0);
        } else {
            self.cells.shrink_to(program.len());
        }
    }

    /// The number of cells this memory may hold
    pub(crate) fn bound(&self) -> usize {
        match self.limit {
            MemoryLimit::Unbounded => MAX_UNBOUNDED_CELLS,
            MemoryLimit::Scratch(_) => self.cells.len(),
        }
    }

    /// Check an address, returning the index it maps to. In unbounded mode, that index may be past
    /// the end of the allocated cells.
    fn locate(&self, address: i64) -> Result<usize, InterpreterError> {
        let index =
            usize::try_from(address).map_err(|_| InterpreterError::NegativeAddress(address))?;
        let len = self.bound();
        if index >= len {
            return Err(InterpreterError::AddressOutOfRange { address, len });
        }
        Ok(index)
    }

    pub(crate) fn get(&self, address: i64) -> Result<i64, InterpreterError> {
        let index = self.locate(address)?;
        Ok(self.cells.get(index).copied().unwrap_or(0))
    }

    /// Make sure `address` can be written without failing, allocating room for it if needed.
    ///
    /// Doesn't change the contents or length of memory.
    pub(crate) fn reserve(&mut self, address: i64) -> Result<usize, InterpreterError> {
        let index = self.locate(address)?;
        if index >= self.cells.len() {
            self.cells
                .try_reserve(index + 1 - self.cells.len())
                .map_err(|_| InterpreterError::AddressOutOfRange {
                    address,
                    len: self.cells.len(),
                })?;
        }
        Ok(index)
    }

    pub(crate) fn get_mut(&mut self, address: i64) -> Result<&mut i64, InterpreterError> {
        let index = self.reserve(address)?;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
        Ok(&mut self.cells[index])
    }

    pub(crate) fn set(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        *self.get_mut(address)? = value;
        Ok(())
    }

    /// The currently allocated cells
    pub(crate) fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// The cells up to and including the last nonzero one
    fn significant(&self) -> &[i64] {
        let end = self.cells.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
        &self.cells[..end]
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl std::ops::Index<i64> for Memory {
    type Output = i64;
    fn index(&self, i: i64) -> &i64 {
        match self.locate(i) {
            Ok(index) => self.cells.get(index).unwrap_or(&ZERO),
            Err(e) => panic!("{e}"),
        }
    }
}

impl std::ops::IndexMut<i64> for Memory {
    fn index_mut(&mut self, i: i64) -> &mut i64 {
        match self.get_mut(i) {
            Ok(cell) => cell,
            Err(e) => panic!("{e}"),
        }
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fmtstruct = fmt.debug_map();
        for (start, chunk) in (0..).step_by(16).zip(self.significant().chunks(16)) {
            fmtstruct.entry(
                &format_args!("{start:04x}"),
                &format_args!("[{}]", chunk.iter().format(", ")),
            );
        }
        fmtstruct.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Program {
        Program::from([1, 2, 3])
    }

    #[test]
    fn unbounded_reads_zero_and_grows_on_write() {
        let mut mem = Memory::new(&program(), MemoryLimit::Unbounded);
        assert_eq!(mem.get(1000), Ok(0));
        assert_eq!(mem.as_slice().len(), 3);
        mem.set(1000, 7).unwrap();
        assert_eq!(mem.as_slice().len(), 1001);
        assert_eq!(mem[1000], 7);
        assert_eq!(mem[999], 0);
    }

    #[test]
    fn unbounded_growth_has_a_ceiling() {
        let mut mem = Memory::new(&program(), MemoryLimit::Unbounded);
        for address in [MAX_UNBOUNDED_CELLS as i64, 1 << 40, 1 << 62, i64::MAX] {
            let err = InterpreterError::AddressOutOfRange {
                address,
                len: MAX_UNBOUNDED_CELLS,
            };
            assert_eq!(mem.set(address, 1), Err(err.clone()));
            assert_eq!(mem.get(address), Err(err.clone()));
            assert_eq!(mem.reserve(address), Err(err));
        }
        assert_eq!(mem.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn reserve_leaves_contents_alone() {
        let mut mem = Memory::new(&program(), MemoryLimit::Unbounded);
        assert_eq!(mem.reserve(500), Ok(500));
        assert_eq!(mem.as_slice(), &[1, 2, 3]);

        let mut mem = Memory::new(&program(), MemoryLimit::Scratch(1));
        assert_eq!(mem.reserve(3), Ok(3));
        assert_eq!(
            mem.reserve(4),
            Err(InterpreterError::AddressOutOfRange { address: 4, len: 4 })
        );
    }

    #[test]
    fn scratch_is_fixed() {
        let mut mem = Memory::new(&program(), MemoryLimit::Scratch(4));
        assert_eq!(mem.as_slice(), &[1, 2, 3, 0, 0, 0, 0]);
        mem.set(6, 5).unwrap();
        assert_eq!(
            mem.set(7, 5),
            Err(InterpreterError::AddressOutOfRange { address: 7, len: 7 })
        );
        assert_eq!(
            mem.get(7),
            Err(InterpreterError::AddressOutOfRange { address: 7, len: 7 })
        );
    }

    #[test]
    fn negative_addresses() {
        for limit in [MemoryLimit::Unbounded, MemoryLimit::default_scratch()] {
            let mut mem = Memory::new(&program(), limit);
            assert_eq!(mem.get(-1), Err(InterpreterError::NegativeAddress(-1)));
            assert_eq!(mem.set(-5, 0), Err(InterpreterError::NegativeAddress(-5)));
        }
    }

    #[test]
    fn reset_restores_image() {
        let program = program();
        let fresh = Memory::new(&program, MemoryLimit::Unbounded);
        let mut mem = fresh.clone();
        mem.set(0, 100).unwrap();
        mem.set(50, 1).unwrap();
        assert_ne!(mem, fresh);
        mem.reset(&program);
        assert_eq!(mem, fresh);
        assert_eq!(mem.as_slice(), fresh.as_slice());
    }

    #[test]
    fn equality_ignores_trailing_zeroes() {
        let program = program();
        let mut grown = Memory::new(&program, MemoryLimit::Unbounded);
        grown.set(20, 0).unwrap();
        assert_eq!(grown, Memory::new(&program, MemoryLimit::default_scratch()));
    }
}
