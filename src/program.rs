// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! The immutable starting memory image of an Intcode program

use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use crate::ParseError;

/// A parsed Intcode program
///
/// This is the snapshot an [Interpreter] restores its memory from when [reset]. It's never
/// mutated, so cloning it only bumps a reference count.
///
/// # Example
///
/// ```
/// use intcode_vm::Program;
/// let program: Program = "1,9,10,3,2,3,11,0,99,30,40,50".parse().unwrap();
/// assert_eq!(program.len(), 12);
/// assert_eq!(program[8], 99);
/// ```
///
/// [Interpreter]: crate::Interpreter
/// [reset]: crate::Interpreter::reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(Arc<[i64]>);

impl Program {
    /// Parse a comma-separated list of integers
    ///
    /// Surrounding whitespace, both of the whole source and of each individual token, is ignored.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ParseError::Empty);
        }
        source
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(index, token)| {
                token.parse::<i64>().map_err(|source| ParseError::InvalidInt {
                    index,
                    token: Box::from(token),
                    source,
                })
            })
            .collect()
    }

    /// Decode a program stored as consecutive little-endian 64-bit integers
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::from_bytes(bytes, i64::from_le_bytes)
    }

    /// Decode a program stored as consecutive big-endian 64-bit integers
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::from_bytes(bytes, i64::from_be_bytes)
    }

    fn from_bytes(bytes: &[u8], func: fn([u8; 8]) -> i64) -> Result<Self, ParseError> {
        let (chunks, remainder) = bytes.as_chunks::<8>();
        if !remainder.is_empty() {
            return Err(ParseError::IncompleteWord(Box::from(remainder)));
        }
        Ok(chunks.iter().map(|c| func(*c)).collect())
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<i64> for Program {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<i64>> for Program {
    fn from(code: Vec<i64>) -> Self {
        Self(Arc::from(code))
    }
}

impl<const N: usize> From<[i64; N]> for Program {
    fn from(code: [i64; N]) -> Self {
        Self(Arc::from(code.as_slice()))
    }
}

impl Deref for Program {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}
