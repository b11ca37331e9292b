// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Error types for parsing and running Intcode

use std::num::ParseIntError;

use thiserror::Error;

use crate::OpCode;

/// An error that occured while turning source text or bytes into a [Program]
///
/// [Program]: crate::Program
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// The source contained no integers at all
    #[error("program source is empty")]
    Empty,
    /// A comma-separated token was not a valid 64-bit integer
    #[error("token {index} ({token:?}) is not a valid integer: {source}")]
    InvalidInt {
        /// Zero-based position of the token within the source
        index: usize,
        /// The offending token, after trimming
        token: Box<str>,
        /// The underlying parse failure
        #[source]
        source: ParseIntError,
    },
    /// Binary input had a trailing chunk shorter than 8 bytes
    #[error("expected 8 bytes, got {}: {:02x?}", .0.len(), .0)]
    IncompleteWord(Box<[u8]>),
}

/// A fatal error that occured when executing an Intcode instruction
///
/// Once one of these is returned by [`Interpreter::run`] or [`Interpreter::step`], the interpreter
/// is poisoned, and will refuse to run again until it's [reset].
///
/// [`Interpreter::run`]: crate::Interpreter::run
/// [`Interpreter::step`]: crate::Interpreter::step
/// [reset]: crate::Interpreter::reset
#[derive(Debug, Error, PartialEq, Clone)]
pub enum InterpreterError {
    /// An invalid opcode was encountered
    #[error("encountered unrecognized opcode in instruction {0}")]
    UnrecognizedOpcode(i64),
    /// An unknown parameter mode was encountered
    #[error("encountered unknown parameter mode {mode} in instruction {instruction}")]
    UnknownMode {
        /// the mode digit
        mode: i64,
        /// the full instruction word it was found in
        instruction: i64,
    },
    /// A negative memory address was computed
    #[error("attempted to access negative address {0}")]
    NegativeAddress(i64),
    /// An address beyond the end of memory was computed. For growable memory, that's
    /// [`MAX_UNBOUNDED_CELLS`] or anything that couldn't be allocated.
    ///
    /// [`MAX_UNBOUNDED_CELLS`]: crate::MAX_UNBOUNDED_CELLS
    #[error("address {address} is out of range for memory of {len} cells")]
    AddressOutOfRange {
        /// the address that was accessed
        address: i64,
        /// the number of cells memory could hold
        len: usize,
    },
    /// An instruction tried to write to an immediate destination
    #[error("code attempted to write to immediate {0}")]
    WriteToImmediate(i64),
    /// A jump instruction targeted a negative address
    #[error("code attempted to jump to negative address {0}")]
    JumpToNegative(i64),
    /// An instruction overflowed a 64-bit integer, either in its result or when advancing past it
    #[error("integer overflow in {op} at address {ip}")]
    Overflow {
        /// the instruction that overflowed
        op: OpCode,
        /// where it was located
        ip: i64,
    },
    /// The interpreter previously failed, and must be reset before running again
    #[error("interpreter is poisoned by an earlier error")]
    Poisoned,
}

/// An error converting between text and ASCII-encoded Intcode values
#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum AsciiError {
    /// A character outside of the ASCII range was provided as input
    #[error("{0:?} is not a valid ASCII character")]
    InvalidAsciiChar(char),
    /// A value outside of the ASCII range was found in output
    #[error("{0} is not a valid ASCII character")]
    InvalidAsciiInt(i64),
}
