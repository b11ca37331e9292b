// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing a suspendable Intcode virtual machine
//!
//! The interpreter is fully functional, with all of the [Opcodes] and [Parameter Modes] defined in
//! the completed Intcode computer for [Day 9].
//!
//! Input and output go through an [InputProvider] and an [OutputProvider]. When the program
//! executes an `IN` instruction while the input provider is empty, [`Interpreter::run`] returns
//! [`State::Awaiting`] without consuming the instruction, so the caller can supply more input and
//! call it again.
//!
//! # Example
//!
//! ```rust
//! use intcode_vm::prelude::*;
//! let mut interpreter = Interpreter::new("3,9,4,9,3,9,4,9,99,0").unwrap();
//!
//! interpreter.input_mut().add(1024);
//! assert_eq!(interpreter.run(), Ok(State::Awaiting));
//! assert_eq!(interpreter.output_mut().try_take_next(), Some(1024));
//!
//! interpreter.input_mut().add(-7);
//! assert_eq!(interpreter.run(), Ok(State::Halted));
//! assert_eq!(interpreter.output_mut().try_take_next(), Some(-7));
//! assert!(interpreter.is_halted());
//! ```
//!
//! [Opcodes]: https://esolangs.org/wiki/Intcode#Opcodes
//! [Parameter Modes]: https://esolangs.org/wiki/Intcode#Parameter_Modes
//! [Day 9]: https://adventofcode.com/2019/day/9

mod decode;
mod error;
mod internals;
pub mod io;
/// Memory arena backing an [Interpreter], addressed by `i64`, bounds-checked on every access.
mod mmu;
mod program;
pub mod trace;

use std::fmt;
use std::ops::{Index, IndexMut};

use log::{debug, warn};

pub use decode::{OpCode, ParamMode, decode};
pub use error::{AsciiError, InterpreterError, ParseError};
pub use io::{InputProvider, IoQueue, OutputProvider, SharedQueue};
pub use mmu::{DEFAULT_SCRATCH, MAX_UNBOUNDED_CELLS, MemoryLimit};
pub use program::Program;

use mmu::Memory;
use trace::Trace;

/// A small module that re-exports items needed when working with the Intcode interpreter
pub mod prelude {
    pub use crate::{InputProvider, Interpreter, IoQueue, OutputProvider, State};
    pub use std::iter::empty;
}

/// The state of the intcode system, returned whenever the intcode system has stopped.
///
/// [Awaiting](State::Awaiting) means that there are more instructions to execute, but all input
/// has been consumed and the next instruction requires input.
///
/// [Halted](State::Halted) means that a `HALT` instruction has been executed. Once it's been
/// returned, no more instructions will be executed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Execution is awaiting input
    Awaiting,
    /// Execution has halted
    Halted,
}

/// Lifecycle of an [Interpreter]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// Freshly constructed or reset, with no instructions executed
    #[default]
    Ready,
    /// At least one instruction has executed, but the program hasn't halted
    Running,
    /// A `HALT` instruction has executed
    Halted,
    /// An [InterpreterError] occured, and the interpreter must be [reset](Interpreter::reset)
    /// before it can run again
    Poisoned,
}

/// Settings for constructing an [Interpreter]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Config {
    /// How memory may extend past the loaded program
    pub memory: MemoryLimit,
}

/// An intcode interpreter, with attached input and output providers
///
/// By default, both providers are [IoQueue]s.
#[derive(Clone)]
pub struct Interpreter<I = IoQueue, O = IoQueue> {
    ip: i64,
    rel_base: i64,
    status: Status,
    program: Program,
    code: Memory,
    input: I,
    output: O,
    trace: Option<Trace>,
}

// ignore the providers and trace
impl<I, O> PartialEq for Interpreter<I, O> {
    fn eq(&self, other: &Self) -> bool {
        self.ip == other.ip
            && self.rel_base == other.rel_base
            && self.status == other.status
            && self.code == other.code
    }
}

impl<I, O> fmt::Debug for Interpreter<I, O> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Interpreter")
            .field("code", &self.code)
            .field("rbo", &self.rel_base)
            .field("ip", &self.ip)
            .field("status", &self.status)
            .field("tracing", &self.trace.is_some())
            .finish_non_exhaustive()
    }
}

/// Indexing past the end of memory reads `0` or grows it, same as the program would.
///
/// # Panics
///
/// Panics on negative addresses, and on addresses past the end of a fixed-size arena or past
/// [`MAX_UNBOUNDED_CELLS`]. Use [`Interpreter::mem_get`] and [`Interpreter::mem_set`] to handle those
/// as errors instead.
impl<I, O> Index<i64> for Interpreter<I, O> {
    type Output = i64;

    fn index(&self, i: i64) -> &Self::Output {
        self.code.index(i)
    }
}

impl<I, O> IndexMut<i64> for Interpreter<I, O> {
    fn index_mut(&mut self, i: i64) -> &mut Self::Output {
        self.code.index_mut(i)
    }
}

impl Interpreter {
    /// Parse `source` as a comma-separated program, and create an interpreter with empty
    /// [IoQueue]s for input and output
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Ok(Self::from_program(Program::parse(source)?))
    }

    /// Create an interpreter from already-parsed integers
    pub fn from_code(code: impl IntoIterator<Item = i64>) -> Self {
        Self::from_program(code.into_iter().collect())
    }

    /// Create an interpreter for `program` with empty [IoQueue]s for input and output
    pub fn from_program(program: Program) -> Self {
        Self::with_config(program, Config::default(), IoQueue::new(), IoQueue::new())
    }
}

impl<I, O> Interpreter<I, O> {
    /// Parse `source` and create an interpreter attached to the given providers
    pub fn with_io(source: &str, input: I, output: O) -> Result<Self, ParseError> {
        Ok(Self::with_config(
            Program::parse(source)?,
            Config::default(),
            input,
            output,
        ))
    }

    /// Create an interpreter with full control over its configuration and providers
    pub fn with_config(program: Program, config: Config, input: I, output: O) -> Self {
        Self {
            ip: 0,
            rel_base: 0,
            status: Status::Ready,
            code: Memory::new(&program, config.memory),
            program,
            input,
            output,
            trace: None,
        }
    }

    /// Restore memory to the starting program, and reset the instruction pointer and relative base
    ///
    /// The providers are left alone, so anything queued in them remains.
    pub fn reset(&mut self) {
        debug!("resetting interpreter (was {:?} at ip {})", self.status, self.ip);
        self.code.reset(&self.program);
        self.ip = 0;
        self.rel_base = 0;
        self.status = Status::Ready;
    }

    /// Whether a `HALT` instruction has executed
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// The current [Status]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Address of the next instruction to execute
    ///
    /// Once halted, this stays at the `HALT` instruction.
    #[doc(alias = "pc")]
    pub fn ip(&self) -> i64 {
        self.ip
    }

    /// The current relative base
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// The program this interpreter was created from
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// All currently allocated memory
    pub fn memory(&self) -> &[i64] {
        self.code.as_slice()
    }

    /// Get the memory at `address`
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, InterpreterError> {
        self.code.get(address)
    }

    /// Manually set a memory location
    #[doc(alias("poke", "write"))]
    pub fn mem_set(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        self.code.set(address, value)
    }

    /// The attached input provider
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The attached input provider, mutably, in order to supply more input
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The attached output provider
    pub fn output(&self) -> &O {
        &self.output
    }

    /// The attached output provider, mutably, in order to take output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Detach and return the input and output providers, dropping the rest of the interpreter
    pub fn into_io(self) -> (I, O) {
        (self.input, self.output)
    }
}

impl<I: InputProvider, O: OutputProvider> Interpreter<I, O> {
    /// Execute a single instruction.
    ///
    /// Returns `Ok(None)` if the instruction executed and there's more to do,
    /// `Ok(Some(State::Awaiting))` if it's an `IN` instruction with no input available, and
    /// `Ok(Some(State::Halted))` if the interpreter has halted.
    pub fn step(&mut self) -> Result<Option<State>, InterpreterError> {
        match self.status {
            Status::Halted => return Ok(Some(State::Halted)),
            Status::Poisoned => return Err(InterpreterError::Poisoned),
            Status::Ready | Status::Running => (),
        }
        match self.exec_instruction() {
            Ok(None) => {
                self.status = Status::Running;
                Ok(None)
            }
            Ok(Some(state)) => Ok(Some(state)),
            Err(e) => {
                warn!("interpreter poisoned at ip {}: {e}", self.ip);
                self.status = Status::Poisoned;
                Err(e)
            }
        }
    }

    /// Execute until either the program halts, or it tries to read nonexistent input.
    ///
    /// Calling this on a halted interpreter does nothing, and returns [`State::Halted`] again.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error, and the
    /// interpreter is poisoned.
    pub fn run(&mut self) -> Result<State, InterpreterError> {
        debug!("running from ip {} ({:?})", self.ip, self.status);
        let state = loop {
            if let Some(state) = self.step()? {
                break state;
            }
        };
        debug!("stopped at ip {}: {state:?}", self.ip);
        Ok(state)
    }

    /// Queue up `inputs`, then execute until either the program halts, or it tries to read
    /// nonexistent input.
    /// Returns `Ok((v, s))`, where `v` is a [`Vec<i64>`] containing all outputs that were waiting
    /// to be taken, and `s` is the [`State`] at the time it stopped.
    ///
    /// Inputs which the program didn't get to remain queued for the next run.
    pub fn run_through_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<(Vec<i64>, State), InterpreterError> {
        for input in inputs {
            self.input.add(input);
        }
        let state = self.run()?;
        Ok((self.output.drain().collect(), state))
    }
}
