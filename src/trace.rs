// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Recording of executed instructions
//!
//! See [`Interpreter::start_trace`]
use std::fmt::{self, Display};

use super::{Interpreter, OpCode, ParamMode};

/// A parameter of a traced instruction: the raw integer in memory, and what it resolved to.
///
/// For parameters that are read, it resolved to the value that was read. For write destinations,
/// it resolved to the address that was written to.
pub type TracedParam = (i64, i64);

#[derive(Clone, PartialEq, Eq, Debug)]
/// Information about an instruction that was executed, which can be queried with its various
/// methods, or converted into a [String] using its [Display] impl.
pub struct TracedInstr {
    op_int: i64,
    opcode: OpCode,
    modes: [ParamMode; 3],
    instr_ptr: i64,
    rel_base: i64,
    params: [TracedParam; 3],
    stored_val: Option<i64>,
}

impl TracedInstr {
    /// Return the relative base at the time the traced instruction was excuted
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// Return the instruction pointer's position when the traced instruction was executed
    pub fn instr_ptr(&self) -> i64 {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return the opcode of the traced instruction
    pub fn op_code(&self) -> OpCode {
        self.opcode
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        self.stored_val
    }

    /// Return an array of the parameter modes of the traced instruction
    pub fn param_modes(&self) -> [ParamMode; 3] {
        self.modes
    }

    /// Return the parameters the traced instruction actually uses
    pub fn params(&self) -> &[TracedParam] {
        &self.params[..self.opcode.params()]
    }

    /// For jump instructions, whether the jump was taken
    pub fn jumped(&self) -> Option<bool> {
        let (_, cond) = self.params[0];
        match self.opcode {
            OpCode::Jnz => Some(cond != 0),
            OpCode::Jz => Some(cond == 0),
            _ => None,
        }
    }

    pub(crate) fn build(
        op_int: i64,
        (opcode, modes): (OpCode, [ParamMode; 3]),
        instr_ptr: i64,
        rel_base: i64,
        resolved_params: &[TracedParam],
        stored_val: Option<i64>,
    ) -> Self {
        debug_assert_eq!(resolved_params.len(), opcode.params());
        let mut params = [(0, 0); 3];
        params[..resolved_params.len()].copy_from_slice(resolved_params);
        Self {
            op_int,
            opcode,
            modes,
            instr_ptr,
            rel_base,
            params,
            stored_val,
        }
    }
}

impl<I, O> Interpreter<I, O> {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    /// use intcode_vm::prelude::*;
    /// let mut interp = Interpreter::from_code([1101, 90, 9, 4, 99]);
    /// interp.start_trace();
    /// interp.run().unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(99));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// `IN` instructions which had to wait for input are not included.
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn push(&mut self, instr: TracedInstr) {
        self.0.push(instr);
    }

    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran instruction at {:0>4}: op int {: <5} | [{}",
            self.instr_ptr, self.op_int, self.opcode
        )?;
        let modes = self.modes;
        for (i, &(raw, resolved)) in self.params().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let is_dest = self.opcode.writes() && i + 1 == self.opcode.params();
            if is_dest {
                let stored = self.stored_val.unwrap_or_default();
                write!(f, "{sep}{}{raw} (stored {stored} to {resolved})", modes[i])?;
            } else {
                write!(f, "{sep}{}{raw} (resolves to {resolved})", modes[i])?;
            }
        }
        match (self.opcode, self.jumped()) {
            (_, Some(true)) => write!(f, "] jumped"),
            (_, Some(false)) => write!(f, "] didn't jump"),
            (OpCode::Rbo, None) => write!(
                f,
                "] went from {} to {}",
                self.rel_base,
                self.rel_base.wrapping_add(self.params[0].1)
            ),
            _ => write!(f, "]"),
        }
    }
}
