// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;
use crate::trace::TracedInstr;

/// An instruction word that's been fetched from `ip` and decoded
#[derive(Clone, Copy)]
struct Fetched {
    word: i64,
    opcode: OpCode,
    modes: [ParamMode; 3],
}

impl<I: InputProvider, O: OutputProvider> Interpreter<I, O> {
    /// Fetch, decode and execute the instruction at `self.ip`
    pub(crate) fn exec_instruction(&mut self) -> Result<Option<State>, InterpreterError> {
        let word = self.code.get(self.ip)?;
        let (opcode, modes) = decode(word)?;
        let instr = Fetched {
            word,
            opcode,
            modes,
        };

        match opcode {
            OpCode::Add => self.op3(instr, i64::checked_add),
            OpCode::Mul => self.op3(instr, i64::checked_mul),
            OpCode::Lt => self.op3(instr, |a, b| Some(i64::from(a < b))),
            OpCode::Eq => self.op3(instr, |a, b| Some(i64::from(a == b))),
            OpCode::Jnz => self.jump(instr, |cond| cond != 0),
            OpCode::Jz => self.jump(instr, |cond| cond == 0),
            OpCode::In => {
                let raw = self.raw_param(1)?;
                let dest = self.resolve_dest(modes[0], 1)?;
                // input is only consumed once it's certain it can be stored
                self.code.reserve(dest)?;
                let Some(input) = self.input.try_get_next() else {
                    return Ok(Some(State::Awaiting));
                };
                self.code.set(dest, input)?;
                self.record(instr, &[(raw, dest)], Some(input));
                self.advance(opcode)
            }
            OpCode::Out => {
                let raw = self.raw_param(1)?;
                let val = self.resolve_param(modes[0], 1)?;
                self.record(instr, &[(raw, val)], None);
                self.output.emit(val);
                self.advance(opcode)
            }
            OpCode::Rbo => {
                let raw = self.raw_param(1)?;
                let offset = self.resolve_param(modes[0], 1)?;
                let rel_base = self
                    .rel_base
                    .checked_add(offset)
                    .ok_or(InterpreterError::Overflow { op: opcode, ip: self.ip })?;
                self.record(instr, &[(raw, offset)], None);
                self.rel_base = rel_base;
                self.advance(opcode)
            }
            OpCode::Nop => {
                self.record(instr, &[], None);
                self.advance(opcode)
            }
            OpCode::Halt => {
                self.record(instr, &[], None);
                self.status = Status::Halted;
                Ok(Some(State::Halted))
            }
        }
    }

    /// Move `self.ip` past the current instruction
    fn advance(&mut self, opcode: OpCode) -> Result<Option<State>, InterpreterError> {
        self.ip = self
            .ip
            .checked_add(opcode.len())
            .ok_or(InterpreterError::Overflow { op: opcode, ip: self.ip })?;
        Ok(None)
    }

    /// The unprocessed value of the `offset`th parameter
    fn raw_param(&self, offset: i64) -> Result<i64, InterpreterError> {
        let address = self
            .ip
            .checked_add(offset)
            .ok_or(InterpreterError::AddressOutOfRange {
                address: self.ip,
                len: self.code.bound(),
            })?;
        self.code.get(address)
    }

    /// Processes the `offset`th parameter into a concrete value using the method appropriate for
    /// `mode`.
    pub(crate) fn resolve_param(
        &self,
        mode: ParamMode,
        offset: i64,
    ) -> Result<i64, InterpreterError> {
        let raw = self.raw_param(offset)?;
        match mode.address(raw, self.rel_base) {
            Some(address) => self.code.get(address),
            None => Ok(raw),
        }
    }

    /// Processes the `offset`th parameter into a destination address according to `mode`.
    ///
    /// The address is bounds-checked by the write itself.
    pub(crate) fn resolve_dest(
        &self,
        mode: ParamMode,
        offset: i64,
    ) -> Result<i64, InterpreterError> {
        let raw = self.raw_param(offset)?;
        mode.address(raw, self.rel_base)
            .ok_or(InterpreterError::WriteToImmediate(raw))
    }

    /// common logic of all 4 instructions that take 3 parameters
    ///
    /// Everything that can fail happens before the write, so a failure leaves memory untouched.
    fn op3(
        &mut self,
        instr: Fetched,
        operation: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<Option<State>, InterpreterError> {
        let Fetched { opcode, modes, .. } = instr;
        let raw = [self.raw_param(1)?, self.raw_param(2)?, self.raw_param(3)?];
        let a = self.resolve_param(modes[0], 1)?;
        let b = self.resolve_param(modes[1], 2)?;
        let dest = self.resolve_dest(modes[2], 3)?;
        let val = operation(a, b).ok_or(InterpreterError::Overflow {
            op: opcode,
            ip: self.ip,
        })?;
        self.code.set(dest, val)?;
        self.record(instr, &[(raw[0], a), (raw[1], b), (raw[2], dest)], Some(val));
        self.advance(opcode)
    }

    fn jump(
        &mut self,
        instr: Fetched,
        func: impl Fn(i64) -> bool,
    ) -> Result<Option<State>, InterpreterError> {
        let Fetched { opcode, modes, .. } = instr;
        let raw = [self.raw_param(1)?, self.raw_param(2)?];
        let cond = self.resolve_param(modes[0], 1)?;
        let dest = self.resolve_param(modes[1], 2)?;
        let taken = func(cond);
        if taken && dest < 0 {
            return Err(InterpreterError::JumpToNegative(dest));
        }
        self.record(instr, &[(raw[0], cond), (raw[1], dest)], None);
        if taken {
            self.ip = dest;
            Ok(None)
        } else {
            self.advance(opcode)
        }
    }

    /// Log an instruction that completed, and add it to the active trace, if any.
    ///
    /// Must be called before `self.ip` or `self.rel_base` change.
    fn record(
        &mut self,
        instr: Fetched,
        resolved_params: &[(i64, i64)],
        stored_val: Option<i64>,
    ) {
        if self.trace.is_none() && !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let traced = TracedInstr::build(
            instr.word,
            (instr.opcode, instr.modes),
            self.ip,
            self.rel_base,
            resolved_params,
            stored_val,
        );
        log::trace!("{traced}");
        if let Some(trace) = self.trace.as_mut() {
            trace.push(traced);
        }
    }
}
