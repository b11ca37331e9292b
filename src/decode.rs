// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Splitting instruction words into their [OpCode] and [ParamMode]s

use std::fmt::{self, Display};

use crate::InterpreterError;

/// An Intcode operation
///
/// The discriminant of each variant is its numeric opcode, so `op as i64` gives the value that
/// appears in the low two digits of an instruction word.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OpCode {
    /// Do nothing
    Nop = 0,
    /// `dst = a + b`
    Add = 1,
    /// `dst = a * b`
    Mul = 2,
    /// `dst = <next input>`, suspending if there is none
    In = 3,
    /// Emit `a` as output
    Out = 4,
    /// Jump to `b` if `a != 0`
    Jnz = 5,
    /// Jump to `b` if `a == 0`
    Jz = 6,
    /// `dst = (a < b) as i64`
    Lt = 7,
    /// `dst = (a == b) as i64`
    Eq = 8,
    /// Adjust the relative base by `a`
    Rbo = 9,
    /// Stop execution
    Halt = 99,
}

impl OpCode {
    /// Number of parameters the instruction takes
    pub const fn params(self) -> usize {
        match self {
            OpCode::Nop | OpCode::Halt => 0,
            OpCode::In | OpCode::Out | OpCode::Rbo => 1,
            OpCode::Jnz | OpCode::Jz => 2,
            OpCode::Add | OpCode::Mul | OpCode::Lt | OpCode::Eq => 3,
        }
    }

    /// Total number of memory cells the instruction occupies, including the instruction word
    pub const fn len(self) -> i64 {
        self.params() as i64 + 1
    }

    /// Whether the instruction's last parameter is a write destination
    pub const fn writes(self) -> bool {
        matches!(
            self,
            OpCode::Add | OpCode::Mul | OpCode::In | OpCode::Lt | OpCode::Eq
        )
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, i64> {
        match i {
            0 => Ok(OpCode::Nop),
            1 => Ok(OpCode::Add),
            2 => Ok(OpCode::Mul),
            3 => Ok(OpCode::In),
            4 => Ok(OpCode::Out),
            5 => Ok(OpCode::Jnz),
            6 => Ok(OpCode::Jz),
            7 => Ok(OpCode::Lt),
            8 => Ok(OpCode::Eq),
            9 => Ok(OpCode::Rbo),
            99 => Ok(OpCode::Halt),
            _ => Err(i),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpCode::Nop => "NOP",
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::In => "IN",
            OpCode::Out => "OUT",
            OpCode::Jnz => "JNZ",
            OpCode::Jz => "JZ",
            OpCode::Lt => "LT",
            OpCode::Eq => "EQ",
            OpCode::Rbo => "RBO",
            OpCode::Halt => "HALT",
        })
    }
}

/// Parameter mode for Intcode instruction
///
/// Intcode instruction parameters each have a mode:  [positional], [immediate], or [relative].
///
/// When executing an intcode instruction, the instruction's parameters are interpreted in
/// accordance with their associated modes.
///
/// [positional]: ParamMode::Positional
/// [immediate]: ParamMode::Immediate
/// [relative]: ParamMode::Relative
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ParamMode {
    /// Positional Mode
    ///
    /// A parameter in positional mode evaluates to the value at the address specified by the
    /// parameter.
    #[default]
    Positional = 0,
    /// Immediate Mode
    ///
    /// A parameter in immediate mode evaluates directly to the value specified. Instructions which
    /// write to memory may not use immediate mode for their destinations.
    #[doc(alias = "#")]
    Immediate = 1,
    /// Relative Mode
    ///
    /// A parameter in relative mode evaluates to the value at the address specified by the
    /// parameter, added to the relative base, which starts out as `0` but can be modified with
    /// [`OpCode::Rbo`].
    #[doc(alias = "@")]
    Relative = 2,
}

impl ParamMode {
    /// Resolve a raw parameter into the address it refers to, given the current relative base.
    ///
    /// Immediate parameters don't refer to an address, so they resolve to [`None`].
    pub const fn address(self, raw: i64, rel_base: i64) -> Option<i64> {
        match self {
            ParamMode::Positional => Some(raw),
            ParamMode::Immediate => None,
            ParamMode::Relative => Some(raw.wrapping_add(rel_base)),
        }
    }
}

/// Parse a single mode digit.
///
/// On its own, there's no instruction to report, so an [`InterpreterError::UnknownMode`] carries
/// the digit as its `instruction` too. [decode] fills in the full instruction word.
impl TryFrom<i64> for ParamMode {
    type Error = InterpreterError;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(ParamMode::Positional),
            1 => Ok(ParamMode::Immediate),
            2 => Ok(ParamMode::Relative),
            mode => Err(InterpreterError::UnknownMode {
                mode,
                instruction: mode,
            }),
        }
    }
}

impl Display for ParamMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Positional => Ok(()),
            ParamMode::Immediate => write!(fmt, "#"),
            ParamMode::Relative => write!(fmt, "@"),
        }
    }
}

/// Split an instruction word into its [OpCode] and the [ParamMode]s of its 3 possible parameters.
///
/// Given a 5 digit number, digits ABCDE are used as follows:
/// DE is the two-digit opcode,
/// C is the 1st parameter's mode,
/// B is the 2nd parameter's mode, and
/// A is the 3rd parameter's mode.
///
/// Missing digits are `0`, so they default to [`ParamMode::Positional`].
///
/// # Example
///
/// ```
/// use intcode_vm::{decode, OpCode, ParamMode};
/// assert_eq!(
///     decode(1002),
///     Ok((OpCode::Mul, [ParamMode::Positional, ParamMode::Immediate, ParamMode::Positional]))
/// );
/// ```
pub fn decode(word: i64) -> Result<(OpCode, [ParamMode; 3]), InterpreterError> {
    if word < 0 {
        return Err(InterpreterError::UnrecognizedOpcode(word));
    }
    let opcode =
        OpCode::try_from(word % 100).map_err(|_| InterpreterError::UnrecognizedOpcode(word))?;
    let mode = |digits: i64| {
        ParamMode::try_from(digits).map_err(|_| InterpreterError::UnknownMode {
            mode: digits,
            instruction: word,
        })
    };
    Ok((
        opcode,
        [
            mode((word / 100) % 10)?,
            mode((word / 1000) % 10)?,
            // anything above the 3rd mode digit is folded in, and rejected as an unknown mode
            mode(word / 10000)?,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParamMode::*;

    #[test]
    fn mul_with_immediate() {
        assert_eq!(decode(1002), Ok((OpCode::Mul, [Positional, Immediate, Positional])));
    }

    #[test]
    fn all_modes() {
        assert_eq!(decode(21101), Ok((OpCode::Add, [Immediate, Immediate, Relative])));
        assert_eq!(decode(204), Ok((OpCode::Out, [Relative, Positional, Positional])));
        assert_eq!(decode(99), Ok((OpCode::Halt, [Positional; 3])));
        assert_eq!(decode(0), Ok((OpCode::Nop, [Positional; 3])));
    }

    #[test]
    fn bad_words() {
        assert_eq!(decode(42), Err(InterpreterError::UnrecognizedOpcode(42)));
        assert_eq!(decode(-1), Err(InterpreterError::UnrecognizedOpcode(-1)));
        assert_eq!(decode(198), Err(InterpreterError::UnrecognizedOpcode(198)));
        assert_eq!(
            decode(301),
            Err(InterpreterError::UnknownMode {
                mode: 3,
                instruction: 301
            })
        );
        assert_eq!(
            decode(100001),
            Err(InterpreterError::UnknownMode {
                mode: 10,
                instruction: 100001
            })
        );
    }

    #[test]
    fn mode_digits() {
        assert_eq!(ParamMode::try_from(0), Ok(Positional));
        assert_eq!(ParamMode::try_from(1), Ok(Immediate));
        assert_eq!(ParamMode::try_from(2), Ok(Relative));
        for bad in [3, 9, -1] {
            assert_eq!(
                ParamMode::try_from(bad),
                Err(InterpreterError::UnknownMode {
                    mode: bad,
                    instruction: bad
                })
            );
        }
        assert_eq!(
            decode(1301),
            Err(InterpreterError::UnknownMode {
                mode: 3,
                instruction: 1301
            })
        );
    }

    #[test]
    fn instruction_lengths() {
        let expected = [
            (OpCode::Nop, 1),
            (OpCode::Add, 4),
            (OpCode::Mul, 4),
            (OpCode::In, 2),
            (OpCode::Out, 2),
            (OpCode::Jnz, 3),
            (OpCode::Jz, 3),
            (OpCode::Lt, 4),
            (OpCode::Eq, 4),
            (OpCode::Rbo, 2),
            (OpCode::Halt, 1),
        ];
        for (op, len) in expected {
            assert_eq!(op.len(), len, "{op}");
            assert_eq!(OpCode::try_from(op as i64), Ok(op));
        }
    }

    #[test]
    fn resolving_addresses() {
        assert_eq!(Positional.address(5, 100), Some(5));
        assert_eq!(Immediate.address(5, 100), None);
        assert_eq!(Relative.address(-1, 100), Some(99));
    }
}
