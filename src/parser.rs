//! Line normalization and command classification.

use crate::error::{Result, VMError};
use crate::memory::Segment;

/// Largest value an A-instruction can load (15 bits).
pub const MAX_INDEX: u16 = 32767;

/// VM Command representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VMCommand {
    Arithmetic(ArithmeticOp),
    Push { segment: Segment, index: u16 },
    Pop { segment: Segment, index: u16 },
    /// Recognized but not translated.
    Return,
    /// Any two-token command (label, goto, if-goto). Recognized but not translated.
    Unsupported { command: String },
}

/// Arithmetic/Logical operations (9 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add, // x + y
    Sub, // x - y
    Neg, // -x
    Eq,  // x == y
    Gt,  // x > y
    Lt,  // x < y
    And, // x & y
    Or,  // x | y
    Not, // !x
}

impl ArithmeticOp {
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "add" => Some(ArithmeticOp::Add),
            "sub" => Some(ArithmeticOp::Sub),
            "neg" => Some(ArithmeticOp::Neg),
            "eq" => Some(ArithmeticOp::Eq),
            "gt" => Some(ArithmeticOp::Gt),
            "lt" => Some(ArithmeticOp::Lt),
            "and" => Some(ArithmeticOp::And),
            "or" => Some(ArithmeticOp::Or),
            "not" => Some(ArithmeticOp::Not),
            _ => None,
        }
    }

    /// Change in stack height caused by this operation.
    pub fn stack_effect(&self) -> isize {
        match self {
            ArithmeticOp::Neg | ArithmeticOp::Not => 0,
            _ => -1,
        }
    }
}

/// Strip comments and whitespace, dropping blank and comment-only lines.
pub fn clean_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(|line| line.split("//").next().unwrap_or("").trim())
        .collect()
}

/// Classify one normalized line.
///
/// `line` is the 0-based index of the command in the normalized stream.
pub fn parse_command(text: &str, file: &str, line: usize) -> Result<VMCommand> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    match tokens.as_slice() {
        ["return"] => Ok(VMCommand::Return),
        [opcode] => ArithmeticOp::from_name(opcode)
            .map(VMCommand::Arithmetic)
            .ok_or_else(|| VMError::UnknownOpcode {
                file: file.to_string(),
                line,
                opcode: opcode.to_string(),
            }),
        [command, _] => Ok(VMCommand::Unsupported {
            command: command.to_string(),
        }),
        [command @ ("push" | "pop"), segment, index] => {
            let segment = Segment::from_name(segment).ok_or_else(|| VMError::InvalidSegment {
                file: file.to_string(),
                line,
                segment: segment.to_string(),
            })?;
            let index: u16 = index
                .parse::<u16>()
                .ok()
                .filter(|n| *n <= MAX_INDEX)
                .ok_or_else(|| VMError::InvalidIndex {
                    file: file.to_string(),
                    line,
                    value: index.to_string(),
                })?;

            if *command == "push" {
                Ok(VMCommand::Push { segment, index })
            } else {
                Ok(VMCommand::Pop { segment, index })
            }
        }
        _ => Err(VMError::InvalidCommand {
            file: file.to_string(),
            line,
            command: tokens.first().copied().unwrap_or_default().to_string(),
        }),
    }
}
