//! Segment table and address resolution for push/pop.

use crate::codegen::{push_at_decimal, push_at_symbol, push_decimal};
use crate::error::{Result, VMError};

/// First RAM register of the `pointer` segment (R3 = THIS, R4 = THAT).
pub const POINTER_BASE: u16 = 3;
/// First RAM register of the `temp` segment.
pub const TEMP_BASE: u16 = 5;
/// Largest index accepted by the fixed-base segments.
pub const FIXED_SEGMENT_MAX_INDEX: u16 = 10;

/// Memory segments (8 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant, // immediate value, push only
    Local,    // RAM[LCL + index]
    Argument, // RAM[ARG + index]
    This,     // RAM[THIS + index]
    That,     // RAM[THAT + index]
    Pointer,  // R3 + index
    Temp,     // R5 + index
    Static,   // File.index
}

impl Segment {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "constant" => Some(Segment::Constant),
            "local" => Some(Segment::Local),
            "argument" => Some(Segment::Argument),
            "this" => Some(Segment::This),
            "that" => Some(Segment::That),
            "pointer" => Some(Segment::Pointer),
            "temp" => Some(Segment::Temp),
            "static" => Some(Segment::Static),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
            Segment::Static => "static",
        }
    }
}

/// Direction of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Push,
    Pop,
}

/// How the cell behind `(segment, index)` is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentAccess {
    /// `@index` names the value itself.
    Immediate { value: u16 },
    /// `@R<register>` names the cell.
    Fixed { register: u16 },
    /// `@File.index` names the cell.
    Static { index: u16 },
    /// Cell address is `*base + index`.
    Indirect { base: &'static str, index: u16 },
}

impl SegmentAccess {
    /// Write the instructions that leave the target address in `A`, or the
    /// literal value for [`SegmentAccess::Immediate`].
    pub fn write_address(&self, filename: &str, buf: &mut String) {
        match self {
            SegmentAccess::Immediate { value } => push_at_decimal(buf, *value),
            SegmentAccess::Fixed { register } => {
                buf.push_str("@R");
                push_decimal(buf, usize::from(*register));
                buf.push('\n');
            }
            SegmentAccess::Static { index } => {
                // File.index
                buf.push('@');
                buf.push_str(filename);
                buf.push('.');
                push_decimal(buf, usize::from(*index));
                buf.push('\n');
            }
            SegmentAccess::Indirect { base, index } => {
                push_at_symbol(buf, base);
                buf.push_str("D=M\n"); // D = base pointer
                push_at_decimal(buf, *index);
                buf.push_str("A=D+A\n"); // A = base + index
            }
        }
    }
}

/// Resolve a segment access, enforcing the per-segment access rules.
///
/// `file` and `line` are only used to locate errors.
pub fn resolve(
    segment: Segment,
    index: u16,
    access: Access,
    file: &str,
    line: usize,
) -> Result<SegmentAccess> {
    match segment {
        Segment::Constant => {
            if access == Access::Pop {
                return Err(VMError::PopToConstant {
                    file: file.to_string(),
                    line,
                });
            }
            Ok(SegmentAccess::Immediate { value: index })
        }
        Segment::Static => Ok(SegmentAccess::Static { index }),
        Segment::Temp | Segment::Pointer => {
            if index > FIXED_SEGMENT_MAX_INDEX {
                return Err(VMError::SegmentCapacity {
                    file: file.to_string(),
                    line,
                    segment: segment.name().to_string(),
                    index,
                    max: FIXED_SEGMENT_MAX_INDEX,
                });
            }
            let base = if segment == Segment::Temp {
                TEMP_BASE
            } else {
                POINTER_BASE
            };
            Ok(SegmentAccess::Fixed {
                register: base + index,
            })
        }
        Segment::Local => Ok(SegmentAccess::Indirect { base: "LCL", index }),
        Segment::Argument => Ok(SegmentAccess::Indirect { base: "ARG", index }),
        Segment::This => Ok(SegmentAccess::Indirect { base: "THIS", index }),
        Segment::That => Ok(SegmentAccess::Indirect { base: "THAT", index }),
    }
}
