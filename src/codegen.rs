//! Hack assembly generation for arithmetic and memory-access commands.

use crate::error::Result;
use crate::memory::{Access, Segment, SegmentAccess, resolve};
use crate::parser::{ArithmeticOp, VMCommand};

/// Prefix of the label a comparison jumps to when it holds.
pub const TRUE_LABEL_PREFIX: &str = "BOOL";
/// Prefix of the label both comparison paths meet at.
pub const END_LABEL_PREFIX: &str = "ENDBOOL";

/// Append the decimal digits of `value` without allocating.
pub(crate) fn push_decimal(buf: &mut String, value: usize) {
    let mut divisor = 1;
    while divisor <= value / 10 {
        divisor *= 10;
    }
    while divisor > 0 {
        buf.push(char::from(b'0' + ((value / divisor) % 10) as u8));
        divisor /= 10;
    }
}

/// Write `@<value>`
pub(crate) fn push_at_decimal(buf: &mut String, value: u16) {
    buf.push('@');
    push_decimal(buf, usize::from(value));
    buf.push('\n');
}

/// Write `@<symbol>`
pub(crate) fn push_at_symbol(buf: &mut String, symbol: &str) {
    buf.push('@');
    buf.push_str(symbol);
    buf.push('\n');
}

/// Write `@<prefix>_<n>`
fn push_at_numbered(buf: &mut String, prefix: &str, n: usize) {
    buf.push('@');
    buf.push_str(prefix);
    buf.push('_');
    push_decimal(buf, n);
    buf.push('\n');
}

/// Write the label declaration `(<prefix>_<n>)`
fn push_numbered_label(buf: &mut String, prefix: &str, n: usize) {
    buf.push('(');
    buf.push_str(prefix);
    buf.push('_');
    push_decimal(buf, n);
    buf.push_str(")\n");
}

/// Sequence generator for comparison labels.
///
/// Lives as long as one translation run and is never reset, so label
/// numbers stay unique across every file of the run.
#[derive(Debug, Clone, Default)]
pub struct LabelCounter {
    next: usize,
}

impl LabelCounter {
    /// Reserve the next label number.
    pub fn reserve(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }

    /// Number of labels reserved so far.
    pub fn count(&self) -> usize {
        self.next
    }
}

/// Code generator for Hack assembly.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    labels: LabelCounter,
    /// Current file name (no path, no extension) for static symbols
    static_filename: String,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file context used to name `static` symbols.
    pub fn set_filename(&mut self, filename: &str) {
        self.static_filename = filename.to_string();
    }

    /// Number of comparisons translated so far in this run.
    pub fn comparisons(&self) -> usize {
        self.labels.count()
    }

    /// Translate one command, appending its instructions to `buf`.
    ///
    /// `line` is only used to locate errors.
    pub fn translate(&mut self, cmd: &VMCommand, line: usize, buf: &mut String) -> Result<()> {
        match cmd {
            VMCommand::Arithmetic(op) => self.translate_arithmetic(*op, buf),
            VMCommand::Push { segment, index } => {
                self.translate_push(*segment, *index, line, buf)?
            }
            VMCommand::Pop { segment, index } => self.translate_pop(*segment, *index, line, buf)?,
            // Call/return and branching are not translated.
            VMCommand::Return | VMCommand::Unsupported { .. } => {}
        }
        Ok(())
    }

    /// Binary ops: pop y, pop x, push (x op y). Unary ops: pop x, push (op x)
    fn translate_arithmetic(&mut self, op: ArithmeticOp, buf: &mut String) {
        if op.stack_effect() != 0 {
            buf.push_str("@SP\n");
            buf.push_str("M=M-1\n"); // SP--
            buf.push_str("A=M\n");
            buf.push_str("D=M\n"); // D = y
        }
        buf.push_str("@SP\n");
        buf.push_str("M=M-1\n"); // SP--
        buf.push_str("@SP\n");
        buf.push_str("A=M\n"); // A points to x

        match op {
            ArithmeticOp::Add => buf.push_str("M=M+D\n"), // x + y
            ArithmeticOp::Sub => buf.push_str("M=M-D\n"), // x - y
            ArithmeticOp::And => buf.push_str("M=M&D\n"), // x & y
            ArithmeticOp::Or => buf.push_str("M=M|D\n"),  // x | y
            ArithmeticOp::Neg => buf.push_str("M=-M\n"),  // -x
            ArithmeticOp::Not => buf.push_str("M=!M\n"),  // !x
            ArithmeticOp::Eq => self.translate_comparison("JEQ", buf),
            ArithmeticOp::Gt => self.translate_comparison("JGT", buf),
            ArithmeticOp::Lt => self.translate_comparison("JLT", buf),
        }

        buf.push_str("@SP\n");
        buf.push_str("M=M+1\n"); // SP++
    }

    /// Expects A to point at x and D to hold y; writes (x cmp y ? -1 : 0) at x.
    fn translate_comparison(&mut self, jump: &str, buf: &mut String) {
        let n = self.labels.reserve();

        buf.push_str("D=M-D\n"); // D = x - y
        push_at_numbered(buf, TRUE_LABEL_PREFIX, n);
        buf.push_str("D;");
        buf.push_str(jump);
        buf.push('\n');

        // False case: x = 0
        buf.push_str("@SP\n");
        buf.push_str("A=M\n");
        buf.push_str("M=0\n");
        push_at_numbered(buf, END_LABEL_PREFIX, n);
        buf.push_str("0;JMP\n");

        // True case: x = -1
        push_numbered_label(buf, TRUE_LABEL_PREFIX, n);
        buf.push_str("@SP\n");
        buf.push_str("A=M\n");
        buf.push_str("M=-1\n");

        push_numbered_label(buf, END_LABEL_PREFIX, n);
    }

    fn translate_push(
        &mut self,
        segment: Segment,
        index: u16,
        line: usize,
        buf: &mut String,
    ) -> Result<()> {
        let access = resolve(segment, index, Access::Push, &self.static_filename, line)?;
        access.write_address(&self.static_filename, buf);

        if matches!(access, SegmentAccess::Immediate { .. }) {
            buf.push_str("D=A\n"); // D = constant
        } else {
            buf.push_str("D=M\n"); // D = *addr
        }
        buf.push_str("@SP\n");
        buf.push_str("A=M\n");
        buf.push_str("M=D\n"); // *SP = D
        buf.push_str("@SP\n");
        buf.push_str("M=M+1\n"); // SP++
        Ok(())
    }

    fn translate_pop(
        &mut self,
        segment: Segment,
        index: u16,
        line: usize,
        buf: &mut String,
    ) -> Result<()> {
        let access = resolve(segment, index, Access::Pop, &self.static_filename, line)?;
        access.write_address(&self.static_filename, buf);

        // Resolving the target clobbers A and D, so stash it first
        buf.push_str("D=A\n");
        buf.push_str("@R13\n");
        buf.push_str("M=D\n"); // R13 = addr
        buf.push_str("@SP\n");
        buf.push_str("M=M-1\n"); // SP--
        buf.push_str("A=M\n");
        buf.push_str("D=M\n"); // D = *SP
        buf.push_str("@R13\n");
        buf.push_str("A=M\n");
        buf.push_str("M=D\n"); // *addr = D
        Ok(())
    }
}
