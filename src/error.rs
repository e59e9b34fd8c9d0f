//! Error types for VM translation.
//!
//! Every translation error names the source file and the 0-based index of
//! the offending command in the file's normalized command stream.

use thiserror::Error;

/// VM translation error with file and line context.
#[derive(Error, Debug)]
pub enum VMError {
    #[error("{file}:{line}: {segment} is invalid memory segment")]
    InvalidSegment {
        file: String,
        line: usize,
        segment: String,
    },

    #[error("{file}:{line}: can't change memory segment constant")]
    PopToConstant { file: String, line: usize },

    #[error("{file}:{line}: invalid location {index} for segment {segment} (max: {max})")]
    SegmentCapacity {
        file: String,
        line: usize,
        segment: String,
        index: u16,
        max: u16,
    },

    #[error("{file}:{line}: {command} is not a valid command")]
    InvalidCommand {
        file: String,
        line: usize,
        command: String,
    },

    #[error("{file}:{line}: {opcode} is not a valid command")]
    UnknownOpcode {
        file: String,
        line: usize,
        opcode: String,
    },

    #[error("{file}:{line}: invalid index value: {value}")]
    InvalidIndex {
        file: String,
        line: usize,
        value: String,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no .vm files found in directory: {path}")]
    NoVmFiles { path: String },

    #[error("path is not a .vm file or directory: {path}")]
    InvalidPath { path: String },
}

impl VMError {
    /// Source file the error was raised in, if it came from translation.
    pub fn file(&self) -> Option<&str> {
        match self {
            VMError::InvalidSegment { file, .. }
            | VMError::PopToConstant { file, .. }
            | VMError::SegmentCapacity { file, .. }
            | VMError::InvalidCommand { file, .. }
            | VMError::UnknownOpcode { file, .. }
            | VMError::InvalidIndex { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Command index the error was raised at, if it came from translation.
    pub fn line(&self) -> Option<usize> {
        match self {
            VMError::InvalidSegment { line, .. }
            | VMError::PopToConstant { line, .. }
            | VMError::SegmentCapacity { line, .. }
            | VMError::InvalidCommand { line, .. }
            | VMError::UnknownOpcode { line, .. }
            | VMError::InvalidIndex { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for VM operations.
pub type Result<T> = std::result::Result<T, VMError>;
