//! Stack VM Translator - VM arithmetic and memory access to Hack assembly
//!
//! Translates the arithmetic/logical and push/pop subset of the stack VM
//! language (.vm) into Hack assembly (.asm). Every VM command maps to a fixed
//! instruction sequence.
//!
//! # Architecture
//!
//! ```text
//! VM source → clean_lines → parse_command → CodeGenerator → Hack assembly
//! ```
//!
//! - **Parser**: Normalizes lines and classifies commands by shape
//! - **Memory**: Segment table and address resolution
//! - **CodeGen**: Emits instructions, owns the run-wide label counter
//! - **Bootstrap**: Optional base-address prologue and the halt epilogue
//!
//! `return` and two-token commands (label, goto, if-goto) are accepted and
//! produce no code.
//!
//! # Example
//!
//! ```
//! use stack_vm_translator::translate;
//!
//! let asm = translate("push constant 7\npush constant 8\nadd", "SimpleAdd").unwrap();
//! assert!(asm.ends_with("(END)\n@END\n0;JMP"));
//! ```

pub mod bootstrap;
pub mod codegen;
pub mod error;
pub mod memory;
pub mod parser;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::{generate_halt, generate_init};
use crate::codegen::CodeGenerator;
pub use crate::error::{Result, VMError};
use crate::parser::{clean_lines, parse_command};

/// Extension of VM source files.
pub const VM_EXTENSION: &str = "vm";

/// Translation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    /// Emit the base-address initialization before the first unit.
    pub init: bool,
}

/// One translation run over any number of source units.
///
/// Units share a single [`CodeGenerator`], so comparison labels are unique
/// across the whole output.
#[derive(Debug)]
pub struct Translator {
    codegen: CodeGenerator,
    output: String,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        let output = if options.init {
            generate_init()
        } else {
            String::new()
        };
        Self {
            codegen: CodeGenerator::new(),
            output,
        }
    }

    /// Translate one unit and append its instructions to the output.
    ///
    /// `filename` is the file context for `static` symbols and error
    /// messages. On error neither the output nor the label counter changes.
    pub fn add_unit(&mut self, source: &str, filename: &str) -> Result<()> {
        let mut codegen = self.codegen.clone();
        codegen.set_filename(filename);

        let lines = clean_lines(source);
        let mut unit = String::with_capacity(lines.len() * 60);

        for (line, text) in lines.into_iter().enumerate() {
            let cmd = parse_command(text, filename, line)?;
            codegen.translate(&cmd, line, &mut unit)?;
        }

        self.codegen = codegen;
        self.output.push_str(&unit);
        Ok(())
    }

    /// Number of comparison label pairs emitted so far.
    pub fn comparisons(&self) -> usize {
        self.codegen.comparisons()
    }

    /// Append the halt block and return the program, one instruction per
    /// line.
    pub fn finish(mut self) -> String {
        self.output.push_str(&generate_halt());
        let len = self.output.trim_end().len();
        self.output.truncate(len);
        self.output
    }
}

/// Translate a single VM source string to a complete Hack program.
///
/// # Examples
///
/// ```
/// use stack_vm_translator::translate;
///
/// assert!(translate("push constant 5\npush constant 3\nadd", "Test").is_ok());
/// assert!(translate("pop constant 5", "Test").is_err());
/// ```
pub fn translate(source: &str, filename: &str) -> Result<String> {
    translate_sources(&[(filename, source)], TranslateOptions::default())
}

/// Translate `(filename, source)` units in order into one program.
pub fn translate_sources(units: &[(&str, &str)], options: TranslateOptions) -> Result<String> {
    let mut translator = Translator::new(options);
    for (filename, source) in units {
        translator.add_unit(source, filename)?;
    }
    Ok(translator.finish())
}

/// File context for a path: the file name without directory or extension.
pub fn file_context(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| VMError::FileRead {
        path: path.display().to_string(),
        source: e,
    })
}

/// Translate a single .vm file.
pub fn translate_file(path: &Path, options: TranslateOptions) -> Result<String> {
    let source = read_source(path)?;
    let mut translator = Translator::new(options);
    translator.add_unit(&source, &file_context(path))?;
    Ok(translator.finish())
}

/// List the .vm files directly inside `dir`, sorted by name.
pub fn vm_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| VMError::FileRead {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == VM_EXTENSION))
        .collect();

    files.sort();
    Ok(files)
}

/// Translate every .vm file in a directory into one program.
pub fn translate_directory(dir: &Path, options: TranslateOptions) -> Result<String> {
    let files = vm_files(dir)?;
    if files.is_empty() {
        return Err(VMError::NoVmFiles {
            path: dir.display().to_string(),
        });
    }

    let mut translator = Translator::new(options);
    for file in &files {
        let source = read_source(file)?;
        translator.add_unit(&source, &file_context(file))?;
    }
    Ok(translator.finish())
}

/// Translate a .vm file or a directory of them.
pub fn translate_path(path: &Path, options: TranslateOptions) -> Result<String> {
    if path.is_dir() {
        translate_directory(path, options)
    } else if path.is_file() && path.extension().is_some_and(|ext| ext == VM_EXTENSION) {
        translate_file(path, options)
    } else {
        Err(VMError::InvalidPath {
            path: path.display().to_string(),
        })
    }
}

/// Determine the default output file for an input.
///
/// - File: `Input.vm` -> `Input.asm`
/// - Directory: `dir/` -> `dir/dir.asm`
pub fn output_path(input: &Path) -> PathBuf {
    if input.is_dir() {
        let dir_name = input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        input.join(format!("{dir_name}.asm"))
    } else {
        input.with_extension("asm")
    }
}
