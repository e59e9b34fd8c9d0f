//! VM Translator CLI
//!
//! Usage:
//!     vm-translator <file.vm | directory> [-o OUTPUT] [--init] [-v]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as ClapParser;
use stack_vm_translator::{TranslateOptions, VMError, output_path, translate_path, vm_files};

#[derive(ClapParser, Debug)]
#[command(name = "vm-translator")]
#[command(version)]
#[command(about = "Translate stack VM arithmetic and memory commands to Hack assembly")]
#[command(author = "nand2tetris")]
struct Args {
    /// Input .vm file or directory of .vm files
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to Input.asm, or dir/dir.asm for a directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Initialize SP and the segment base registers first
    #[arg(long)]
    init: bool,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: Path not found: {}", args.input.display());
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<PathBuf, VMError> {
    let start = Instant::now();
    let options = TranslateOptions { init: args.init };

    if args.verbose {
        if args.input.is_dir() {
            let files = vm_files(&args.input)?;
            eprintln!(
                "Translating directory: {} ({} .vm files)",
                args.input.display(),
                files.len()
            );
            for f in &files {
                eprintln!("  - {}", f.display());
            }
        } else {
            eprintln!("Translating file: {}", args.input.display());
        }
        if args.init {
            eprintln!("Emitting base-address initialization");
        }
    }

    let asm = translate_path(&args.input, options)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.input));

    fs::write(&output, &asm).map_err(|e| VMError::FileWrite {
        path: output.display().to_string(),
        source: e,
    })?;

    if args.verbose {
        eprintln!(
            "Generated {} lines of assembly in {:.2}ms",
            asm.lines().count(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(output)
}
