//! Shared logic for every command: reading inputs, assembling, executing.
//!
//! Helpers return `Result` so they can be tested; commands turn errors into
//! `error: ...` on stderr and exit status 1 through [`fail`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gdvm_asm::{Assembler, Diagnostics};
use gdvm_bytecode::{MAGIC, Program, ProgramError, Version};
use gdvm_vm::{FuelLimits, RuntimeError, VM};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read '{}': not valid UTF-8 ({source})", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        source: std::str::Utf8Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Program(#[from] ProgramError),

    #[error("could not assemble '{}': {}", .path.display(), error_count(.diagnostics))]
    Assembly {
        path: PathBuf,
        source_text: String,
        diagnostics: Diagnostics,
    },
}

impl InputError {
    /// Full stderr report: rendered diagnostics (if any) then the summary line.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        if let Self::Assembly {
            path,
            source_text,
            diagnostics,
        } = self
        {
            let path = path.display().to_string();
            out.push_str(
                &diagnostics
                    .printer()
                    .source(source_text)
                    .path(&path)
                    .colored(color)
                    .render(),
            );
            out.push('\n');
        }
        out.push_str(&format!("error: {self}"));
        out
    }
}

fn error_count(diagnostics: &Diagnostics) -> String {
    match diagnostics.error_count() {
        1 => "1 error".to_string(),
        n => format!("{n} errors"),
    }
}

/// Print the error and exit with status 1.
pub fn fail(err: InputError, color: bool) -> ! {
    eprintln!("{}", err.render(color));
    std::process::exit(1)
}

/// VM configuration shared by `exec`, `run` and `trace`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VmOptions {
    pub memory: usize,
    pub fuel: Option<u64>,
    pub recursion_limit: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            memory: gdvm_vm::Memory::DEFAULT_SIZE,
            fuel: None,
            recursion_limit: FuelLimits::default().get_recursion_limit(),
        }
    }
}

impl VmOptions {
    pub fn build(&self) -> VM {
        let builder = VM::builder()
            .memory_size(self.memory)
            .recursion_limit(self.recursion_limit);
        match self.fuel {
            Some(fuel) => builder.exec_fuel(fuel).build(),
            None => builder.build(),
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, InputError> {
    fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a bytecode file, validating its header.
pub fn load_bytecode(path: &Path) -> Result<Program, InputError> {
    Ok(Program::from_bytes(read(path)?)?)
}

/// Read and assemble a source file.
pub fn assemble_file(
    path: &Path,
    version: Version,
    single_pass: bool,
) -> Result<Program, InputError> {
    let bytes = read(path)?;
    let source = String::from_utf8(bytes).map_err(|e| InputError::InvalidUtf8 {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })?;
    assemble(path, source, version, single_pass)
}

/// Bytecode if the file starts with the magic, otherwise UTF-8 source to assemble.
///
/// Files that are neither report the header error.
pub fn load_program(path: &Path) -> Result<Program, InputError> {
    let bytes = read(path)?;
    if bytes.starts_with(&MAGIC) {
        return Ok(Program::from_bytes(bytes)?);
    }
    match String::from_utf8(bytes) {
        Ok(source) => assemble(path, source, Version::default(), false),
        Err(e) => Ok(Program::from_bytes(e.into_bytes())?),
    }
}

fn assemble(
    path: &Path,
    source: String,
    version: Version,
    single_pass: bool,
) -> Result<Program, InputError> {
    let result = Assembler::new(&source)
        .format_version(version)
        .single_pass(single_pass)
        .assemble();

    match result {
        Ok(assembly) => Ok(assembly.into_program()),
        Err(gdvm_asm::Error::Assembly(diagnostics)) => Err(InputError::Assembly {
            path: path.to_path_buf(),
            source_text: source,
            diagnostics,
        }),
    }
}

/// Write the full file (header and body).
pub fn write_program(path: &Path, program: &Program) -> Result<(), InputError> {
    fs::write(path, program.as_bytes()).map_err(|source| InputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Run to completion with `OUT` values on stdout, then print `OK`.
///
/// Runtime errors print `runtime error: ...` and exit with status 1.
pub fn execute(program: &Program, options: &VmOptions) {
    let mut vm = options.build();
    let mut out = io::stdout().lock();
    let result = vm
        .execute(program, &mut out)
        .and_then(|()| out.flush().map_err(RuntimeError::from));
    drop(out);

    match result {
        Ok(()) => println!("OK"),
        Err(e) => {
            eprintln!("runtime error: {}", e);
            std::process::exit(1);
        }
    }
}
