//! gdvm assembler: source text to bytecode.
//!
//! Pipeline:
//! - `lexer` - span-based tokens
//! - `parser` - statements with typed operands (operand grammar)
//! - `emit` - label collection, then encoding against the finished table
//! - `diagnostics` - line-tagged error reporting
//!
//! # Example
//!
//! ```
//! use gdvm_asm::Assembler;
//!
//! let assembly = Assembler::new("push 3\npush 4\nadd\nout\nhlt\n")
//!     .assemble()
//!     .expect("valid program");
//! assert_eq!(assembly.program().body().len(), 21);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod emit;
pub mod labels;
pub mod lexer;
pub mod parser;


use gdvm_bytecode::{Program, Version};

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, LineIndex};
pub use labels::{DuplicateLabel, Label, LabelTable};

/// Errors that can occur during assembly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("assembly failed with {} errors", .0.error_count())]
    Assembly(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::Assembly(d) => d,
        }
    }
}

/// Result type for assembler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Builder-style entry point for assembling one source file.
pub struct Assembler<'src> {
    source: &'src str,
    version: Version,
    single_pass: bool,
}

impl<'src> Assembler<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            version: Version::default(),
            single_pass: false,
        }
    }

    /// Target format revision (default: 2).
    pub fn format_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Resolve labels in the same walk that encodes, rejecting forward references.
    pub fn single_pass(mut self, value: bool) -> Self {
        self.single_pass = value;
        self
    }

    /// Run every stage, failing if any stage reported an error.
    ///
    /// All stages run even when an earlier one failed, so the diagnostics
    /// cover every broken line at once.
    pub fn assemble(&self) -> Result<Assembly> {
        let (ast, mut diagnostics) = parser::parse(self.source);

        let (labels, body) = if self.single_pass {
            let (labels, body, d) = emit::assemble_single_pass(&ast, self.version);
            diagnostics.extend(d);
            (labels, body)
        } else {
            let (labels, d) = emit::collect_labels(&ast, self.version);
            diagnostics.extend(d);
            let (body, d) = emit::encode(&ast, &labels, self.version);
            diagnostics.extend(d);
            (labels, body)
        };

        if diagnostics.has_errors() {
            return Err(Error::Assembly(diagnostics));
        }

        Ok(Assembly {
            program: Program::from_body(self.version, &body),
            labels,
        })
    }
}

/// Successful assembly output.
#[derive(Debug, Clone)]
pub struct Assembly {
    program: Program,
    labels: LabelTable,
}

impl Assembly {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Header plus body, ready to be written to disk.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.program.as_bytes().to_vec()
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}
