//! Loaded bytecode: validated header plus body.

use std::io;
use std::path::Path;

use super::constants::{HEADER_SIZE, VERSION};
use super::cursor::ByteReader;
use super::header::{Header, Version};
use super::instruction::{DecodeError, Instruction};

/// Errors raised while loading a bytecode file, before anything executes.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("file too small: {0} bytes (minimum {min})", min = HEADER_SIZE)]
    TooShort(usize),
    #[error("invalid magic: expected GD")]
    InvalidMagic,
    #[error("program was assembled with errors (version 0)")]
    AssembledWithErrors,
    #[error("unsupported version: {0} (expected 1..={max})", max = VERSION)]
    UnsupportedVersion(u8),
    #[error("length mismatch: header says {header} body bytes, got {actual}")]
    LengthMismatch { header: u64, actual: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A validated bytecode program.
#[derive(Clone, Debug)]
pub struct Program {
    header: Header,
    version: Version,
    bytes: Vec<u8>,
}

impl Program {
    /// Wrap an encoded body with a fresh header.
    pub fn from_body(version: Version, body: &[u8]) -> Self {
        let header = Header::new(version, body.len() as u64);
        let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
        bytes.extend_from_slice(&header.to_bytes());
        bytes.extend_from_slice(body);
        Self {
            header,
            version,
            bytes,
        }
    }

    /// Load and validate a program from owned bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ProgramError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ProgramError::TooShort(bytes.len()));
        }

        let header = Header::from_bytes(&bytes);
        if !header.validate_magic() {
            return Err(ProgramError::InvalidMagic);
        }
        if header.is_error_marker() {
            return Err(ProgramError::AssembledWithErrors);
        }
        let Some(version) = Version::from_u8(header.version) else {
            return Err(ProgramError::UnsupportedVersion(header.version));
        };
        let actual = bytes.len() - HEADER_SIZE;
        if header.body_len != actual as u64 {
            return Err(ProgramError::LengthMismatch {
                header: header.body_len,
                actual,
            });
        }

        Ok(Self {
            header,
            version,
            bytes,
        })
    }

    /// Load a program from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Instruction bytes following the header.
    pub fn body(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    /// Full file contents, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode the instruction at body offset `pc`, returning it with the
    /// offset of the next instruction.
    pub fn decode_at(&self, pc: usize) -> Result<(Instruction, usize), DecodeError> {
        let mut reader = ByteReader::at(self.body(), pc);
        let instr = Instruction::decode(&mut reader, self.version)?;
        Ok((instr, reader.position()))
    }

    /// Linear walk over the body, stopping after the first decode error.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            program: self,
            pc: 0,
            failed: false,
        }
    }
}

/// Iterator returned by [`Program::instructions`]: `(offset, instruction)`.
pub struct Instructions<'a> {
    program: &'a Program,
    pc: usize,
    failed: bool,
}

impl Iterator for Instructions<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pc >= self.program.body().len() {
            return None;
        }
        match self.program.decode_at(self.pc) {
            Ok((instr, next)) => {
                let offset = self.pc;
                self.pc = next;
                Some(Ok((offset, instr)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
