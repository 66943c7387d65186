//! Bytecode file header (11 bytes).
//!
//! Layout:
//! - 0-1: magic `b"GD"`
//! - 2: format version (0 marks a failed assembly)
//! - 3-10: body length in bytes (u64 LE)

use std::fmt;

use super::constants::{HEADER_SIZE, MAGIC, VERSION};

/// Bytecode format revision.
///
/// Version 1 only knows the stack arithmetic subset and always stores an
/// immediate after `PUSH`. Version 2 adds registers, memory and branches,
/// and drives operand decoding from the opcode's mode bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Version {
    V1 = 1,
    #[default]
    V2 = 2,
}

impl Version {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// File header - first 11 bytes of the bytecode file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"GD"
    pub magic: [u8; 2],
    /// Format version (0 = source had errors, 1 or 2 = runnable)
    pub version: u8,
    /// Number of body bytes following the header
    pub body_len: u64,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            body_len: 0,
        }
    }
}

impl Header {
    pub fn new(version: Version, body_len: u64) -> Self {
        Self {
            magic: MAGIC,
            version: version.as_u8(),
            body_len,
        }
    }

    /// Decode header from the first 11 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let mut len = [0u8; 8];
        len.copy_from_slice(&bytes[3..HEADER_SIZE]);

        Self {
            magic: [bytes[0], bytes[1]],
            version: bytes[2],
            body_len: u64::from_le_bytes(len),
        }
    }

    /// Encode header to 11 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.magic);
        bytes[2] = self.version;
        bytes[3..HEADER_SIZE].copy_from_slice(&self.body_len.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        Version::from_u8(self.version).is_some()
    }

    /// Version 0 is written for sources that failed to assemble.
    pub fn is_error_marker(&self) -> bool {
        self.version == 0
    }
}
