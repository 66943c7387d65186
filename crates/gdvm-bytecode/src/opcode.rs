//! Opcode byte: 5-bit operation plus addressing-mode flags.
//!
//! `OpByte::from_byte` and `OpByte::to_byte` are the only places that know
//! the bit layout; everything else works with the typed pair.

use super::constants::{MEM_ARG, NUM_ARG, OPCODE_MASK, REG_ARG};
use super::header::Version;

/// Operation selected by the low 5 bits of an opcode byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Opcode {
    Hlt = 0,
    Push = 1,
    Add = 2,
    Sub = 3,
    Mul = 4,
    Div = 5,
    Out = 6,
    Pop = 8,
    Call = 9,
    Ret = 10,
    Jmp = 11,
    Sqrt = 12,
    Ja = 13,
    Jae = 14,
    Jb = 15,
    Jbe = 16,
    Je = 17,
    Jne = 18,
}

impl Opcode {
    pub const ALL: [Opcode; 18] = [
        Self::Hlt,
        Self::Push,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Out,
        Self::Pop,
        Self::Call,
        Self::Ret,
        Self::Jmp,
        Self::Sqrt,
        Self::Ja,
        Self::Jae,
        Self::Jb,
        Self::Jbe,
        Self::Je,
        Self::Jne,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| *op as u8 == v)
    }

    /// Lowercase assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => "hlt",
            Self::Push => "push",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Out => "out",
            Self::Pop => "pop",
            Self::Call => "call",
            Self::Ret => "ret",
            Self::Jmp => "jmp",
            Self::Sqrt => "sqrt",
            Self::Ja => "ja",
            Self::Jae => "jae",
            Self::Jb => "jb",
            Self::Jbe => "jbe",
            Self::Je => "je",
            Self::Jne => "jne",
        }
    }

    /// Case-insensitive mnemonic lookup.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Takes a PUSH/POP style operand.
    pub fn has_operand(self) -> bool {
        matches!(self, Self::Push | Self::Pop)
    }

    /// Followed by a 4-byte body offset.
    pub fn has_target(self) -> bool {
        matches!(
            self,
            Self::Call
                | Self::Jmp
                | Self::Ja
                | Self::Jae
                | Self::Jb
                | Self::Jbe
                | Self::Je
                | Self::Jne
        )
    }

    /// Whether the operation exists in the given format revision.
    pub fn is_supported(self, version: Version) -> bool {
        match version {
            Version::V1 => (self as u8) <= Self::Out as u8,
            Version::V2 => true,
        }
    }
}

/// Addressing-mode flags carried in the high bits of the opcode byte.
///
/// Flags are independent: `num` and `reg` together mean "register plus
/// immediate", and `mem` turns that sum into a memory index.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Mode {
    pub num: bool,
    pub reg: bool,
    pub mem: bool,
}

impl Mode {
    pub const NONE: Self = Self {
        num: false,
        reg: false,
        mem: false,
    };

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    fn from_bits(byte: u8) -> Self {
        Self {
            num: byte & NUM_ARG != 0,
            reg: byte & REG_ARG != 0,
            mem: byte & MEM_ARG != 0,
        }
    }

    fn bits(self) -> u8 {
        let mut bits = 0;
        if self.num {
            bits |= NUM_ARG;
        }
        if self.reg {
            bits |= REG_ARG;
        }
        if self.mem {
            bits |= MEM_ARG;
        }
        bits
    }
}

/// Decoded opcode byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OpByte {
    pub opcode: Opcode,
    pub mode: Mode,
}

impl OpByte {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            mode: Mode::NONE,
        }
    }

    pub fn with_mode(opcode: Opcode, mode: Mode) -> Self {
        Self { opcode, mode }
    }

    /// Split a raw byte into operation and flags.
    ///
    /// Returns the raw byte back when the low bits name no operation.
    pub fn from_byte(byte: u8) -> Result<Self, u8> {
        let opcode = Opcode::from_u8(byte & OPCODE_MASK).ok_or(byte)?;
        Ok(Self {
            opcode,
            mode: Mode::from_bits(byte),
        })
    }

    pub fn to_byte(self) -> u8 {
        self.opcode as u8 | self.mode.bits()
    }
}
