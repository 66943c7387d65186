//! Typed instructions and their byte encoding.
//!
//! Version 2 layout: opcode byte, then a register index byte if `REG_ARG`,
//! then an `f64` (LE) if `NUM_ARG`. Branches carry a `u32` (LE) body offset.
//! Version 1 has no mode bits: `PUSH` is always followed by an `f64`.

use std::fmt;

use gdvm_core::format_value;

use super::constants::BRANCH_TARGET_SIZE;
use super::cursor::ByteReader;
use super::header::Version;
use super::opcode::{Mode, OpByte, Opcode};
use super::register::Register;

/// Errors raised while decoding instruction bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("undefined command {byte:#04x} at offset {offset}")]
    UndefinedCommand { byte: u8, offset: usize },
    #[error("invalid register index {index} at offset {offset}")]
    InvalidRegister { index: u8, offset: usize },
    #[error("unexpected end of bytecode at offset {offset}")]
    UnexpectedEnd { offset: usize },
}

/// PUSH/POP operand.
///
/// The value is `reg + imm` (missing parts count as zero); with `mem` set
/// that value is a memory index instead. No parts at all is POP's `void`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Operand {
    pub reg: Option<Register>,
    pub imm: Option<f64>,
    pub mem: bool,
}

impl Operand {
    pub const VOID: Self = Self {
        reg: None,
        imm: None,
        mem: false,
    };

    pub fn imm(value: f64) -> Self {
        Self {
            imm: Some(value),
            ..Self::VOID
        }
    }

    pub fn reg(reg: Register) -> Self {
        Self {
            reg: Some(reg),
            ..Self::VOID
        }
    }

    pub fn reg_imm(reg: Register, value: f64) -> Self {
        Self {
            reg: Some(reg),
            imm: Some(value),
            mem: false,
        }
    }

    /// Same parts, read through memory.
    pub fn memory(self) -> Self {
        Self { mem: true, ..self }
    }

    pub fn is_void(&self) -> bool {
        self.reg.is_none() && self.imm.is_none()
    }

    pub fn mode(&self) -> Mode {
        Mode {
            num: self.imm.is_some(),
            reg: self.reg.is_some(),
            mem: self.mem,
        }
    }

    fn encoded_size(&self) -> usize {
        let reg = if self.reg.is_some() { 1 } else { 0 };
        let imm = if self.imm.is_some() { 8 } else { 0 };
        reg + imm
    }

    fn valid_for(mode: Mode, opcode: Opcode) -> bool {
        let has_value = mode.num || mode.reg;
        match opcode {
            Opcode::Push => has_value,
            Opcode::Pop if mode.mem => has_value,
            Opcode::Pop => mode.is_empty() || (mode.reg && !mode.num),
            _ => mode.is_empty(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_void() {
            return f.write_str("void");
        }
        if self.mem {
            f.write_str("[")?;
        }
        match (self.reg, self.imm) {
            (Some(reg), Some(imm)) => write!(f, "{} + {}", reg, format_value(imm))?,
            (Some(reg), None) => write!(f, "{}", reg)?,
            (None, Some(imm)) => f.write_str(&format_value(imm))?,
            (None, None) => {}
        }
        if self.mem {
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Relational test of a conditional jump: `lhs <cond> rhs`, where `rhs`
/// is the first value popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Above,
    AboveOrEqual,
    Below,
    BelowOrEqual,
    Equal,
    NotEqual,
}

impl Condition {
    fn from_opcode(op: Opcode) -> Option<Self> {
        Some(match op {
            Opcode::Ja => Self::Above,
            Opcode::Jae => Self::AboveOrEqual,
            Opcode::Jb => Self::Below,
            Opcode::Jbe => Self::BelowOrEqual,
            Opcode::Je => Self::Equal,
            Opcode::Jne => Self::NotEqual,
            _ => return None,
        })
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Self::Above => Opcode::Ja,
            Self::AboveOrEqual => Opcode::Jae,
            Self::Below => Opcode::Jb,
            Self::BelowOrEqual => Opcode::Jbe,
            Self::Equal => Opcode::Je,
            Self::NotEqual => Opcode::Jne,
        }
    }

    /// Evaluate with tolerance `epsilon`: values closer than it are equal,
    /// otherwise they are strictly ordered.
    pub fn holds(self, lhs: f64, rhs: f64, epsilon: f64) -> bool {
        let eq = (lhs - rhs).abs() < epsilon;
        match self {
            Self::Above => !eq && lhs > rhs,
            Self::AboveOrEqual => eq || lhs > rhs,
            Self::Below => !eq && lhs < rhs,
            Self::BelowOrEqual => eq || lhs < rhs,
            Self::Equal => eq,
            Self::NotEqual => !eq,
        }
    }
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    Hlt,
    Push(Operand),
    Add,
    Sub,
    Mul,
    Div,
    Out,
    Pop(Operand),
    Call(u32),
    Ret,
    Jmp(u32),
    Sqrt,
    Branch(Condition, u32),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Hlt => Opcode::Hlt,
            Self::Push(_) => Opcode::Push,
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Out => Opcode::Out,
            Self::Pop(_) => Opcode::Pop,
            Self::Call(_) => Opcode::Call,
            Self::Ret => Opcode::Ret,
            Self::Jmp(_) => Opcode::Jmp,
            Self::Sqrt => Opcode::Sqrt,
            Self::Branch(cond, _) => cond.opcode(),
        }
    }

    /// Build an operand-less instruction from its opcode.
    pub fn simple(opcode: Opcode) -> Option<Self> {
        Some(match opcode {
            Opcode::Hlt => Self::Hlt,
            Opcode::Add => Self::Add,
            Opcode::Sub => Self::Sub,
            Opcode::Mul => Self::Mul,
            Opcode::Div => Self::Div,
            Opcode::Out => Self::Out,
            Opcode::Ret => Self::Ret,
            Opcode::Sqrt => Self::Sqrt,
            _ => return None,
        })
    }

    /// Build a branch/call instruction from its opcode.
    pub fn branch(opcode: Opcode, target: u32) -> Option<Self> {
        match opcode {
            Opcode::Jmp => Some(Self::Jmp(target)),
            Opcode::Call => Some(Self::Call(target)),
            _ => Condition::from_opcode(opcode).map(|cond| Self::Branch(cond, target)),
        }
    }

    pub fn target(&self) -> Option<u32> {
        match self {
            Self::Call(t) | Self::Jmp(t) | Self::Branch(_, t) => Some(*t),
            _ => None,
        }
    }

    /// Whether the instruction can be encoded in `version`.
    pub fn is_supported(&self, version: Version) -> bool {
        match (version, self) {
            (Version::V1, Self::Push(op)) => op.reg.is_none() && op.imm.is_some() && !op.mem,
            _ => self.opcode().is_supported(version),
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self, version: Version) -> usize {
        match (version, self) {
            (Version::V1, Self::Push(_)) => 1 + 8,
            (_, Self::Push(op) | Self::Pop(op)) => 1 + op.encoded_size(),
            _ if self.opcode().has_target() => 1 + BRANCH_TARGET_SIZE,
            _ => 1,
        }
    }

    /// Append the encoding to `out`.
    ///
    /// Callers check [`Instruction::is_supported`] first; version 1 keeps
    /// only the immediate of a PUSH operand.
    pub fn encode(&self, version: Version, out: &mut Vec<u8>) {
        debug_assert!(self.is_supported(version));

        if version == Version::V1 {
            out.push(self.opcode() as u8);
            if let Self::Push(op) = self {
                out.extend_from_slice(&op.imm.unwrap_or_default().to_le_bytes());
            }
            return;
        }

        match self {
            Self::Push(op) | Self::Pop(op) => {
                out.push(OpByte::with_mode(self.opcode(), op.mode()).to_byte());
                if let Some(reg) = op.reg {
                    out.push(reg.index());
                }
                if let Some(imm) = op.imm {
                    out.extend_from_slice(&imm.to_le_bytes());
                }
            }
            _ => {
                out.push(OpByte::new(self.opcode()).to_byte());
                if let Some(target) = self.target() {
                    out.extend_from_slice(&target.to_le_bytes());
                }
            }
        }
    }

    /// Decode one instruction at the reader's position.
    pub fn decode(reader: &mut ByteReader<'_>, version: Version) -> Result<Self, DecodeError> {
        match version {
            Version::V1 => Self::decode_v1(reader),
            Version::V2 => Self::decode_v2(reader),
        }
    }

    fn decode_v1(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let offset = reader.position();
        let byte = reader.read_u8()?;
        let opcode = Opcode::from_u8(byte)
            .filter(|op| op.is_supported(Version::V1))
            .ok_or(DecodeError::UndefinedCommand { byte, offset })?;

        if opcode == Opcode::Push {
            return Ok(Self::Push(Operand::imm(reader.read_f64()?)));
        }
        Self::simple(opcode).ok_or(DecodeError::UndefinedCommand { byte, offset })
    }

    fn decode_v2(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let offset = reader.position();
        let byte = reader.read_u8()?;
        let undefined = DecodeError::UndefinedCommand { byte, offset };
        let OpByte { opcode, mode } = OpByte::from_byte(byte).map_err(|_| undefined)?;

        if !Operand::valid_for(mode, opcode) {
            return Err(undefined);
        }

        if opcode.has_operand() {
            let reg = if mode.reg {
                let offset = reader.position();
                let index = reader.read_u8()?;
                let reg = Register::from_index(index)
                    .ok_or(DecodeError::InvalidRegister { index, offset })?;
                Some(reg)
            } else {
                None
            };
            let imm = if mode.num {
                Some(reader.read_f64()?)
            } else {
                None
            };
            let operand = Operand {
                reg,
                imm,
                mem: mode.mem,
            };
            return Ok(match opcode {
                Opcode::Push => Self::Push(operand),
                _ => Self::Pop(operand),
            });
        }

        if opcode.has_target() {
            let target = reader.read_u32()?;
            return Self::branch(opcode, target).ok_or(undefined);
        }

        Self::simple(opcode).ok_or(undefined)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match self {
            Self::Push(op) | Self::Pop(op) => write!(f, "{mnemonic} {op}"),
            _ => match self.target() {
                Some(target) => write!(f, "{mnemonic} @{target}"),
                None => f.write_str(mnemonic),
            },
        }
    }
}
