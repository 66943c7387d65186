//! Bytecode format shared by the gdvm assembler and interpreter.
//!
//! This crate contains:
//! - File layout (`Header`, `Version`, `Program`)
//! - Opcode byte packing (`Opcode`, `Mode`, `OpByte`)
//! - The register table (`Register`)
//! - Typed instructions with their encoder/decoder (`Instruction`, `Operand`)
//! - A checked cursor over raw bytes (`ByteReader`)
//! - A human-readable disassembler (`dump`)

mod constants;
mod cursor;
mod dump;
mod header;
mod instruction;
mod opcode;
mod program;
mod register;

#[cfg(test)]
mod cursor_tests;
#[cfg(test)]
mod opcode_tests;
#[cfg(test)]
mod program_tests;
#[cfg(test)]
mod register_tests;

pub use constants::{
    ADDRESS_REGISTERS, BRANCH_TARGET_SIZE, HEADER_SIZE, MAGIC, MEM_ARG, NUM_ARG, OPCODE_MASK,
    REG_ARG, VALUE_REGISTERS, VERSION,
};
pub use cursor::ByteReader;
pub use dump::dump;
pub use header::{Header, Version};
pub use instruction::{Condition, DecodeError, Instruction, Operand};
pub use opcode::{Mode, OpByte, Opcode};
pub use program::{Instructions, Program, ProgramError};
pub use register::Register;
