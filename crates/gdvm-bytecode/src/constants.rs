//! Bytecode format constants.

/// Magic bytes identifying a gdvm bytecode file.
pub const MAGIC: [u8; 2] = *b"GD";

/// Current bytecode format version (registers, memory, branches).
pub const VERSION: u8 = 2;

/// Header size in bytes: magic (2) + version (1) + body length (u64 LE).
pub const HEADER_SIZE: usize = 11;

/// Low bits of the opcode byte selecting the operation.
pub const OPCODE_MASK: u8 = 0x1F;

/// An immediate `f64` follows the opcode byte.
pub const NUM_ARG: u8 = 1 << 5;

/// A register index byte follows the opcode byte.
pub const REG_ARG: u8 = 1 << 6;

/// The operand addresses a memory cell.
pub const MEM_ARG: u8 = 1 << 7;

/// Size of an encoded branch/call target (body offset, u32 LE).
pub const BRANCH_TARGET_SIZE: usize = 4;

/// Number of address (integer) registers: `rax`..`rdx`.
pub const ADDRESS_REGISTERS: usize = 4;

/// Number of value (`f64`) registers: `rex`..`rhx`.
pub const VALUE_REGISTERS: usize = 4;
