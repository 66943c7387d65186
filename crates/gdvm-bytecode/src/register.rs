//! Register file layout.
//!
//! One index space (1..=8) covers both banks. Index 0 is reserved.

use std::fmt;

/// A register named in an operand.
///
/// Address registers hold integers and are the only ones allowed inside a
/// memory reference. Value registers hold operand-stack values.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Register {
    Address(u8),
    Value(u8),
}

/// Encoded index `i` lives at `REGISTERS[i - 1]`.
const REGISTERS: [(&str, Register); 8] = [
    ("rax", Register::Address(0)),
    ("rbx", Register::Address(1)),
    ("rcx", Register::Address(2)),
    ("rdx", Register::Address(3)),
    ("rex", Register::Value(0)),
    ("rfx", Register::Value(1)),
    ("rgx", Register::Value(2)),
    ("rhx", Register::Value(3)),
];

impl Register {
    /// Decode a register index byte.
    pub fn from_index(index: u8) -> Option<Self> {
        let slot = (index as usize).checked_sub(1)?;
        REGISTERS.get(slot).map(|&(_, reg)| reg)
    }

    /// Exact, case-sensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, reg)| reg)
    }

    /// Encoded index byte; 0 for a slot outside the table.
    pub fn index(self) -> u8 {
        REGISTERS
            .iter()
            .position(|&(_, reg)| reg == self)
            .map_or(0, |slot| slot as u8 + 1)
    }

    pub fn name(self) -> &'static str {
        REGISTERS
            .iter()
            .find(|&&(_, reg)| reg == self)
            .map_or("r??", |&(name, _)| name)
    }

    pub fn is_address(self) -> bool {
        matches!(self, Self::Address(_))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
