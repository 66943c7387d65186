//! Register file and memory array.

use gdvm_bytecode::{ADDRESS_REGISTERS, Register, VALUE_REGISTERS};

/// Both register banks, zeroed at start.
///
/// Address registers hold integers: a stored value is truncated toward zero,
/// saturating at the `i64` bounds (NaN becomes 0).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registers {
    address: [i64; ADDRESS_REGISTERS],
    value: [f64; VALUE_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a register as an operand value. `None` for a slot outside the banks.
    pub fn get(&self, reg: Register) -> Option<f64> {
        match reg {
            Register::Address(i) => self.address.get(i as usize).map(|&v| v as f64),
            Register::Value(i) => self.value.get(i as usize).copied(),
        }
    }

    /// Store `value`. Returns `false` for a slot outside the banks.
    #[must_use]
    pub fn set(&mut self, reg: Register, value: f64) -> bool {
        match reg {
            Register::Address(i) => match self.address.get_mut(i as usize) {
                Some(slot) => {
                    *slot = value as i64;
                    true
                }
                None => false,
            },
            Register::Value(i) => match self.value.get_mut(i as usize) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
        }
    }
}

/// Flat array of `f64` cells, zeroed at start.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    cells: Vec<f64>,
}

impl Memory {
    pub const DEFAULT_SIZE: usize = 4096;

    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0.0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell index for a computed operand value.
    ///
    /// The value must be finite; it is truncated toward zero and must then
    /// lie in `0..len`.
    pub fn slot(&self, index: f64) -> Option<usize> {
        if !index.is_finite() {
            return None;
        }
        let index = index.trunc();
        if index < 0.0 || index >= self.cells.len() as f64 {
            return None;
        }
        Some(index as usize)
    }

    pub fn load(&self, index: f64) -> Option<f64> {
        self.slot(index).map(|i| self.cells[i])
    }

    /// Write `value`, returning the cell index written.
    pub fn store(&mut self, index: f64, value: f64) -> Option<usize> {
        let slot = self.slot(index)?;
        self.cells[slot] = value;
        Some(slot)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
