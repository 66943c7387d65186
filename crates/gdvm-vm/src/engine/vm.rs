//! Virtual machine for executing gdvm bytecode.

use std::io::Write;

use gdvm_bytecode::{Instruction, Operand, Program};
use gdvm_core::format_value;

use super::error::RuntimeError;
use super::frame::{CallStack, Frame};
use super::state::{Memory, Registers};
use super::trace::{NoopTracer, Tracer};

/// Tolerance for the zero test of `div`, the sign test of `sqrt` and the
/// equality test of conditional jumps.
pub const EPSILON: f64 = 1e-6;

/// Runtime limits for program execution.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum executed instructions (default: unlimited).
    pub(crate) exec_fuel: Option<u64>,
    /// Maximum call depth (default: 65,536).
    pub(crate) recursion_limit: usize,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_limit: 65_536,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u64> {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> usize {
        self.recursion_limit
    }
}

/// Builder for VM instances.
#[derive(Clone, Debug)]
pub struct VMBuilder {
    memory_size: usize,
    limits: FuelLimits,
}

impl Default for VMBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VMBuilder {
    /// Create a new VM builder.
    pub fn new() -> Self {
        Self {
            memory_size: Memory::DEFAULT_SIZE,
            limits: FuelLimits::default(),
        }
    }

    /// Number of memory cells (default: 4096).
    pub fn memory_size(mut self, cells: usize) -> Self {
        self.memory_size = cells;
        self
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    /// Build the VM.
    pub fn build(self) -> VM {
        VM {
            pc: 0,
            stack: Vec::new(),
            registers: Registers::new(),
            memory: Memory::new(self.memory_size),
            calls: CallStack::new(self.limits.recursion_limit),
            exec_fuel: self.limits.exec_fuel,
            steps: 0,
            limits: self.limits,
        }
    }
}

/// Where execution continues after one instruction.
enum Flow {
    Next(usize),
    Halt,
}

/// Virtual machine state for program execution.
///
/// Every run starts from a zeroed machine. The state left by the last run
/// (successful or not) stays readable through the accessors.
pub struct VM {
    /// Body offset of the current instruction.
    pc: usize,
    stack: Vec<f64>,
    registers: Registers,
    memory: Memory,
    calls: CallStack,

    // Fuel tracking
    exec_fuel: Option<u64>,
    steps: u64,
    limits: FuelLimits,
}

impl VM {
    /// Create a VM builder.
    pub fn builder() -> VMBuilder {
        VMBuilder::new()
    }

    /// Execute `program`, writing `out` values to `out`.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn execute<W: Write>(
        &mut self,
        program: &Program,
        out: &mut W,
    ) -> Result<(), RuntimeError> {
        self.execute_with(program, out, &mut NoopTracer)
    }

    /// Execute with a tracer for debugging.
    ///
    /// The tracer is generic, so `NoopTracer` calls are optimized away
    /// while `PrintTracer` calls collect execution trace.
    pub fn execute_with<W: Write, T: Tracer>(
        &mut self,
        program: &Program,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        self.reset();
        let result = self.run(program, out, tracer);
        if let Err(e) = &result {
            tracer.trace_error(e);
        }
        result
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Operand stack, bottom first.
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    /// Instructions executed by the last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn reset(&mut self) {
        self.pc = 0;
        self.stack.clear();
        self.registers = Registers::new();
        self.memory = Memory::new(self.memory.len());
        self.calls.clear();
        self.exec_fuel = self.limits.exec_fuel;
        self.steps = 0;
    }

    fn run<W: Write, T: Tracer>(
        &mut self,
        program: &Program,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let len = program.body().len();

        loop {
            // Falling off the end is an implicit `hlt`.
            if self.pc == len {
                tracer.trace_halt(self.pc);
                return Ok(());
            }

            self.consume_fuel()?;

            let (instr, next) = program.decode_at(self.pc)?;
            tracer.trace_instruction(self.pc, &instr);
            self.steps += 1;

            let flow = self.exec(instr, next, len, out, tracer)?;
            tracer.trace_stack(&self.stack);

            match flow {
                Flow::Next(pc) => self.pc = pc,
                Flow::Halt => {
                    tracer.trace_halt(self.pc);
                    return Ok(());
                }
            }
        }
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        let Some(remaining) = self.exec_fuel.as_mut() else {
            return Ok(());
        };
        if *remaining == 0 {
            let limit = self.limits.exec_fuel.unwrap_or_default();
            return Err(RuntimeError::ExecFuelExhausted(limit));
        }
        *remaining -= 1;
        Ok(())
    }

    fn exec<W: Write, T: Tracer>(
        &mut self,
        instr: Instruction,
        next: usize,
        len: usize,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        let pc = self.pc;
        match instr {
            Instruction::Hlt => return Ok(Flow::Halt),
            Instruction::Push(op) => self.exec_push(op, tracer)?,
            Instruction::Pop(op) => self.exec_pop(op, tracer)?,
            Instruction::Add | Instruction::Sub | Instruction::Mul | Instruction::Div => {
                self.exec_arith(instr, tracer)?
            }
            Instruction::Sqrt => {
                let a = self.pop(tracer)?;
                if a < -EPSILON {
                    return Err(RuntimeError::NegativeSqrtArgument { value: a, pc });
                }
                self.push(a.max(0.0).sqrt(), tracer);
            }
            Instruction::Out => {
                let value = *self
                    .stack
                    .last()
                    .ok_or(RuntimeError::EmptyOperandStack { pc })?;
                writeln!(out, "{}", format_value(value))?;
                tracer.trace_output(value);
            }
            Instruction::Jmp(target) => return self.jump(target, len),
            Instruction::Branch(cond, target) => {
                let a = self.pop(tracer)?;
                let b = self.pop(tracer)?;
                let taken = cond.holds(b, a, EPSILON);
                tracer.trace_branch(target, taken);
                if taken {
                    return self.jump(target, len);
                }
            }
            Instruction::Call(target) => {
                let flow = self.jump(target, len)?;
                let frame = Frame {
                    return_addr: next as u32,
                };
                if !self.calls.push(frame) {
                    return Err(RuntimeError::RecursionLimitExceeded(self.calls.limit()));
                }
                tracer.trace_call(target, self.calls.depth());
                return Ok(flow);
            }
            Instruction::Ret => {
                let frame = self
                    .calls
                    .pop()
                    .ok_or(RuntimeError::EmptyCallStack { pc })?;
                tracer.trace_return(frame.return_addr, self.calls.depth());
                return Ok(Flow::Next(frame.return_addr as usize));
            }
        }
        Ok(Flow::Next(next))
    }

    fn exec_push<T: Tracer>(&mut self, op: Operand, tracer: &mut T) -> Result<(), RuntimeError> {
        let mut value = self.operand_value(op)?;
        if op.mem {
            value = self
                .memory
                .load(value)
                .ok_or_else(|| self.out_of_bounds(value))?;
        }
        self.push(value, tracer);
        Ok(())
    }

    fn exec_pop<T: Tracer>(&mut self, op: Operand, tracer: &mut T) -> Result<(), RuntimeError> {
        let pc = self.pc;
        match op {
            Operand { mem: true, .. } => {
                let index = self.operand_value(op)?;
                let value = self.pop(tracer)?;
                let slot = self
                    .memory
                    .store(index, value)
                    .ok_or_else(|| self.out_of_bounds(index))?;
                tracer.trace_memory(slot, value);
            }
            Operand { reg: Some(reg), .. } => {
                let value = self.pop(tracer)?;
                if !self.registers.set(reg, value) {
                    return Err(RuntimeError::InvalidRegister {
                        index: reg.index(),
                        pc,
                    });
                }
                let stored = self.registers.get(reg).unwrap_or(value);
                tracer.trace_register(reg, stored);
            }
            // void
            _ => {
                self.pop(tracer)?;
            }
        }
        Ok(())
    }

    fn exec_arith<T: Tracer>(
        &mut self,
        instr: Instruction,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let a = self.pop(tracer)?;
        let b = self.pop(tracer)?;
        let result = match instr {
            Instruction::Add => b + a,
            Instruction::Sub => b - a,
            Instruction::Mul => b * a,
            _ => {
                if a.abs() < EPSILON {
                    return Err(RuntimeError::ZeroDivision { pc: self.pc });
                }
                b / a
            }
        };
        self.push(result, tracer);
        Ok(())
    }

    /// `reg + imm`, missing parts counting as zero.
    fn operand_value(&self, op: Operand) -> Result<f64, RuntimeError> {
        let base = match op.reg {
            Some(reg) => self
                .registers
                .get(reg)
                .ok_or(RuntimeError::InvalidRegister {
                    index: reg.index(),
                    pc: self.pc,
                })?,
            None => 0.0,
        };
        Ok(base + op.imm.unwrap_or(0.0))
    }

    fn out_of_bounds(&self, index: f64) -> RuntimeError {
        RuntimeError::MemoryOutOfBounds {
            index,
            size: self.memory.len(),
            pc: self.pc,
        }
    }

    fn jump(&self, target: u32, len: usize) -> Result<Flow, RuntimeError> {
        let offset = target as usize;
        if offset > len {
            return Err(RuntimeError::InvalidJumpTarget {
                target,
                len,
                pc: self.pc,
            });
        }
        Ok(Flow::Next(offset))
    }

    fn push<T: Tracer>(&mut self, value: f64, tracer: &mut T) {
        self.stack.push(value);
        tracer.trace_push(value);
    }

    fn pop<T: Tracer>(&mut self, tracer: &mut T) -> Result<f64, RuntimeError> {
        let value = self
            .stack
            .pop()
            .ok_or(RuntimeError::EmptyOperandStack { pc: self.pc })?;
        tracer.trace_pop(value);
        Ok(value)
    }
}
