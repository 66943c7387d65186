//! Tracing infrastructure for debugging VM execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over [`Tracer`]. With `NoopTracer` every hook is an
//! `#[inline(always)]` empty function, so the calls and their arguments
//! compile away and the plain `execute` path carries no tracing state.
//!
//! `PrintTracer` collects one line per executed instruction plus indented
//! sub-lines for the effects of that instruction. The CLI prints the lines
//! after the run finishes, whether it succeeded or not.

use gdvm_bytecode::{Instruction, Program, Register};
use gdvm_core::{Colors, format_value, width_for_count};

use super::error::RuntimeError;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: instructions, branch decisions, call/return, output.
    #[default]
    Default,
    /// Verbose (-v): also every operand-stack push/pop and every store.
    Verbose,
    /// Very verbose (-vv): also the whole operand stack after each instruction.
    VeryVerbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_instruction` - after decoding, before executing
/// - `trace_push` / `trace_pop` - operand-stack traffic
/// - `trace_register` / `trace_memory` - after a store
/// - `trace_branch` - conditional jump decision
/// - `trace_call` / `trace_return` - call-stack traffic, with the new depth
/// - `trace_output` - value written by `out`
/// - `trace_stack` - after each instruction completes
/// - `trace_halt` - on `hlt` or at the end of the body
/// - `trace_error` - when execution stops with an error
pub trait Tracer {
    fn trace_instruction(&mut self, pc: usize, instr: &Instruction);

    fn trace_push(&mut self, value: f64);

    fn trace_pop(&mut self, value: f64);

    fn trace_register(&mut self, reg: Register, value: f64);

    fn trace_memory(&mut self, index: usize, value: f64);

    fn trace_branch(&mut self, target: u32, taken: bool);

    fn trace_call(&mut self, target: u32, depth: usize);

    fn trace_return(&mut self, target: u32, depth: usize);

    fn trace_output(&mut self, value: f64);

    fn trace_stack(&mut self, stack: &[f64]);

    fn trace_halt(&mut self, pc: usize);

    fn trace_error(&mut self, error: &RuntimeError);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _pc: usize, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_push(&mut self, _value: f64) {}

    #[inline(always)]
    fn trace_pop(&mut self, _value: f64) {}

    #[inline(always)]
    fn trace_register(&mut self, _reg: Register, _value: f64) {}

    #[inline(always)]
    fn trace_memory(&mut self, _index: usize, _value: f64) {}

    #[inline(always)]
    fn trace_branch(&mut self, _target: u32, _taken: bool) {}

    #[inline(always)]
    fn trace_call(&mut self, _target: u32, _depth: usize) {}

    #[inline(always)]
    fn trace_return(&mut self, _target: u32, _depth: usize) {}

    #[inline(always)]
    fn trace_output(&mut self, _value: f64) {}

    #[inline(always)]
    fn trace_stack(&mut self, _stack: &[f64]) {}

    #[inline(always)]
    fn trace_halt(&mut self, _pc: usize) {}

    #[inline(always)]
    fn trace_error(&mut self, _error: &RuntimeError) {}
}

/// Sub-line markers.
mod symbol {
    pub const PUSH: &str = "↑";
    pub const POP: &str = "↓";
    pub const STORE: &str = "←";
    pub const TAKEN: &str = "●";
    pub const NOT_TAKEN: &str = "○";
    pub const CALL: &str = "▶";
    pub const RETURN: &str = "◀";
    pub const OUTPUT: &str = "»";
    pub const STACK: &str = "≡";
    pub const HALT: &str = "■";
    pub const ERROR: &str = "✗";
}

/// Builder for [`PrintTracer`].
pub struct PrintTracerBuilder {
    body_len: usize,
    verbosity: Verbosity,
    colored: bool,
}

impl PrintTracerBuilder {
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn build(self) -> PrintTracer {
        PrintTracer {
            verbosity: self.verbosity,
            lines: Vec::new(),
            // the implicit halt happens at pc == body_len
            pc_width: width_for_count(self.body_len + 1),
            colors: Colors::new(self.colored),
        }
    }
}

/// Tracer that collects execution trace for debugging.
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    pc_width: usize,
    colors: Colors,
}

impl PrintTracer {
    pub fn builder(program: &Program) -> PrintTracerBuilder {
        PrintTracerBuilder {
            body_len: program.body().len(),
            verbosity: Verbosity::Default,
            colored: false,
        }
    }

    /// Collected trace lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn add_instruction(&mut self, pc: usize, instr: &Instruction) {
        let c = self.colors;
        let text = instr.to_string();
        let content = match text.split_once(' ') {
            Some((mnemonic, operand)) => format!("{}{}{} {}", c.blue, mnemonic, c.reset, operand),
            None => format!("{}{}{}", c.blue, text, c.reset),
        };
        self.lines.push(format!(
            "{}{:0w$}{}  {}",
            c.dim,
            pc,
            c.reset,
            content,
            w = self.pc_width
        ));
    }

    /// Blank pc column, then the marker and content.
    fn add_subline(&mut self, symbol: &str, content: &str) {
        let indent = self.pc_width + 2;
        self.lines.push(format!("{:indent$}{} {}", "", symbol, content));
    }

    fn value(&self, value: f64) -> String {
        let c = self.colors;
        format!("{}{}{}", c.green, format_value(value), c.reset)
    }

    fn verbose(&self) -> bool {
        self.verbosity != Verbosity::Default
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, pc: usize, instr: &Instruction) {
        self.add_instruction(pc, instr);
    }

    fn trace_push(&mut self, value: f64) {
        if self.verbose() {
            let content = self.value(value);
            self.add_subline(symbol::PUSH, &content);
        }
    }

    fn trace_pop(&mut self, value: f64) {
        if self.verbose() {
            let content = self.value(value);
            self.add_subline(symbol::POP, &content);
        }
    }

    fn trace_register(&mut self, reg: Register, value: f64) {
        if self.verbose() {
            let content = format!("{} = {}", reg, self.value(value));
            self.add_subline(symbol::STORE, &content);
        }
    }

    fn trace_memory(&mut self, index: usize, value: f64) {
        if self.verbose() {
            let content = format!("[{}] = {}", index, self.value(value));
            self.add_subline(symbol::STORE, &content);
        }
    }

    fn trace_branch(&mut self, target: u32, taken: bool) {
        let (symbol, content) = if taken {
            (symbol::TAKEN, format!("taken @{target}"))
        } else {
            (symbol::NOT_TAKEN, "not taken".to_string())
        };
        self.add_subline(symbol, &content);
    }

    fn trace_call(&mut self, target: u32, depth: usize) {
        let c = self.colors;
        let content = format!("@{target} {}depth {depth}{}", c.dim, c.reset);
        self.add_subline(symbol::CALL, &content);
    }

    fn trace_return(&mut self, target: u32, depth: usize) {
        let c = self.colors;
        let content = format!("@{target} {}depth {depth}{}", c.dim, c.reset);
        self.add_subline(symbol::RETURN, &content);
    }

    fn trace_output(&mut self, value: f64) {
        let content = self.value(value);
        self.add_subline(symbol::OUTPUT, &content);
    }

    fn trace_stack(&mut self, stack: &[f64]) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let values: Vec<String> = stack.iter().map(|&v| format_value(v)).collect();
        let c = self.colors;
        let content = format!("{}[{}]{}", c.dim, values.join(", "), c.reset);
        self.add_subline(symbol::STACK, &content);
    }

    fn trace_halt(&mut self, pc: usize) {
        let c = self.colors;
        let content = format!("halt {}at {pc}{}", c.dim, c.reset);
        self.add_subline(symbol::HALT, &content);
    }

    fn trace_error(&mut self, error: &RuntimeError) {
        let c = self.colors;
        let content = format!("{}{}{}", c.red, error, c.reset);
        self.add_subline(symbol::ERROR, &content);
    }
}
