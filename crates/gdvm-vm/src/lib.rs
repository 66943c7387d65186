//! Runtime VM for executing gdvm bytecode.
//!
//! This crate provides the stack machine that runs a validated
//! [`gdvm_bytecode::Program`], writing `OUT` values to any `io::Write` sink.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    CallStack, EPSILON, FuelLimits, Memory, NoopTracer, PrintTracer, Registers, RuntimeError,
    Tracer, VM, VMBuilder, Verbosity,
};
