//! Execution engine.
//!
//! The VM fetches one instruction at a time through the checked decoder,
//! so malformed bytecode surfaces as a `RuntimeError` at the offending pc.

mod error;
mod frame;
mod state;
mod trace;
mod vm;


pub use error::RuntimeError;
pub use frame::{CallStack, Frame};
pub use state::{Memory, Registers};
pub use trace::{NoopTracer, PrintTracer, PrintTracerBuilder, Tracer, Verbosity};
pub use vm::{EPSILON, FuelLimits, VM, VMBuilder};
