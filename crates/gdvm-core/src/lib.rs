#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers used by every gdvm crate.
//!
//! - [`Colors`]: ANSI palette for listings, traces and diagnostics
//! - [`utils`]: value and column formatting shared by the disassembler,
//!   the tracer and the `OUT` instruction

mod colors;
pub mod utils;


pub use colors::Colors;
pub use utils::{format_value, width_for_count};
