pub mod asm;
pub mod check;
pub mod dump;
pub mod exec;
pub mod run;
pub mod run_common;
pub mod trace;

#[cfg(test)]
mod run_common_tests;
