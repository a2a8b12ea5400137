//! Support library for the `maxforest` binary.
//!
//! Exposes the command pipeline and logging setup so tests and doctests can
//! drive them without spawning a subprocess.

pub mod cli;
pub mod logging;
