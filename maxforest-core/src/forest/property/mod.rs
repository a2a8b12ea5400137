//! Property-based tests for maximum spanning forest computation.
//!
//! Checks the greedy forest against an exhaustive oracle on small graphs,
//! validates structural invariants (acyclicity, `n - c` edges, one tree per
//! component), confirms roots and ranks, and guards determinism across
//! repetitions, sort strategies, and edge orderings.

mod determinism;
mod ranking;
mod strategies;
mod structural;
mod types;
