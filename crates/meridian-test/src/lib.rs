//! Meridian Test Harness - Randomized and scripted validation
//!
//! This crate provides:
//! - A graph fuzzer driving the engine with random request sequences
//!   and checking the structural invariants after every step
//! - A scripted scenario bed exercising the end-to-end flows
//!   (rendezvous, republish, garbage collection, re-matching)

pub mod graph_fuzzer;
pub mod scenarios;

pub use graph_fuzzer::*;
pub use scenarios::*;
