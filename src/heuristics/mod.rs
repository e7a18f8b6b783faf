//! Heuristics module for the Euclidean TSP.
//!
//! This module exports the tour construction heuristics.

pub mod construction;

pub use construction::*;
