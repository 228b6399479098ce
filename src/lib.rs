//! # Sliding Puzzle Search
//!
//! Search engine for the square sliding-tile puzzle (8-puzzle, 15-puzzle and
//! larger). Given a scrambled board it finds a short sequence of blank moves
//! that restores the goal order, or reports that its step budget ran out.
//!
//! ## Modules
//! - `puzzle`: `Board` and `Move`, board construction, solvability and
//!   move application.
//! - `codec`: canonical board encodings and the visited-set key.
//! - `heuristics`: Manhattan, linear conflict and corner estimators plus the
//!   named catalog.
//! - `heap`: the binary min-heap driving best-first expansion.
//! - `solver`: bounded A*-style search.
//! - `benchmark`: runs every catalog heuristic on one board and times it.
//! - `config`: TOML-backed solver settings.

pub mod benchmark;
pub mod codec;
pub mod config;
pub mod error;
pub mod heap;
pub mod heuristics;
pub mod puzzle;
pub mod solver;

pub use config::{ReversalPolicy, SolverConfig};
pub use error::{BoardError, ConfigError};
pub use puzzle::{Board, Move};
pub use solver::{solve, solve_with_heuristic, HeuristicSolveResult};
