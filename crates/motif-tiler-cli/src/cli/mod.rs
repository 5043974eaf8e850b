//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `fill` - Tile a motif over the shapes of an SVG
//! - `params` - Print the effective pattern parameters
//! - `benchmark` - Benchmark fill generation performance

pub mod benchmark;
pub mod common;
pub mod fill;
pub mod params;

pub use benchmark::{BenchmarkArgs, cmd_benchmark};
pub use common::PatternArgs;
pub use fill::{FillArgs, cmd_fill};
pub use params::cmd_params;
