//! Stencil kernel and the benchmark/correctness harness built on it.

mod buffer;
mod harness;
mod kernel;
mod sampling;

pub use buffer::{Cell, DoubleBuffer, seed_double_buffer};
pub use harness::{
    ComparisonReport, HarnessReport, RoundTripReport, SEED_MAX_VALUE, compare_addressing,
    compare_addressing_with, count_mismatches, first_divergence, run_round_trip_check,
};
pub use kernel::{DEFAULT_DAMPING, Neighborhood, StencilParams, run_stencil_benchmark, step};
pub use sampling::{
    EDGE_COORDINATES, exhaustive_coordinates, random_coordinates, sample_coordinates,
    tile_corner_coordinates,
};
