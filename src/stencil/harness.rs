//! Correctness and locality harness for the tiled layout.
//!
//! Two checks run here. The round-trip check pushes sample coordinates through
//! `coord_to_offset` and back. The comparison runs the same stencil over a
//! tiled and a row-major buffer seeded with the same logical field; only the
//! addressing differs, so both trajectories must match bit for bit.

use std::time::Duration;

use serde::Serialize;

use super::buffer::{Cell, seed_double_buffer};
use super::kernel::{Neighborhood, StencilParams, run_stencil_benchmark, step};
use crate::tiled::{Addressing, Coord, LinearAddressSpace, TiledAddressSpace};

/// Upper bound for seeded cell values.
pub const SEED_MAX_VALUE: Cell = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    pub passed: usize,
    pub tested: usize,
}

impl RoundTripReport {
    pub fn failed(&self) -> usize {
        self.tested - self.passed
    }

    pub fn failed_percent(&self) -> f64 {
        if self.tested == 0 {
            return 0.0;
        }
        self.failed() as f64 / self.tested as f64 * 100.0
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.tested
    }
}

/// Count coordinates that survive `offset_to_coord(coord_to_offset(c))`.
/// Mismatches are logged, never fatal.
#[tracing::instrument(skip_all, fields(samples = coords.len()))]
pub fn run_round_trip_check(space: &TiledAddressSpace, coords: &[Coord]) -> RoundTripReport {
    let mut report = RoundTripReport::default();
    for &coord in coords {
        report.tested += 1;
        let offset = space.offset_of(coord);
        let back = space.offset_to_coord(offset);
        if back == coord {
            report.passed += 1;
        } else {
            tracing::debug!(?coord, offset, ?back, "round trip mismatch");
        }
    }
    report
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonReport {
    pub grid_elapsed: Duration,
    pub linear_elapsed: Duration,
    /// Cells whose final values differ between the two layouts.
    pub mismatched_cells: usize,
    /// Generations compared cell by cell in the untimed lockstep pass.
    /// Zero when only the final fields were compared.
    pub generations_checked: u32,
    /// First generation (1-based) at which the layouts diverged.
    pub first_mismatch_generation: Option<u32>,
}

impl ComparisonReport {
    /// `grid / linear` elapsed time.
    pub fn ratio(&self) -> f64 {
        let linear = self.linear_elapsed.as_secs_f64();
        if linear == 0.0 {
            return f64::NAN;
        }
        self.grid_elapsed.as_secs_f64() / linear
    }

    pub fn equivalent(&self) -> bool {
        self.mismatched_cells == 0 && self.first_mismatch_generation.is_none()
    }
}

/// Number of logical cells whose bit patterns differ between the layouts.
pub fn count_mismatches(
    space: &TiledAddressSpace,
    tiled: &[Cell],
    linear_space: &LinearAddressSpace,
    linear: &[Cell],
) -> usize {
    let mut mismatches = 0;
    for y in 0..space.height() {
        for x in 0..space.width() {
            let a = tiled[space.coord_to_offset(x, y)];
            let b = linear[linear_space.offset(x, y)];
            if a.to_bits() != b.to_bits() {
                mismatches += 1;
            }
        }
    }
    mismatches
}

/// Step both layouts one generation at a time and return the first
/// generation after which they differ.
pub fn first_divergence(
    space: &TiledAddressSpace,
    params: &StencilParams,
    seed: u64,
) -> Option<u32> {
    let linear_space = LinearAddressSpace::matching(space);
    let mut tiled = seed_double_buffer(space, seed, SEED_MAX_VALUE);
    let mut linear = seed_double_buffer(&linear_space, seed, SEED_MAX_VALUE);
    for generation in 1..=params.repetitions {
        let (source, target) = tiled.current_and_next_mut();
        step(space, source, target, params);
        tiled.swap();
        let (source, target) = linear.current_and_next_mut();
        step(&linear_space, source, target, params);
        linear.swap();
        if count_mismatches(space, tiled.current(), &linear_space, linear.current()) != 0 {
            return Some(generation);
        }
    }
    None
}

/// Time the stencil over tiled and row-major storage from the same seed,
/// then compare the layouts after every generation in an untimed pass.
pub fn compare_addressing(
    space: &TiledAddressSpace,
    params: &StencilParams,
    seed: u64,
) -> ComparisonReport {
    compare_addressing_with(space, params, seed, true)
}

/// [`compare_addressing`] with the per-generation pass optional. With
/// `per_generation` off only the final fields are compared.
#[tracing::instrument(
    skip(space, params),
    fields(width = space.width(), height = space.height())
)]
pub fn compare_addressing_with(
    space: &TiledAddressSpace,
    params: &StencilParams,
    seed: u64,
    per_generation: bool,
) -> ComparisonReport {
    let linear_space = LinearAddressSpace::matching(space);

    let mut tiled = seed_double_buffer(space, seed, SEED_MAX_VALUE);
    let grid_elapsed = run_stencil_benchmark(space, &mut tiled, params);

    let mut linear = seed_double_buffer(&linear_space, seed, SEED_MAX_VALUE);
    let linear_elapsed = run_stencil_benchmark(&linear_space, &mut linear, params);

    let mismatched_cells =
        count_mismatches(space, tiled.current(), &linear_space, linear.current());
    let (generations_checked, first_mismatch_generation) = if per_generation {
        (params.repetitions, first_divergence(space, params, seed))
    } else {
        (0, None)
    };
    if mismatched_cells != 0 || first_mismatch_generation.is_some() {
        tracing::warn!(
            mismatched_cells,
            ?first_mismatch_generation,
            "tiled and linear runs diverged"
        );
    }

    ComparisonReport {
        grid_elapsed,
        linear_elapsed,
        mismatched_cells,
        generations_checked,
        first_mismatch_generation,
    }
}

/// Everything one harness invocation measured.
#[derive(Clone, Debug, Serialize)]
pub struct HarnessReport {
    pub shift: u32,
    pub width: u32,
    pub height: u32,
    pub areas_width: u32,
    pub areas_height: u32,
    pub border: u32,
    pub repetitions: u32,
    pub neighborhood: Neighborhood,
    pub seed: u64,
    pub round_trip: RoundTripReport,
    pub round_trip_failed_percent: f64,
    pub grid_ms: f64,
    pub linear_ms: f64,
    pub ratio: f64,
    pub mismatched_cells: usize,
    pub generations_checked: u32,
    pub first_mismatch_generation: Option<u32>,
}

impl HarnessReport {
    pub fn new(
        space: &TiledAddressSpace,
        params: &StencilParams,
        seed: u64,
        round_trip: RoundTripReport,
        comparison: &ComparisonReport,
    ) -> Self {
        Self {
            shift: space.config().shift(),
            width: space.width(),
            height: space.height(),
            areas_width: space.areas_width(),
            areas_height: space.areas_height(),
            border: params.border,
            repetitions: params.repetitions,
            neighborhood: params.neighborhood,
            seed,
            round_trip,
            round_trip_failed_percent: round_trip.failed_percent(),
            grid_ms: comparison.grid_elapsed.as_secs_f64() * 1000.0,
            linear_ms: comparison.linear_elapsed.as_secs_f64() * 1000.0,
            ratio: comparison.ratio(),
            mismatched_cells: comparison.mismatched_cells,
            generations_checked: comparison.generations_checked,
            first_mismatch_generation: comparison.first_mismatch_generation,
        }
    }
}
