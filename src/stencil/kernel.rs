//! Neighborhood-averaging (blur/diffusion) stencil.
//!
//! Each interior cell is pulled toward the mean of its neighborhood:
//! `next = cell + (mean - cell) * damping`. Cells closer than `border` to an
//! edge are never written, so they keep whatever the buffer held.

use std::time::{Duration, Instant};

use super::buffer::{Cell, DoubleBuffer};
use crate::tiled::Addressing;

/// Blend coefficient used when none is given.
pub const DEFAULT_DAMPING: Cell = 0.2;

/// Which cells feed the mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// Full `(2 * border + 1)^2` square centered on the cell.
    #[default]
    Square,
    /// The four orthogonal cells at distance `border`.
    Cross,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StencilParams {
    pub border: u32,
    pub repetitions: u32,
    pub damping: Cell,
    pub neighborhood: Neighborhood,
}

impl Default for StencilParams {
    fn default() -> Self {
        Self {
            border: 1,
            repetitions: 100,
            damping: DEFAULT_DAMPING,
            neighborhood: Neighborhood::Square,
        }
    }
}

impl StencilParams {
    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn damping(mut self, damping: Cell) -> Self {
        self.damping = damping;
        self
    }

    pub fn neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }
}

#[inline(always)]
fn square_mean<A: Addressing>(
    addressing: &A,
    source: &[Cell],
    x: u32,
    y: u32,
    border: u32,
) -> Cell {
    let mut sum: Cell = 0.0;
    for by in (y - border)..=(y + border) {
        for bx in (x - border)..=(x + border) {
            sum += source[addressing.offset(bx, by)];
        }
    }
    let side = 2 * u64::from(border) + 1;
    sum / (side * side) as Cell
}

#[inline(always)]
fn cross_mean<A: Addressing>(
    addressing: &A,
    source: &[Cell],
    x: u32,
    y: u32,
    border: u32,
) -> Cell {
    (source[addressing.offset(x - border, y)]
        + source[addressing.offset(x + border, y)]
        + source[addressing.offset(x, y - border)]
        + source[addressing.offset(x, y + border)])
        / 4.0
}

/// Advance one generation from `source` into `target`.
///
/// Both slices must hold `addressing.size()` cells. A grid with no cell at
/// least `border` away from every edge is left as is.
pub fn step<A: Addressing>(
    addressing: &A,
    source: &[Cell],
    target: &mut [Cell],
    params: &StencilParams,
) {
    let border = params.border;
    let (width, height) = (addressing.width(), addressing.height());
    let span = 2 * u64::from(border);
    if u64::from(width) <= span || u64::from(height) <= span {
        return;
    }
    for y in border..height - border {
        for x in border..width - border {
            let index = addressing.offset(x, y);
            let mean = match params.neighborhood {
                Neighborhood::Square => square_mean(addressing, source, x, y, border),
                Neighborhood::Cross => cross_mean(addressing, source, x, y, border),
            };
            let cell = source[index];
            target[index] = cell + (mean - cell) * params.damping;
        }
    }
}

/// Run `params.repetitions` generations, swapping buffer roles after each.
/// Returns the wall-clock time spent in the generations.
#[tracing::instrument(
    skip_all,
    fields(
        width = addressing.width(),
        height = addressing.height(),
        border = params.border,
        repetitions = params.repetitions,
    )
)]
pub fn run_stencil_benchmark<A: Addressing>(
    addressing: &A,
    buffer: &mut DoubleBuffer,
    params: &StencilParams,
) -> Duration {
    debug_assert_eq!(buffer.len(), addressing.size());
    let start = Instant::now();
    for _ in 0..params.repetitions {
        let (source, target) = buffer.current_and_next_mut();
        step(addressing, source, target, params);
        buffer.swap();
    }
    let elapsed = start.elapsed();
    tracing::debug!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "stencil run finished");
    elapsed
}
