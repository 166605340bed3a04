//! Ping-pong cell storage for the stencil kernel.

use rand::{Rng, SeedableRng};

use crate::tiled::Addressing;

pub type Cell = f32;

/// Two equally sized cell buffers plus a phase bit selecting the current one.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    cells: [Vec<Cell>; 2],
    phase: u8,
}

impl DoubleBuffer {
    pub fn zeroed(size: usize) -> Self {
        Self {
            cells: [vec![0.0; size], vec![0.0; size]],
            phase: 0,
        }
    }

    /// Both halves start as copies of `cells`.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells: [cells.clone(), cells],
            phase: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells[0].is_empty()
    }

    #[inline]
    pub fn current(&self) -> &[Cell] {
        &self.cells[self.phase as usize]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[self.phase as usize]
    }

    #[inline]
    pub fn current_and_next_mut(&mut self) -> (&[Cell], &mut [Cell]) {
        let (a, b) = self.cells.split_at_mut(1);
        if self.phase == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    #[inline]
    pub fn swap(&mut self) {
        self.phase ^= 1;
    }
}

/// Fill a buffer for `addressing` with values in `[0, max_value)`.
///
/// Values are drawn in row-major coordinate order and stored through
/// `addressing`, so two layouts seeded alike hold the same logical field.
pub fn seed_double_buffer<A: Addressing>(
    addressing: &A,
    seed: u64,
    max_value: Cell,
) -> DoubleBuffer {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut cells = vec![0.0; addressing.size()];
    for y in 0..addressing.height() {
        for x in 0..addressing.width() {
            cells[addressing.offset(x, y)] = rng.random_range(0.0..max_value);
        }
    }
    DoubleBuffer::from_cells(cells)
}
