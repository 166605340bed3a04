//! Row-major baseline and the addressing seam shared with the tiled layout.

use super::error::{TileError, TileResult};
use super::space::TiledAddressSpace;

/// Resolves a grid coordinate to a storage index.
///
/// The stencil kernel is generic over this so tiled and row-major runs
/// execute the same arithmetic in the same order.
pub trait Addressing {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn size(&self) -> usize;
    fn offset(&self, x: u32, y: u32) -> usize;
}

impl Addressing for TiledAddressSpace {
    #[inline]
    fn width(&self) -> u32 {
        TiledAddressSpace::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        TiledAddressSpace::height(self)
    }

    #[inline]
    fn size(&self) -> usize {
        TiledAddressSpace::size(self)
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize {
        self.coord_to_offset(x, y)
    }
}

/// Plain `y * width + x` addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearAddressSpace {
    width: u32,
    height: u32,
}

impl LinearAddressSpace {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Row-major space with the same extent as `space`.
    pub fn matching(space: &TiledAddressSpace) -> Self {
        Self::new(space.width(), space.height())
    }
}

impl Addressing for LinearAddressSpace {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn check_len(expected: usize, actual: usize) -> TileResult<()> {
    if expected != actual {
        return Err(TileError::BufferSize { expected, actual });
    }
    Ok(())
}

/// Copy a tiled buffer into row-major order, e.g. before a texture upload.
pub fn linearize<T: Copy>(space: &TiledAddressSpace, tiled: &[T], out: &mut [T]) -> TileResult<()> {
    check_len(space.size(), tiled.len())?;
    check_len(space.size(), out.len())?;
    let width = space.width() as usize;
    for (y, row) in out.chunks_exact_mut(width).enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = tiled[space.coord_to_offset(x as u32, y as u32)];
        }
    }
    Ok(())
}

/// Inverse of [`linearize`]: scatter a row-major buffer into tiled order.
pub fn delinearize<T: Copy>(
    space: &TiledAddressSpace,
    row_major: &[T],
    out: &mut [T],
) -> TileResult<()> {
    check_len(space.size(), row_major.len())?;
    check_len(space.size(), out.len())?;
    let width = space.width() as usize;
    for (y, row) in row_major.chunks_exact(width).enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            out[space.coord_to_offset(x as u32, y as u32)] = cell;
        }
    }
    Ok(())
}
