//! Tiled address space: maps `(x, y)` onto storage so each tile occupies one
//! contiguous block, with tiles laid out row-major across the tile grid.
//!
//! ```text
//!        /- tile_width -\
//!   ........########........########........   \
//!   ........########........########........    tile_height
//!   ........########........########........   /
//!   ########........########........########
//!   ########...P....########........########
//!   ########........########........########
//! ```
//!
//! With power-of-two tiles every divide and modulo in
//! `tile_row * areas_width * tile_area + tile_col * tile_area + local_y * tile_width + local_x`
//! turns into a shift or a mask.
//!
//! The plain operations are unchecked: coordinates outside the grid alias onto
//! some other in-range-looking offset instead of failing. The `try_*` variants
//! validate first.

use super::config::TileConfig;
use super::error::{TileError, TileResult};

/// A grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Immutable translator between coordinates and storage offsets.
///
/// Holds no mutable state; one instance can address any number of buffers of
/// `size()` cells and may be shared freely across threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TiledAddressSpace {
    config: TileConfig,
    areas_width: u32,
    areas_height: u32,
    width: u32,
    height: u32,
    size: usize,
}

impl TiledAddressSpace {
    /// Build an address space of `areas_width` x `areas_height` tiles.
    pub fn new(config: TileConfig, areas_width: u32, areas_height: u32) -> TileResult<Self> {
        if areas_width == 0 || areas_height == 0 {
            return Err(TileError::EmptyGrid {
                areas_width,
                areas_height,
            });
        }
        let overflow = TileError::Overflow {
            areas_width,
            areas_height,
        };
        let scale = |areas: u32| u32::try_from(u64::from(areas) << config.shift()).ok();
        let (Some(width), Some(height)) = (scale(areas_width), scale(areas_height)) else {
            return Err(overflow);
        };
        let size = (width as usize).checked_mul(height as usize).ok_or(overflow)?;

        Ok(Self {
            config,
            areas_width,
            areas_height,
            width,
            height,
            size,
        })
    }

    /// Build an address space covering exactly `width` x `height` cells.
    /// Both dimensions must be whole multiples of the tile edge.
    pub fn for_dimensions(config: TileConfig, width: u32, height: u32) -> TileResult<Self> {
        let mask_mod = config.mask_mod();
        if width & mask_mod != 0 || height & mask_mod != 0 {
            return Err(TileError::RaggedGrid {
                width,
                height,
                tile: config.tile_width(),
            });
        }
        Self::new(config, width >> config.shift(), height >> config.shift())
    }

    #[inline]
    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    #[inline]
    pub fn areas_width(&self) -> u32 {
        self.areas_width
    }

    #[inline]
    pub fn areas_height(&self) -> u32 {
        self.areas_height
    }

    /// Number of tiles in the grid.
    #[inline]
    pub fn area_count(&self) -> usize {
        self.areas_width as usize * self.areas_height as usize
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells a backing buffer must hold.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Storage offset of `(x, y)`. Unchecked.
    #[inline(always)]
    pub fn coord_to_offset(&self, x: u32, y: u32) -> usize {
        let shift = self.config.shift();
        let mask_mod = self.config.mask_mod();
        let mask_floor = self.config.mask_floor();
        let tile_rows_before = ((y & mask_floor) as usize) << shift;
        let tile_cols_before = ((x & mask_floor) as usize) << shift;
        let local_row = ((y & mask_mod) as usize) << shift;
        let local_col = (x & mask_mod) as usize;
        tile_rows_before
            .wrapping_mul(self.areas_width as usize)
            .wrapping_add(tile_cols_before)
            .wrapping_add(local_row)
            .wrapping_add(local_col)
    }

    #[inline(always)]
    pub fn offset_of(&self, coord: Coord) -> usize {
        self.coord_to_offset(coord.x, coord.y)
    }

    /// Coordinate stored at `offset`. Unchecked.
    #[inline(always)]
    pub fn offset_to_coord(&self, offset: usize) -> Coord {
        let shift = self.config.shift();
        let mask_mod = self.config.mask_mod() as usize;
        let area = self.area_for_offset(offset);
        let local_x = offset & mask_mod;
        let local_y = (offset & (self.config.tile_area() as usize - 1)) >> shift;
        let areas_width = self.areas_width as usize;
        let tile_row = area / areas_width;
        let tile_col = area % areas_width;
        Coord {
            x: (local_x + (tile_col << shift)) as u32,
            y: (local_y + (tile_row << shift)) as u32,
        }
    }

    /// Base offset of the storage block holding tile `area`.
    #[inline(always)]
    pub fn offset_for_area(&self, area: usize) -> usize {
        area << self.config.area_shift()
    }

    /// Tile index owning `offset`.
    #[inline(always)]
    pub fn area_for_offset(&self, offset: usize) -> usize {
        offset >> self.config.area_shift()
    }

    /// Top-left coordinate of tile `area`. Unchecked.
    #[inline]
    pub fn area_origin(&self, area: usize) -> Coord {
        self.offset_to_coord(self.offset_for_area(area))
    }

    pub fn try_coord_to_offset(&self, x: u32, y: u32) -> TileResult<usize> {
        if !self.contains(x, y) {
            return Err(TileError::CoordOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.coord_to_offset(x, y))
    }

    pub fn try_offset_to_coord(&self, offset: usize) -> TileResult<Coord> {
        if offset >= self.size {
            return Err(TileError::OffsetOutOfRange {
                offset,
                size: self.size,
            });
        }
        Ok(self.offset_to_coord(offset))
    }

    pub fn try_offset_for_area(&self, area: usize) -> TileResult<usize> {
        let count = self.area_count();
        if area >= count {
            return Err(TileError::AreaOutOfRange { area, count });
        }
        Ok(self.offset_for_area(area))
    }
}
