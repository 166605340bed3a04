//! Tile shape: a power-of-two edge length and the masks derived from it.

use super::error::{TileError, TileResult};

/// Largest accepted shift. A 2^15 tile edge already spans a gigacell tile;
/// the cap keeps `2 * shift` and the tile area well inside `u32`.
pub const MAX_SHIFT: u32 = 15;

/// Square tile of `2^shift` x `2^shift` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileConfig {
    shift: u32,
    tile_area: u32,
    mask_mod: u32,
    mask_floor: u32,
}

impl Default for TileConfig {
    /// 8x8 tiles.
    fn default() -> Self {
        Self::from_valid_shift(3)
    }
}

impl TileConfig {
    pub fn new(shift: u32) -> TileResult<Self> {
        if shift == 0 || shift > MAX_SHIFT {
            return Err(TileError::InvalidShift {
                shift,
                max: MAX_SHIFT,
            });
        }
        Ok(Self::from_valid_shift(shift))
    }

    const fn from_valid_shift(shift: u32) -> Self {
        let edge = 1u32 << shift;
        let mask_mod = edge - 1;
        Self {
            shift,
            tile_area: edge * edge,
            mask_mod,
            mask_floor: !mask_mod,
        }
    }

    #[inline]
    pub const fn shift(&self) -> u32 {
        self.shift
    }

    /// Shift that converts an offset into an area index (`2 * shift`).
    #[inline]
    pub const fn area_shift(&self) -> u32 {
        self.shift + self.shift
    }

    #[inline]
    pub const fn tile_width(&self) -> u32 {
        1 << self.shift
    }

    #[inline]
    pub const fn tile_height(&self) -> u32 {
        1 << self.shift
    }

    #[inline]
    pub const fn tile_area(&self) -> u32 {
        self.tile_area
    }

    /// `tile_width - 1`; `v & mask_mod` is `v % tile_width`.
    #[inline]
    pub const fn mask_mod(&self) -> u32 {
        self.mask_mod
    }

    /// `!mask_mod`; `v & mask_floor` rounds `v` down to a tile boundary.
    #[inline]
    pub const fn mask_floor(&self) -> u32 {
        self.mask_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_masks_for_eight_by_eight() {
        let config = TileConfig::new(3).unwrap();
        assert_eq!(config.tile_width(), 8);
        assert_eq!(config.tile_height(), 8);
        assert_eq!(config.tile_area(), 64);
        assert_eq!(config.mask_mod(), 0b111);
        assert_eq!(config.mask_floor(), !0b111u32);
        assert_eq!(config.area_shift(), 6);
        assert_eq!(config, TileConfig::default());
    }

    #[test]
    fn sixteen_by_sixteen() {
        let config = TileConfig::new(4).unwrap();
        assert_eq!(config.tile_width(), 16);
        assert_eq!(config.tile_area(), 256);
        assert_eq!(config.mask_mod(), 15);
    }

    #[test]
    fn rejects_zero_and_oversized_shift() {
        assert_eq!(
            TileConfig::new(0),
            Err(TileError::InvalidShift {
                shift: 0,
                max: MAX_SHIFT
            })
        );
        assert!(TileConfig::new(MAX_SHIFT).is_ok());
        assert!(TileConfig::new(MAX_SHIFT + 1).is_err());
    }
}
