//! Coordinate sets fed to the round-trip check.

use rand::{Rng, SeedableRng};

use crate::tiled::{Coord, TiledAddressSpace};

/// Origin, tile-boundary and just-past-boundary points for 8x8 tiles.
/// Valid for any grid of at least 2x2 areas at shift 3.
pub const EDGE_COORDINATES: [Coord; 11] = [
    Coord::new(0, 0),
    Coord::new(1, 0),
    Coord::new(0, 1),
    Coord::new(7, 7),
    Coord::new(8, 0),
    Coord::new(0, 8),
    Coord::new(1, 8),
    Coord::new(8, 8),
    Coord::new(9, 0),
    Coord::new(0, 9),
    Coord::new(9, 9),
];

/// Every tile corner plus the far corner of the grid.
pub fn tile_corner_coordinates(space: &TiledAddressSpace) -> Vec<Coord> {
    let mask_mod = space.config().mask_mod();
    let mut out = Vec::with_capacity(space.area_count() * 4 + 1);
    for area in 0..space.area_count() {
        let origin = space.area_origin(area);
        out.push(origin);
        out.push(Coord::new(origin.x + mask_mod, origin.y));
        out.push(Coord::new(origin.x, origin.y + mask_mod));
        out.push(Coord::new(origin.x + mask_mod, origin.y + mask_mod));
    }
    out.push(Coord::new(space.width() - 1, space.height() - 1));
    out
}

pub fn random_coordinates(space: &TiledAddressSpace, count: usize, seed: u64) -> Vec<Coord> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Coord::new(
                rng.random_range(0..space.width()),
                rng.random_range(0..space.height()),
            )
        })
        .collect()
}

pub fn exhaustive_coordinates(space: &TiledAddressSpace) -> Vec<Coord> {
    let mut out = Vec::with_capacity(space.size());
    for x in 0..space.width() {
        for y in 0..space.height() {
            out.push(Coord::new(x, y));
        }
    }
    out
}

/// Edge points inside the grid, tile corners, `random_count` random points,
/// and a full sweep when the grid holds at most `exhaustive_limit` cells.
pub fn sample_coordinates(
    space: &TiledAddressSpace,
    random_count: usize,
    seed: u64,
    exhaustive_limit: usize,
) -> Vec<Coord> {
    let mut out: Vec<Coord> = EDGE_COORDINATES
        .iter()
        .copied()
        .filter(|c| space.contains(c.x, c.y))
        .collect();
    out.extend(tile_corner_coordinates(space));
    out.extend(random_coordinates(space, random_count, seed));
    if space.size() <= exhaustive_limit {
        out.extend(exhaustive_coordinates(space));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiled::TileConfig;

    fn space() -> TiledAddressSpace {
        TiledAddressSpace::new(TileConfig::new(3).unwrap(), 7, 3).unwrap()
    }

    #[test]
    fn random_coordinates_stay_in_bounds_and_repeat_per_seed() {
        let space = space();
        let a = random_coordinates(&space, 500, 0xA1);
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|c| space.contains(c.x, c.y)));
        assert_eq!(a, random_coordinates(&space, 500, 0xA1));
    }

    #[test]
    fn corners_cover_every_tile() {
        let space = space();
        let corners = tile_corner_coordinates(&space);
        assert_eq!(corners.len(), 21 * 4 + 1);
        assert!(corners.contains(&Coord::new(55, 23)));
        assert!(corners.contains(&Coord::new(15, 8)));
    }

    #[test]
    fn exhaustive_only_below_limit() {
        let space = space();
        let small = sample_coordinates(&space, 10, 1, space.size());
        assert_eq!(small.len(), 11 + 85 + 10 + 1344);
        let large = sample_coordinates(&space, 10, 1, 0);
        assert_eq!(large.len(), 11 + 85 + 10);
    }
}
