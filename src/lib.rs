//! Tiled 2D address translation with power-of-two tiles, plus the stencil
//! harness that checks it against plain row-major storage.

pub mod stencil;
pub mod tiled;
pub use stencil::{StencilParams, compare_addressing, run_round_trip_check, run_stencil_benchmark};
pub use tiled::{Addressing, Coord, LinearAddressSpace, TileConfig, TileError, TiledAddressSpace};
