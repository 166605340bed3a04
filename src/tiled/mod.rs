//! Tile configuration and the coordinate/offset translators.

mod config;
mod error;
mod linear;
mod space;

pub use config::{MAX_SHIFT, TileConfig};
pub use error::{TileError, TileResult};
pub use linear::{Addressing, LinearAddressSpace, delinearize, linearize};
pub use space::{Coord, TiledAddressSpace};
