//! Tile dispatch: catalog resolution, cache lookup, upstream fetch and
//! streaming cache write-back.

pub mod tee;
pub mod tile;

pub use tile::{TileOutcome, TileService};
