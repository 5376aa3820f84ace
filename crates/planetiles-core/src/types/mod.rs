//! Domain types shared by the cache, upstream and API crates.

pub mod entry;
pub mod layer;
pub mod response;
pub mod tile;

pub use entry::CacheEntry;
pub use layer::{
    ArcgisImageLayer, GibsLayer, IiifInfo, IiifLayer, IiifTileSpec, LayerConfig, LayerEntry,
    Protocol, ResolvedLayer,
};
pub use response::ErrorEnvelope;
pub use tile::{MAX_ZOOM, TileCoord, TileRequest};
