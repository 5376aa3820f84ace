//! Cache key builders.
//!
//! Keys are plain `planet/layer/z/x/y[?date]` strings. Backends decide how
//! to store them (the file backend hashes them, Redis prefixes them).

use planetiles_core::types::TileRequest;

/// Cache key for a resolved tile request.
pub fn tile(request: &TileRequest) -> String {
    let coord = request.coord;
    let mut key = format!(
        "{}/{}/{}/{}/{}",
        request.planet, request.layer, coord.z, coord.x, coord.y
    );
    if let Some(date) = request.date_string() {
        key.push_str("?date=");
        key.push_str(&date);
    }
    key
}
