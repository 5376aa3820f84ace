//! Tile addressing.

use chrono::NaiveDate;

use crate::error::AppError;
use crate::result::AppResult;

/// Highest zoom level accepted; `2^z` must stay well inside `u32`.
pub const MAX_ZOOM: u32 = 30;

const INVALID_COORDINATES: &str = "Invalid tile coordinates supplied";
const OUTSIDE_GRID: &str = "Tile outside the tile grid";

/// A validated slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level.
    pub z: u32,
    /// Column.
    pub x: u32,
    /// Row, counted from the north.
    pub y: u32,
}

impl TileCoord {
    /// Builds a coordinate. Zooms above [`MAX_ZOOM`] are invalid; columns
    /// or rows outside the `2^z` grid are out of bounds.
    pub fn new(z: u32, x: u32, y: u32) -> AppResult<Self> {
        if z > MAX_ZOOM {
            return Err(AppError::validation(INVALID_COORDINATES));
        }
        let coord = Self { z, x, y };
        let n = coord.tiles_per_axis();
        if u64::from(x) >= n || u64::from(y) >= n {
            return Err(AppError::out_of_bounds(OUTSIDE_GRID));
        }
        Ok(coord)
    }

    /// Parses raw path segments. Anything that is not a non-negative
    /// integer is rejected.
    pub fn parse(z: &str, x: &str, y: &str) -> AppResult<Self> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| AppError::validation(INVALID_COORDINATES))
        };
        Self::new(parse(z)?, parse(x)?, parse(y)?)
    }

    /// Number of tiles along one axis at this zoom (`2^z`).
    pub fn tiles_per_axis(&self) -> u64 {
        1u64 << self.z
    }
}

/// A tile request after catalog resolution and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    /// Planet id.
    pub planet: String,
    /// Resolved layer id (after default-layer fallback).
    pub layer: String,
    /// Tile address.
    pub coord: TileCoord,
    /// Optional acquisition date for time-dimensioned layers.
    pub date: Option<NaiveDate>,
}

impl TileRequest {
    /// Parses a `YYYY-MM-DD` date query value.
    pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::validation("Invalid date supplied"))
    }

    /// The date formatted for upstream protocols.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}
