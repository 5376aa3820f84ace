//! Request DTOs.

use chrono::NaiveDate;
use serde::Deserialize;

use planetiles_core::result::AppResult;
use planetiles_core::types::TileRequest;

/// Path segments of `/api/tiles/{planet}/{layer}/{z}/{x}/{y}`.
///
/// Coordinates stay strings here so that malformed values produce the
/// tile-specific validation error rather than a generic path rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct TilePath {
    pub planet: String,
    pub layer: String,
    pub z: String,
    pub x: String,
    pub y: String,
}

/// Query string of a tile request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileQuery {
    /// Acquisition date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

impl TileQuery {
    /// Parsed date; a blank value counts as absent.
    pub fn date(&self) -> AppResult<Option<NaiveDate>> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => TileRequest::parse_date(raw).map(Some),
        }
    }
}
