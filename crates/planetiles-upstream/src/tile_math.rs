//! Web Mercator tile geometry.
//!
//! Tiles follow the slippy-map convention: `2^z` tiles per axis, `x` grows
//! east from -180°, `y` grows south from the northern Mercator limit.

use std::f64::consts::PI;

use planetiles_core::types::TileCoord;

/// Geographic bounding box in EPSG:4326 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Western edge.
    pub lon_min: f64,
    /// Southern edge.
    pub lat_min: f64,
    /// Eastern edge.
    pub lon_max: f64,
    /// Northern edge.
    pub lat_max: f64,
}

impl BBox {
    /// Renders the box as `lonMin,latMin,lonMax,latMax`.
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{},{},{}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }
}

/// Pixel region of a IIIF source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IiifRegion {
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

/// Longitude of the western edge of column `x`.
fn tile_x_to_lon(x: f64, n: f64) -> f64 {
    x / n * 360.0 - 180.0
}

/// Latitude of the northern edge of row `y`.
fn tile_y_to_lat(y: f64, n: f64) -> f64 {
    let merc = PI * (1.0 - 2.0 * y / n);
    merc.sinh().atan().to_degrees()
}

/// WGS84 bounds of a Web Mercator tile.
pub fn tile_to_bbox_4326(coord: TileCoord) -> BBox {
    let n = coord.tiles_per_axis() as f64;
    let x = f64::from(coord.x);
    let y = f64::from(coord.y);

    BBox {
        lon_min: tile_x_to_lon(x, n),
        lat_min: tile_y_to_lat(y + 1.0, n),
        lon_max: tile_x_to_lon(x + 1.0, n),
        lat_max: tile_y_to_lat(y, n),
    }
}

/// Maps a tile onto a region of a `width` x `height` image.
///
/// The image is split into a `2^z` grid of cells `ceil(width / 2^z)` by
/// `ceil(height / 2^z)` pixels; cells on the right and bottom edges are
/// clamped to the image. Returns `None` when the clamped region is empty,
/// which happens for tiles past the image edge at deep zooms.
pub fn xyz_to_iiif_region(coord: TileCoord, width: u64, height: u64) -> Option<IiifRegion> {
    let n = coord.tiles_per_axis();
    let cell_w = width.div_ceil(n);
    let cell_h = height.div_ceil(n);

    let x = (u64::from(coord.x).saturating_mul(cell_w)).min(width);
    let y = (u64::from(coord.y).saturating_mul(cell_h)).min(height);
    let w = cell_w.min(width - x);
    let h = cell_h.min(height - y);

    if w == 0 || h == 0 {
        return None;
    }
    Some(IiifRegion {
        x,
        y,
        width: w,
        height: h,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;
    const MERCATOR_LIMIT: f64 = 85.051_128_779_806_59;

    fn coord(z: u32, x: u32, y: u32) -> TileCoord {
        TileCoord::new(z, x, y).unwrap()
    }

    #[test]
    fn test_zoom_zero_spans_the_world() {
        let bbox = tile_to_bbox_4326(coord(0, 0, 0));
        assert!((bbox.lon_min + 180.0).abs() < EPSILON);
        assert!((bbox.lon_max - 180.0).abs() < EPSILON);
        assert!((bbox.lat_max - MERCATOR_LIMIT).abs() < 1e-6);
        assert!((bbox.lat_min + MERCATOR_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_two_column_one_row_one() {
        let bbox = tile_to_bbox_4326(coord(2, 1, 1));
        assert_eq!(bbox.lon_min, -90.0);
        assert_eq!(bbox.lon_max, 0.0);
        assert!(bbox.lat_min.abs() < EPSILON);
        assert!(bbox.lat_max > 66.5 && bbox.lat_max < 66.6);
        assert!(bbox.to_query_value().starts_with("-90,"));
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        for z in 0..6u32 {
            let n = 1u32 << z;
            for x in 0..n {
                for y in 0..n {
                    let bbox = tile_to_bbox_4326(coord(z, x, y));
                    assert!(bbox.lon_min < bbox.lon_max);
                    assert!(bbox.lat_min < bbox.lat_max);
                    if x + 1 < n {
                        let east = tile_to_bbox_4326(coord(z, x + 1, y));
                        assert!((bbox.lon_max - east.lon_min).abs() < EPSILON);
                    }
                    if y + 1 < n {
                        let south = tile_to_bbox_4326(coord(z, x, y + 1));
                        assert!((bbox.lat_min - south.lat_max).abs() < EPSILON);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zoom_zero_region_is_full_image() {
        let region = xyz_to_iiif_region(coord(0, 0, 0), 6000, 4000).unwrap();
        assert_eq!(
            region,
            IiifRegion {
                x: 0,
                y: 0,
                width: 6000,
                height: 4000
            }
        );
    }

    #[test]
    fn test_region_widths_partition_the_image() {
        let (width, height) = (1001u64, 777u64);
        for z in 0..6u32 {
            let n = 1u32 << z;
            let row_width: u64 = (0..n)
                .filter_map(|x| xyz_to_iiif_region(coord(z, x, 0), width, height))
                .map(|r| r.width)
                .sum();
            let column_height: u64 = (0..n)
                .filter_map(|y| xyz_to_iiif_region(coord(z, 0, y), width, height))
                .map(|r| r.height)
                .sum();
            assert!(row_width.abs_diff(width) <= u64::from(n));
            assert!(column_height.abs_diff(height) <= u64::from(n));
        }
    }

    #[test]
    fn test_regions_stay_inside_the_image() {
        let (width, height) = (300u64, 200u64);
        let z = 4u32;
        for x in 0..16 {
            for y in 0..16 {
                if let Some(r) = xyz_to_iiif_region(coord(z, x, y), width, height) {
                    assert!(r.x + r.width <= width);
                    assert!(r.y + r.height <= height);
                }
            }
        }
    }

    #[test]
    fn test_region_past_the_edge_is_none() {
        // 10px image at z=4: cells are 1px wide, columns 10..15 fall outside.
        assert!(xyz_to_iiif_region(coord(4, 9, 0), 10, 10).is_some());
        assert!(xyz_to_iiif_region(coord(4, 10, 0), 10, 10).is_none());
        assert!(xyz_to_iiif_region(coord(4, 0, 15), 10, 10).is_none());
    }
}
