//! Destination grid synthesis
//!
//! The destination is a regular 1-degree latitude/longitude grid. Corner
//! boundaries are synthesized directly on integer degrees (0..=360 east,
//! -90..=90 north) with centers at half-degree offsets; the mask comes from
//! the post-processed static file's `wet` fraction with missing values
//! treated as land.

use crate::errors::Result;
use crate::grid::{fill_missing, RegularGrid};
use crate::source::{read_2d, read_fill_value};
use ndarray::Array1;
use std::path::Path;

/// Longitude cells in the 1-degree grid
pub const NLON: usize = 360;
/// Latitude cells in the 1-degree grid
pub const NLAT: usize = 180;

/// Synthesize the 1-degree corner and center coordinate vectors.
///
/// Corners span 0..=360 (361 points) and -90..=90 (181 points); centers sit
/// at the half-degree midpoints.
pub fn one_degree_coords() -> (Array1<f64>, Array1<f64>, Array1<f64>, Array1<f64>) {
    let lon_b = Array1::from_iter((0..=NLON).map(|i| i as f64));
    let lat_b = Array1::from_iter((0..=NLAT).map(|j| j as f64 - 90.0));
    let lon = Array1::from_iter((0..NLON).map(|i| i as f64 + 0.5));
    let lat = Array1::from_iter((0..NLAT).map(|j| j as f64 - 89.5));
    (lon, lat, lon_b, lat_b)
}

/// Assemble the destination [`RegularGrid`] from the post-processed static
/// file.
pub fn open_destination_grid(ppstatic_path: &Path) -> Result<RegularGrid> {
    let ppstatic = netcdf::open(ppstatic_path)?;

    let mut wet = read_2d(&ppstatic, "wet")?;
    fill_missing(&mut wet.data, read_fill_value(&ppstatic, "wet"));

    let (lon, lat, lon_b, lat_b) = one_degree_coords();
    let grid = RegularGrid {
        lon,
        lat,
        lon_b,
        lat_b,
        mask: wet.data,
    };
    grid.validate()?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_corners_span_the_globe() {
        let (lon, lat, lon_b, lat_b) = one_degree_coords();
        assert_eq!(lon_b.len(), 361);
        assert_eq!(lat_b.len(), 181);
        assert_eq!(lon_b[0], 0.0);
        assert_eq!(lon_b[360], 360.0);
        assert_eq!(lat_b[0], -90.0);
        assert_eq!(lat_b[180], 90.0);
        assert_eq!(lon.len(), 360);
        assert_eq!(lat.len(), 180);
        assert_eq!(lon[0], 0.5);
        assert_eq!(lat[0], -89.5);
    }
}
