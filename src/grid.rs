//! Grid value types and the pure array derivations behind them
//!
//! A MOM6 supergrid stores coordinates at twice the model resolution: odd
//! indices are cell centers and even indices are cell corners. This module
//! provides the subsampling helpers that recover centers and corners from a
//! supergrid array, the missing-value fill used for wet-fraction masks, and
//! the shape checks a conservative remapping needs before it will accept a
//! grid.

use crate::errors::{Fre2EsmfError, Result};
use ndarray::{s, Array1, Array2};

/// A curvilinear grid with center and corner coordinates, cell areas, and a
/// wet mask. Corner arrays are one point larger than center arrays along
/// each axis.
#[derive(Debug, Clone)]
pub struct CurvilinearGrid {
    /// Cell-center longitudes, degrees east, shape `(ny, nx)`
    pub lon: Array2<f64>,
    /// Cell-center latitudes, degrees north, shape `(ny, nx)`
    pub lat: Array2<f64>,
    /// Cell-corner longitudes, shape `(ny + 1, nx + 1)`
    pub lon_b: Array2<f64>,
    /// Cell-corner latitudes, shape `(ny + 1, nx + 1)`
    pub lat_b: Array2<f64>,
    /// Cell areas, shape `(ny, nx)`
    pub area: Array2<f64>,
    /// Wet mask, 1 for ocean and 0 for land, shape `(ny, nx)`
    pub mask: Array2<f64>,
}

impl CurvilinearGrid {
    /// Number of cells as `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        self.lon.dim()
    }

    /// Check the pairing constraints between center, corner, area, and mask
    /// arrays.
    pub fn validate(&self) -> Result<()> {
        let (ny, nx) = self.lon.dim();
        check_shape("lat centers", &self.lat, (ny, nx))?;
        check_shape("lon corners", &self.lon_b, (ny + 1, nx + 1))?;
        check_shape("lat corners", &self.lat_b, (ny + 1, nx + 1))?;
        check_shape("cell areas", &self.area, (ny, nx))?;
        check_shape("wet mask", &self.mask, (ny, nx))?;
        Ok(())
    }
}

/// A regular latitude/longitude grid described by 1-D coordinate vectors and
/// a 2-D wet mask.
#[derive(Debug, Clone)]
pub struct RegularGrid {
    /// Cell-center longitudes, length `nx`
    pub lon: Array1<f64>,
    /// Cell-center latitudes, length `ny`
    pub lat: Array1<f64>,
    /// Cell-corner longitudes, length `nx + 1`, monotonic
    pub lon_b: Array1<f64>,
    /// Cell-corner latitudes, length `ny + 1`, monotonic
    pub lat_b: Array1<f64>,
    /// Wet mask, shape `(ny, nx)`
    pub mask: Array2<f64>,
}

impl RegularGrid {
    /// Number of cells as `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Check corner/center pairing and corner monotonicity.
    pub fn validate(&self) -> Result<()> {
        let (ny, nx) = self.shape();
        if self.lon_b.len() != nx + 1 {
            return Err(Fre2EsmfError::ShapeMismatch {
                what: "lon corners".to_string(),
                expected: vec![nx + 1],
                found: vec![self.lon_b.len()],
            });
        }
        if self.lat_b.len() != ny + 1 {
            return Err(Fre2EsmfError::ShapeMismatch {
                what: "lat corners".to_string(),
                expected: vec![ny + 1],
                found: vec![self.lat_b.len()],
            });
        }
        check_shape("wet mask", &self.mask, (ny, nx))?;
        check_monotonic("lon", &self.lon_b)?;
        check_monotonic("lat", &self.lat_b)?;
        Ok(())
    }
}

/// A 2-D array bundled with its dimension labels.
///
/// NetCDF variables carry dimension names alongside their data; renaming
/// those labels (for example `yh`/`xh` to the supergrid-derived labels) must
/// leave the data untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArray {
    pub dims: [String; 2],
    pub data: Array2<f64>,
}

impl NamedArray {
    pub fn new(dims: [&str; 2], data: Array2<f64>) -> Self {
        Self {
            dims: [dims[0].to_string(), dims[1].to_string()],
            data,
        }
    }

    /// Rename dimension labels according to `(from, to)` pairs. Every `from`
    /// label must be present; data values are not touched.
    pub fn rename_dims(mut self, renames: &[(&str, &str)]) -> Result<Self> {
        for (from, to) in renames {
            let slot = self
                .dims
                .iter_mut()
                .find(|d| d.as_str() == *from)
                .ok_or_else(|| Fre2EsmfError::UnknownDimension {
                    dim: (*from).to_string(),
                })?;
            *slot = (*to).to_string();
        }
        Ok(self)
    }
}

/// Extract cell centers from a supergrid array by taking every other element
/// starting at index 1 along both axes. A `(2n + 1, 2m + 1)` supergrid
/// yields an `(n, m)` center array.
pub fn subsample_centers(supergrid: &Array2<f64>) -> Array2<f64> {
    supergrid.slice(s![1..;2, 1..;2]).to_owned()
}

/// Extract cell corners from a supergrid array by taking every other element
/// starting at index 0 along both axes. A `(2n + 1, 2m + 1)` supergrid
/// yields an `(n + 1, m + 1)` corner array.
pub fn subsample_corners(supergrid: &Array2<f64>) -> Array2<f64> {
    supergrid.slice(s![0..;2, 0..;2]).to_owned()
}

/// Replace missing entries of a wet-fraction field with 0 (land). An entry
/// is missing when it is NaN or equals the file's `_FillValue`.
pub fn fill_missing(field: &mut Array2<f64>, fill_value: Option<f64>) {
    field.mapv_inplace(|v| {
        let is_fill = fill_value.map_or(false, |fv| v == fv);
        if v.is_nan() || is_fill {
            0.0
        } else {
            v
        }
    });
}

fn check_shape(what: &str, arr: &Array2<f64>, expected: (usize, usize)) -> Result<()> {
    if arr.dim() != expected {
        return Err(Fre2EsmfError::ShapeMismatch {
            what: what.to_string(),
            expected: vec![expected.0, expected.1],
            found: arr.shape().to_vec(),
        });
    }
    Ok(())
}

fn check_monotonic(axis: &str, corners: &Array1<f64>) -> Result<()> {
    let increasing = corners.windows(2).into_iter().all(|w| w[1] > w[0]);
    let decreasing = corners.windows(2).into_iter().all(|w| w[1] < w[0]);
    if !increasing && !decreasing {
        return Err(Fre2EsmfError::NonMonotonicCorners {
            axis: axis.to_string(),
        });
    }
    Ok(())
}
