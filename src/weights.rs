//! Conservative-normed regridding weight generation
//!
//! Builds a sparse mapping from destination cells to contributing source
//! cells. Each source cell is bounded by its four corner coordinates and
//! intersected with the rectangular destination cells; the overlap area on
//! the sphere uses the exact `dlon * dsin(lat)` element, so area-weighted
//! totals are preserved. Weights into a destination cell are normalized by
//! the total unmasked overlap, making each destination value a masked
//! area-weighted average of its source cells. Longitude handling is
//! periodic: source cells may sit anywhere within one wrap of the
//! destination domain.
//!
//! The computation is parallelized over source grid rows with Rayon.

use crate::errors::{Fre2EsmfError, Result};
use crate::grid::{CurvilinearGrid, RegularGrid};
use ndarray::Array2;
use rayon::prelude::*;

/// Sparse regridding weights in triplet form.
///
/// `row` holds flat destination indices, `col` flat source indices (both
/// 0-based, row-major), and `s` the contribution fraction of that source
/// cell to that destination cell.
#[derive(Debug, Clone)]
pub struct RegridWeights {
    pub src_shape: (usize, usize),
    pub dst_shape: (usize, usize),
    pub row: Vec<usize>,
    pub col: Vec<usize>,
    pub s: Vec<f64>,
}

impl RegridWeights {
    /// Number of stored weights
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Apply the weights to a source field, producing the destination
    /// field. Destination cells with no weights (land, or no overlap) are
    /// left at 0.
    pub fn apply(&self, field: &Array2<f64>) -> Result<Array2<f64>> {
        if field.dim() != self.src_shape {
            return Err(Fre2EsmfError::ShapeMismatch {
                what: "source field".to_string(),
                expected: vec![self.src_shape.0, self.src_shape.1],
                found: field.shape().to_vec(),
            });
        }
        let flat = field
            .as_slice()
            .ok_or_else(|| Fre2EsmfError::WeightError("source field not contiguous".to_string()))?;

        let mut out = vec![0.0; self.dst_shape.0 * self.dst_shape.1];
        for ((&r, &c), &w) in self.row.iter().zip(&self.col).zip(&self.s) {
            out[r] += w * flat[c];
        }
        Ok(Array2::from_shape_vec(self.dst_shape, out)?)
    }
}

/// Longitude/latitude bounding box of one source cell, with corner
/// longitudes unwrapped to a common branch.
#[derive(Debug, Clone, Copy)]
struct CellBounds {
    lon_lo: f64,
    lon_hi: f64,
    lat_lo: f64,
    lat_hi: f64,
}

fn cell_bounds(src: &CurvilinearGrid, j: usize, i: usize) -> CellBounds {
    let lats = [
        src.lat_b[[j, i]],
        src.lat_b[[j, i + 1]],
        src.lat_b[[j + 1, i]],
        src.lat_b[[j + 1, i + 1]],
    ];
    let reference = src.lon_b[[j, i]];
    let lons = [
        reference,
        unwrap_lon(src.lon_b[[j, i + 1]], reference),
        unwrap_lon(src.lon_b[[j + 1, i]], reference),
        unwrap_lon(src.lon_b[[j + 1, i + 1]], reference),
    ];

    CellBounds {
        lon_lo: lons.iter().cloned().fold(f64::INFINITY, f64::min),
        lon_hi: lons.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        lat_lo: lats.iter().cloned().fold(f64::INFINITY, f64::min).max(-90.0),
        lat_hi: lats.iter().cloned().fold(f64::NEG_INFINITY, f64::max).min(90.0),
    }
}

/// Shift `lon` by whole turns until it lies within half a turn of
/// `reference`.
fn unwrap_lon(mut lon: f64, reference: f64) -> f64 {
    while lon - reference > 180.0 {
        lon -= 360.0;
    }
    while reference - lon > 180.0 {
        lon += 360.0;
    }
    lon
}

/// Overlap areas between one source cell and the destination cells it
/// touches, appended to `out` as `(dst_index, area)`.
fn overlaps_for_cell(
    bounds: &CellBounds,
    lon_b: &[f64],
    lat_b: &[f64],
    sin_lat_b: &[f64],
    shifts: &[f64],
    out: &mut Vec<(usize, f64)>,
) {
    let nx = lon_b.len() - 1;

    // latitude band intersections are shift-independent
    let j_start = lat_b.partition_point(|&b| b <= bounds.lat_lo).saturating_sub(1);
    let mut lat_overlaps: Vec<(usize, f64)> = Vec::new();
    for j in j_start..lat_b.len() - 1 {
        if lat_b[j] >= bounds.lat_hi {
            break;
        }
        let lo = lat_b[j].max(bounds.lat_lo);
        let hi = lat_b[j + 1].min(bounds.lat_hi);
        if hi > lo {
            // interpolate sin(lat) between precomputed corner values only
            // when the band is clipped
            let sin_lo = if lo == lat_b[j] {
                sin_lat_b[j]
            } else {
                lo.to_radians().sin()
            };
            let sin_hi = if hi == lat_b[j + 1] {
                sin_lat_b[j + 1]
            } else {
                hi.to_radians().sin()
            };
            lat_overlaps.push((j, sin_hi - sin_lo));
        }
    }
    if lat_overlaps.is_empty() {
        return;
    }

    for &shift in shifts {
        let lo = bounds.lon_lo + shift;
        let hi = bounds.lon_hi + shift;
        if hi <= lon_b[0] || lo >= lon_b[nx] {
            continue;
        }
        let i_start = lon_b.partition_point(|&b| b <= lo).saturating_sub(1);
        for i in i_start..nx {
            if lon_b[i] >= hi {
                break;
            }
            let dlon = (lon_b[i + 1].min(hi) - lon_b[i].max(lo)).to_radians();
            if dlon <= 0.0 {
                continue;
            }
            for &(j, dsin) in &lat_overlaps {
                out.push((j * nx + i, dlon * dsin));
            }
        }
    }
}

/// Generate conservative-normed weights from a curvilinear source grid to a
/// regular destination grid.
///
/// Source cells with a zero mask contribute nothing; destination cells with
/// a zero mask (or no unmasked overlap at all) receive no weights. With
/// `periodic`, source cells are matched against the destination longitude
/// domain shifted by a full turn in either direction.
pub fn conservative_normed(
    src: &CurvilinearGrid,
    dst: &RegularGrid,
    periodic: bool,
) -> Result<RegridWeights> {
    src.validate()?;
    dst.validate()?;
    let lon_b = dst.lon_b.as_slice().ok_or_else(|| {
        Fre2EsmfError::WeightError("destination corner vector not contiguous".to_string())
    })?;
    let lat_b = dst.lat_b.as_slice().ok_or_else(|| {
        Fre2EsmfError::WeightError("destination corner vector not contiguous".to_string())
    })?;
    if lon_b[0] >= lon_b[lon_b.len() - 1] || lat_b[0] >= lat_b[lat_b.len() - 1] {
        return Err(Fre2EsmfError::WeightError(
            "destination corner coordinates must be increasing".to_string(),
        ));
    }

    let (src_ny, src_nx) = src.shape();
    let (dst_ny, dst_nx) = dst.shape();
    let sin_lat_b: Vec<f64> = lat_b.iter().map(|&b| b.to_radians().sin()).collect();
    let shifts: &[f64] = if periodic {
        &[-360.0, 0.0, 360.0]
    } else {
        &[0.0]
    };

    // overlap areas of every unmasked source cell, gathered row by row
    let triplets: Vec<(usize, usize, f64)> = (0..src_ny)
        .into_par_iter()
        .flat_map_iter(|j| {
            let mut row_triplets = Vec::new();
            let mut cell_overlaps = Vec::new();
            for i in 0..src_nx {
                if src.mask[[j, i]] == 0.0 {
                    continue;
                }
                let bounds = cell_bounds(src, j, i);
                cell_overlaps.clear();
                overlaps_for_cell(&bounds, lon_b, lat_b, &sin_lat_b, shifts, &mut cell_overlaps);
                let src_idx = j * src_nx + i;
                row_triplets.extend(
                    cell_overlaps
                        .iter()
                        .map(|&(dst_idx, a)| (dst_idx, src_idx, a)),
                );
            }
            row_triplets
        })
        .collect();

    // normalize by the total unmasked overlap per destination cell
    let mut totals = vec![0.0; dst_ny * dst_nx];
    for &(dst_idx, _, a) in &triplets {
        totals[dst_idx] += a;
    }

    let dst_mask = dst
        .mask
        .as_slice()
        .ok_or_else(|| Fre2EsmfError::WeightError("destination mask not contiguous".to_string()))?;

    let mut kept: Vec<(usize, usize, f64)> = triplets
        .into_iter()
        .filter(|&(dst_idx, _, _)| dst_mask[dst_idx] > 0.0 && totals[dst_idx] > 0.0)
        .map(|(dst_idx, src_idx, a)| (dst_idx, src_idx, a / totals[dst_idx]))
        .collect();
    kept.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let mut row = Vec::with_capacity(kept.len());
    let mut col = Vec::with_capacity(kept.len());
    let mut s = Vec::with_capacity(kept.len());
    for (dst_idx, src_idx, w) in kept {
        row.push(dst_idx);
        col.push(src_idx);
        s.push(w);
    }

    Ok(RegridWeights {
        src_shape: (src_ny, src_nx),
        dst_shape: (dst_ny, dst_nx),
        row,
        col,
        s,
    })
}
