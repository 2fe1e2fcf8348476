//! End-to-end test of the weight generation pipeline
//!
//! Builds a synthetic global supergrid, static mask, and 1-degree wet
//! fraction file, runs the full pipeline, and checks the conservation
//! properties of the generated weights and the written file.

use fre2esmf::{
    destination::open_destination_grid,
    errors::Result,
    netcdf_io::WeightWriter,
    source::open_source_grid,
    weights::conservative_normed,
};
use ndarray::Array2;
use netcdf::{create, open};
use std::path::Path;
use tempfile::tempdir;

/// Model grid resolution of the synthetic source: 6 x 8 cells covering the
/// whole globe (30-degree latitude bands, 45-degree longitude bands).
const NY: usize = 6;
const NX: usize = 8;

fn write_supergrid(path: &Path) -> Result<()> {
    let nyp = 2 * NY + 1;
    let nxp = 2 * NX + 1;
    let x = Array2::from_shape_fn((nyp, nxp), |(_, i)| i as f64 * 22.5);
    let y = Array2::from_shape_fn((nyp, nxp), |(j, _)| j as f64 * 15.0 - 90.0);
    let area = Array2::from_elem((2 * NY, 2 * NX), 1.0);

    let mut file = create(path)?;
    file.add_dimension("nyp", nyp)?;
    file.add_dimension("nxp", nxp)?;
    file.add_dimension("ny", 2 * NY)?;
    file.add_dimension("nx", 2 * NX)?;
    let mut x_var = file.add_variable::<f64>("x", &["nyp", "nxp"])?;
    x_var.put(x.view(), ..)?;
    let mut y_var = file.add_variable::<f64>("y", &["nyp", "nxp"])?;
    y_var.put(y.view(), ..)?;
    let mut area_var = file.add_variable::<f64>("area", &["ny", "nx"])?;
    area_var.put(area.view(), ..)?;
    Ok(())
}

fn write_static(path: &Path) -> Result<()> {
    let wet = Array2::<f64>::ones((NY, NX));
    let mut file = create(path)?;
    file.add_dimension("yh", NY)?;
    file.add_dimension("xh", NX)?;
    let mut var = file.add_variable::<f64>("wet", &["yh", "xh"])?;
    var.put(wet.view(), ..)?;
    Ok(())
}

fn write_ppstatic(path: &Path) -> Result<()> {
    // wet fraction on the 1-degree grid, with a NaN hole that must become
    // land after the fill
    let mut wet = Array2::ones((180, 360));
    wet[[90, 180]] = f64::NAN;
    let mut file = create(path)?;
    file.add_dimension("lat", 180)?;
    file.add_dimension("lon", 360)?;
    let mut var = file.add_variable::<f64>("wet", &["lat", "lon"])?;
    var.put(wet.view(), ..)?;
    Ok(())
}

#[test]
fn test_full_weight_generation_pipeline() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let supergrid_path = temp_dir.path().join("ocean_hgrid.nc");
    let static_path = temp_dir.path().join("ocean_static.nc");
    let ppstatic_path = temp_dir.path().join("ocean_1x1deg.static.nc");
    let weight_path = temp_dir.path().join("weights.nc");

    write_supergrid(&supergrid_path)?;
    write_static(&static_path)?;
    write_ppstatic(&ppstatic_path)?;

    let src = open_source_grid(&supergrid_path, &static_path)?;
    assert_eq!(src.shape(), (NY, NX));

    let dst = open_destination_grid(&ppstatic_path)?;
    assert_eq!(dst.shape(), (180, 360));
    // the NaN hole became land
    assert_eq!(dst.mask[[90, 180]], 0.0);

    let weights = conservative_normed(&src, &dst, true)?;
    assert!(!weights.is_empty());

    // weights into every covered destination cell sum to 1
    let mut sums = vec![0.0; 180 * 360];
    for (&r, &w) in weights.row.iter().zip(&weights.s) {
        sums[r] += w;
    }
    for (idx, &total) in sums.iter().enumerate() {
        if idx == 90 * 360 + 180 {
            assert_eq!(total, 0.0);
        } else {
            assert!((total - 1.0).abs() < 1e-10, "row {} sums to {}", idx, total);
        }
    }

    // a constant source field passes through unchanged on wet cells
    let field = Array2::from_elem(src.shape(), 7.5);
    let out = weights.apply(&field)?;
    assert!((out[[0, 0]] - 7.5).abs() < 1e-10);
    assert!((out[[179, 359]] - 7.5).abs() < 1e-10);
    assert_eq!(out[[90, 180]], 0.0);

    // persist and re-open the weight file
    WeightWriter::new(&weight_path).write(&weights, "conservative_normed")?;

    let file = open(&weight_path)?;
    assert_eq!(file.dimension("n_s").unwrap().len(), weights.len());
    assert_eq!(file.dimension("n_a").unwrap().len(), NY * NX);
    assert_eq!(file.dimension("n_b").unwrap().len(), 180 * 360);

    let row: Vec<i32> = file.variable("row").unwrap().get_values::<i32, _>(..)?;
    let col: Vec<i32> = file.variable("col").unwrap().get_values::<i32, _>(..)?;
    assert!(row.iter().all(|&r| r >= 1 && r <= (180 * 360) as i32));
    assert!(col.iter().all(|&c| c >= 1 && c <= (NY * NX) as i32));

    Ok(())
}

#[test]
fn test_masked_model_cells_leave_destination_rows_uncovered() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let supergrid_path = temp_dir.path().join("ocean_hgrid.nc");
    let static_path = temp_dir.path().join("ocean_static.nc");
    let ppstatic_path = temp_dir.path().join("ocean_1x1deg.static.nc");

    write_supergrid(&supergrid_path)?;
    write_ppstatic(&ppstatic_path)?;

    // land everywhere except one model cell
    {
        let mut wet = Array2::zeros((NY, NX));
        wet[[0, 0]] = 1.0;
        let mut file = create(&static_path)?;
        file.add_dimension("yh", NY)?;
        file.add_dimension("xh", NX)?;
        let mut var = file.add_variable::<f64>("wet", &["yh", "xh"])?;
        var.put(wet.view(), ..)?;
    }

    let src = open_source_grid(&supergrid_path, &static_path)?;
    let dst = open_destination_grid(&ppstatic_path)?;
    let weights = conservative_normed(&src, &dst, true)?;

    // only destination cells under model cell (0, 0) are covered: the
    // 30 x 45 degree patch in the southwest corner
    let covered: std::collections::BTreeSet<usize> = weights.row.iter().copied().collect();
    assert_eq!(covered.len(), 30 * 45);
    assert!(covered.contains(&0));
    assert!(covered.iter().all(|&r| (r / 360) < 30 && (r % 360) < 45));
    for &w in &weights.s {
        assert!((w - 1.0).abs() < 1e-10);
    }

    Ok(())
}
