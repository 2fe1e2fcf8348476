//! NetCDF persistence of the generated weights
//!
//! Writes the sparse triplets in the layout ESMF/xESMF weight files use:
//! dimensions `n_s` (stored weights), `n_a` (source cells), `n_b`
//! (destination cells) and variables `col`, `row` (1-based flat indices)
//! and `S` (weight values), with grid shapes and a history stamp recorded
//! as global attributes.

use crate::errors::Result;
use crate::weights::RegridWeights;
use chrono::Utc;
use ndarray::Array1;
use netcdf::create;
use std::{fs, path::Path};

/// Writer for regridding weight files
pub struct WeightWriter<'a> {
    output_path: &'a Path,
}

impl<'a> WeightWriter<'a> {
    /// Create a new weight writer
    pub fn new(output_path: &'a Path) -> Self {
        Self { output_path }
    }

    /// Write the weights to the output file, replacing any existing file.
    pub fn write(&self, weights: &RegridWeights, method: &str) -> Result<()> {
        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }

        let (src_ny, src_nx) = weights.src_shape;
        let (dst_ny, dst_nx) = weights.dst_shape;

        let mut file = create(self.output_path)?;
        file.add_dimension("n_s", weights.len())?;
        file.add_dimension("n_a", src_ny * src_nx)?;
        file.add_dimension("n_b", dst_ny * dst_nx)?;

        // ESMF stores 1-based flat indices
        let col: Array1<i32> = weights.col.iter().map(|&c| c as i32 + 1).collect();
        let row: Array1<i32> = weights.row.iter().map(|&r| r as i32 + 1).collect();
        let s: Array1<f64> = Array1::from_vec(weights.s.clone());

        let mut col_var = file.add_variable::<i32>("col", &["n_s"])?;
        col_var.put_attribute("long_name", "source grid flat index, 1-based")?;
        col_var.put(col.view(), ..)?;

        let mut row_var = file.add_variable::<i32>("row", &["n_s"])?;
        row_var.put_attribute("long_name", "destination grid flat index, 1-based")?;
        row_var.put(row.view(), ..)?;

        let mut s_var = file.add_variable::<f64>("S", &["n_s"])?;
        s_var.put_attribute("long_name", "weight of source cell contribution")?;
        s_var.put(s.view(), ..)?;

        file.add_attribute("regrid_method", method)?;
        file.add_attribute("src_grid_dims", vec![src_ny as i32, src_nx as i32])?;
        file.add_attribute("dst_grid_dims", vec![dst_ny as i32, dst_nx as i32])?;
        file.add_attribute(
            "history",
            format!("Created by fre2esmf on {}", Utc::now().to_rfc3339()),
        )?;

        Ok(())
    }
}
