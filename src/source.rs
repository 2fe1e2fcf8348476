//! Source grid assembly from FRE grid-spec files
//!
//! The source grid comes from two NetCDF files: the ocean supergrid
//! (`x`, `y` coordinates and `area` at twice the model resolution) and the
//! ocean static file (the `wet` land/sea mask on the model grid, with
//! `yh`/`xh` dimension labels that get renamed to match the supergrid-derived
//! arrays).

use crate::errors::{Fre2EsmfError, Result};
use crate::grid::{subsample_centers, subsample_corners, CurvilinearGrid, NamedArray};
use ndarray::Array2;
use netcdf::File;
use std::path::Path;

/// Dimension labels of the supergrid-derived center arrays
pub const CENTER_DIMS: [&str; 2] = ["ny2", "nx2"];

/// Read a 2-D variable together with its dimension labels.
pub fn read_2d(file: &File, var_name: &str) -> Result<NamedArray> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| Fre2EsmfError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let dims: Vec<String> = var
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if dims.len() != 2 {
        return Err(Fre2EsmfError::ShapeMismatch {
            what: format!("variable '{}'", var_name),
            expected: vec![2],
            found: shape,
        });
    }

    let values: Vec<f64> = var.get_values::<f64, _>(..)?;
    let data = Array2::from_shape_vec((shape[0], shape[1]), values)?;
    Ok(NamedArray::new([dims[0].as_str(), dims[1].as_str()], data))
}

/// Extract the `_FillValue` attribute of a variable, if any.
pub fn read_fill_value(file: &File, var_name: &str) -> Option<f64> {
    let var = file.variable(var_name)?;
    var.attribute("_FillValue")
        .and_then(|attr| match attr.value().ok()? {
            netcdf::AttributeValue::Double(v) => Some(v),
            netcdf::AttributeValue::Float(v) => Some(v as f64),
            netcdf::AttributeValue::Short(v) => Some(v as f64),
            netcdf::AttributeValue::Int(v) => Some(v as f64),
            _ => None,
        })
}

/// Assemble the source [`CurvilinearGrid`] from the supergrid and static
/// files.
///
/// Centers (`lon`, `lat`, `area`) are the odd-index subsample of the
/// supergrid `x`/`y`/`area` variables; corners (`lon_b`, `lat_b`) are the
/// even-index subsample. The mask is the static file's `wet` variable with
/// its `yh`/`xh` labels renamed to the center labels.
pub fn open_source_grid(supergrid_path: &Path, static_path: &Path) -> Result<CurvilinearGrid> {
    let supergrid = netcdf::open(supergrid_path)?;
    let static_file = netcdf::open(static_path)?;

    let x = read_2d(&supergrid, "x")?;
    let y = read_2d(&supergrid, "y")?;
    let supergrid_area = read_2d(&supergrid, "area")?;

    let wet = read_2d(&static_file, "wet")?
        .rename_dims(&[("yh", CENTER_DIMS[0]), ("xh", CENTER_DIMS[1])])?;

    let grid = CurvilinearGrid {
        lon: subsample_centers(&x.data),
        lat: subsample_centers(&y.data),
        lon_b: subsample_corners(&x.data),
        lat_b: subsample_corners(&y.data),
        area: subsample_centers(&supergrid_area.data),
        mask: wet.data,
    };
    grid.validate()?;
    Ok(grid)
}
