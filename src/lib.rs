//! fre2esmf: conservative regridding weights for FRE/MOM6 ocean grids
//!
//! Generates a one-time set of conservative-normed regridding weights
//! between an ocean model's native curvilinear grid and a regular 1-degree
//! latitude/longitude grid, and persists them to a NetCDF file for reuse by
//! downstream interpolation.
//!
//! ## Module Organization
//!
//! - [`grid`]: grid value types and the pure supergrid derivations
//! - [`source`]: source grid assembly from the supergrid and static files
//! - [`destination`]: 1-degree destination grid synthesis
//! - [`weights`]: conservative-normed sparse weight generation
//! - [`netcdf_io`]: weight file persistence
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fre2esmf::prelude::*;
//! use std::path::Path;
//!
//! let src = fre2esmf::source::open_source_grid(
//!     Path::new("ocean_hgrid_d2.nc"),
//!     Path::new("ocean_static_d2.nc"),
//! ).unwrap();
//! let dst = fre2esmf::destination::open_destination_grid(
//!     Path::new("ocean_annual_z_1x1deg.static.nc"),
//! ).unwrap();
//!
//! let weights = fre2esmf::weights::conservative_normed(&src, &dst, true).unwrap();
//! WeightWriter::new(Path::new("weights.nc"))
//!     .write(&weights, "conservative_normed")
//!     .unwrap();
//! ```

// Core modules
pub mod destination;
pub mod errors;
pub mod grid;
pub mod netcdf_io;
pub mod parallel;
pub mod source;
pub mod weights;

// Direct re-exports for the public API
pub use destination::*;
pub use errors::*;
pub use grid::*;
pub use netcdf_io::*;
pub use parallel::*;
pub use source::*;
pub use weights::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Fre2EsmfError, Result};
    pub use crate::grid::{CurvilinearGrid, NamedArray, RegularGrid};
    pub use crate::netcdf_io::WeightWriter;
    pub use crate::parallel::ParallelConfig;
    pub use crate::weights::{conservative_normed, RegridWeights};
}
