//! Entry point for the fre2esmf weight generator.
//!
//! Straight-line run over one hard-coded pair of grids: open the supergrid
//! and static files, synthesize the 1-degree destination grid, compute
//! conservative-normed weights, and write them to the output file. No CLI
//! flags, no environment variables.

use fre2esmf::destination::open_destination_grid;
use fre2esmf::netcdf_io::WeightWriter;
use fre2esmf::parallel::ParallelConfig;
use fre2esmf::source::open_source_grid;
use fre2esmf::weights::conservative_normed;
use std::path::Path;

/// Ocean supergrid coordinates and areas at twice the model resolution
const SUPERGRID_FILE: &str = "ocean_hgrid_d2.nc";
/// Model-grid static file with the wet land/sea mask
const STATIC_FILE: &str = "ocean_static_d2.nc";
/// Post-processed 1-degree static file with the wet fraction
const PPSTATIC_FILE: &str = "ocean_annual_z_1x1deg.static.nc";
/// Output weight file
const OUTPUT_FILE: &str = "conservative_normed_1120x1440_180x360.nc";

const METHOD: &str = "conservative_normed";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        r#"
------------------------------------------------------------------
        fre2esmf: conservative regridding weight generator
------------------------------------------------------------------
"#
    );

    let config = ParallelConfig::new_default();
    config.setup_global_pool()?;

    let src = open_source_grid(Path::new(SUPERGRID_FILE), Path::new(STATIC_FILE))?;
    let (src_ny, src_nx) = src.shape();
    println!("Source grid: {} x {} cells", src_ny, src_nx);

    let dst = open_destination_grid(Path::new(PPSTATIC_FILE))?;
    let (dst_ny, dst_nx) = dst.shape();
    println!("Destination grid: {} x {} cells", dst_ny, dst_nx);

    println!("⚡ Computing {} weights (periodic)...", METHOD);
    let weights = conservative_normed(&src, &dst, true)?;
    println!("   {} weights stored", weights.len());

    WeightWriter::new(Path::new(OUTPUT_FILE)).write(&weights, METHOD)?;
    println!("✅ Saved weights to {}", OUTPUT_FILE);

    Ok(())
}
