//! # RouterKit
//!
//! Generates G-code for three-axis CNC routers from declarative cut trees.
//!
//! ## Architecture
//!
//! RouterKit is organized as a workspace with multiple crates:
//!
//! 1. **routerkit-core** - Exact rationals, units, geometry, router bits, job context
//! 2. **routerkit-designer** - Paths, PathBuilder, the Cut tree and its traversal
//! 3. **routerkit-camtools** - Carving backend: multipass contours, holes, conic pockets
//! 4. **routerkit-settings** - Job configuration files (TOML or JSON)
//! 5. **routerkit** - Logging setup and the command-line binary

use anyhow::Context;
use tracing::info;

pub use routerkit_camtools::{CamToolError, CommentMode, GCodeGenerator, GCodeOptions};
pub use routerkit_core::{
    BitProfile, ComplexAmount, CutError, Error, JobContext, Rational, Result, RouterBit, UnitError,
};
pub use routerkit_designer::{
    box_path, circle_path, process_cuts, Bounds, BoundsFinder, Compound, ConicPocket, Cut,
    CutFile, CutProcessor, Path, PathBuilder, Transformish,
};
pub use routerkit_settings::{JobConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version line with build date, as printed by `routerkit --version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so G-code written to stdout stays clean. Honors the
/// `RUST_LOG` environment variable; defaults to `warn`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

/// Runs the carving backend over `cuts` for the configured job.
pub fn generate_gcode(config: &JobConfig, cuts: &CutFile) -> anyhow::Result<String> {
    let job = config.build_context().context("Invalid job configuration")?;
    let options = config.gcode_options(&job).context("Invalid G-code settings")?;
    let gcode = routerkit_camtools::generate_gcode(&job, options, &cuts.cuts)
        .context("G-code generation failed")?;
    info!(
        job = config.job.name.as_deref().unwrap_or("unnamed"),
        bytes = gcode.len(),
        "Job complete"
    );
    Ok(gcode)
}

/// Extent of material touched by `cuts`, in native units.
pub fn report_bounds(config: &JobConfig, cuts: &CutFile) -> anyhow::Result<Bounds> {
    let job = config.build_context().context("Invalid job configuration")?;
    let mut finder = BoundsFinder::new();
    process_cuts(&mut finder, &job, &cuts.cuts).context("Failed to measure cuts")?;
    Ok(finder.bounds)
}
