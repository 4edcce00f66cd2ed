use anyhow::{bail, Context};
use clap::Parser;
use routerkit::{
    generate_gcode, init_logging, report_bounds, CutFile, JobConfig, LONG_VERSION, VERSION,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "routerkit")]
#[command(about = "Generate router G-code from a job config and a cut file", long_about = None)]
#[command(version = VERSION, long_version = LONG_VERSION)]
struct Cli {
    /// Job configuration (.toml or .json)
    config: PathBuf,

    /// Cut tree (.json)
    cuts: PathBuf,

    /// Print the extent of the carved material instead of G-code
    #[arg(long)]
    bounds: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = JobConfig::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load job config {}", cli.config.display()))?;
    let cuts = CutFile::load_from_file(&cli.cuts)?;

    let text = if cli.bounds {
        let b = report_bounds(&config, &cuts)?;
        if !b.is_valid() {
            bail!("cut file {} carves nothing", cli.cuts.display());
        }
        format!(
            "X {:.4} .. {:.4}\nY {:.4} .. {:.4}\nZ {:.4} .. {:.4}\n",
            b.min_x, b.max_x, b.min_y, b.max_y, b.min_z, b.max_z
        )
    } else {
        generate_gcode(&config, &cuts)?
    };

    match cli.output {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}
