//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use sitegen_core::Config;
use sitegen_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads configuration for the site under `root`, applies command-line
/// overrides and builds into the output directory.
pub fn run(
    root: &Path,
    domain: Option<&str>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?root, ?domain, ?output, pretty, "Starting build");

    let mut config = Config::load(root, domain).wrap_err("Failed to load configuration")?;

    if let Some(output) = output {
        config.output_dir = output.to_path_buf();
    }
    if !pretty {
        config.build.pretty_html = false;
    }

    tracing::debug!(?config, "Loaded configuration");

    let output_dir = config.output_dir.clone();
    let stats = Builder::new(config).build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", stats.pages);
    println!("  Assets:     {}", stats.assets);
    println!("  Data files: {}", stats.data_files);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}
