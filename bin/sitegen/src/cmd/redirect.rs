//! Redirect command - writes a host redirect `.htaccess`

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use sitegen_generator::RedirectGenerator;

/// Run the redirect command.
///
/// Replaces the output directory with a single `.htaccess` sending every
/// request for `from` to `https://{to}`.
pub fn run(from: &str, to: &str, output: &Path) -> Result<PathBuf> {
    tracing::info!(from, to, ?output, "Writing redirect");

    let path = RedirectGenerator::new(from, to)
        .write(output)
        .wrap_err_with(|| format!("Failed to write redirect into {}", output.display()))?;

    println!();
    println!("  Redirect written: {from} -> https://{to}");
    println!("  File:             {}", path.display());
    println!();

    Ok(path)
}
