//! Sitegen CLI
//!
//! Builds a static site from a `template`/`content` tree into `public`.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for sitegen.
#[derive(Parser)]
#[command(name = "sitegen", version, about = "A small static site generator")]
struct Cli {
    /// Site root holding `template`, `content` and `public`
    #[arg(short, long, default_value = "www")]
    root: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Domain used for sitemap and robots URLs (e.g., example.com)
        #[arg(short, long, env = "DOMAIN")]
        domain: Option<String>,
        /// Output directory, overriding `<root>/public`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write rendered HTML without re-indenting it
        #[arg(long)]
        no_pretty: bool,
    },
    /// Write an .htaccess redirecting one host to another
    Redirect {
        /// Host to redirect from
        #[arg(long)]
        from: String,
        /// Host to redirect to
        #[arg(long)]
        to: String,
        /// Output directory, overriding `<root>/public`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitegen::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            domain,
            output,
            no_pretty,
        } => {
            sitegen::cmd::build::run(&cli.root, domain.as_deref(), output.as_deref(), !no_pretty)?;
        }
        Commands::Redirect { from, to, output } => {
            let output = output.unwrap_or_else(|| cli.root.join("public"));
            sitegen::cmd::redirect::run(&from, &to, &output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["sitegen", "build", "--domain", "example.com", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.root, PathBuf::from("www"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                domain,
                output,
                no_pretty,
            } => {
                assert_eq!(domain.as_deref(), Some("example.com"));
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(!no_pretty);
            }
            Commands::Redirect { .. } => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_no_pretty() {
        let args = ["sitegen", "build", "--domain", "example.com", "--no-pretty"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { no_pretty, .. } => assert!(no_pretty),
            Commands::Redirect { .. } => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_redirect_command_parsing() {
        let args = ["sitegen", "redirect", "--from", "www.a.test", "--to", "a.test"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Redirect { from, to, output } => {
                assert_eq!(from, "www.a.test");
                assert_eq!(to, "a.test");
                assert!(output.is_none());
            }
            Commands::Build { .. } => panic!("Expected Redirect command"),
        }
    }

    #[test]
    fn test_cli_redirect_requires_hosts() {
        let args = ["sitegen", "redirect", "--from", "www.a.test"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["sitegen", "-vvv", "build", "--domain", "example.com"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_root() {
        let args = ["sitegen", "--root", "site", "build", "--domain", "example.com"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.root, PathBuf::from("site"));
    }
}
