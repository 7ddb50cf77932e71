//! `fidelity` command-line tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fidelity_api::{document, ApiVersion, Conversions};
use fidelity_cli::{describe_round_trip, is_lossless, load_config, read_document, render, Format};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fidelity", version)]
#[command(about = "Convert OpenStack infrastructure manifests between API versions", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a manifest to another API version
    Convert {
        /// Target version, e.g. v1alpha8
        #[arg(long, value_parser = parse_version)]
        to: ApiVersion,
        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
        file: PathBuf,
    },
    /// Convert to the other version and back, reporting per-group fidelity
    Roundtrip {
        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        file: PathBuf,
    },
}

fn parse_version(s: &str) -> Result<ApiVersion, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Convert {
            to,
            config,
            format,
            file,
        } => {
            let ctx = Conversions::new(load_config(config.as_deref())?)?;
            let value = read_document(&file)?;
            let converted = document::convert(&value, to, &ctx)
                .with_context(|| format!("failed to convert {}", file.display()))?;
            if let Some(report) = &converted.report {
                for group in report.lossy_groups() {
                    tracing::info!("{} group '{}' stored for restoration", converted.kind, group);
                }
            }
            print!("{}", render(&converted.value, format)?);
        }
        Commands::Roundtrip { config, file } => {
            let ctx = Conversions::new(load_config(config.as_deref())?)?;
            let value = read_document(&file)?;
            let trip = document::round_trip(&value, &ctx)
                .with_context(|| format!("failed to round-trip {}", file.display()))?;
            print!("{}", describe_round_trip(&trip));
            if !is_lossless(&trip) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
