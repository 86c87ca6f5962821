

use std::env;
use std::path::PathBuf;

use anyhow::{Context, bail};
use listing_purge::{DeletionError, DeletionManager, ListingId, PurgeConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive("listing_purge=info".parse()?),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(cli) = parse_args(&args[1..])? else {
        print_help();
        return Ok(());
    };

    let mut config = PurgeConfig::load(cli.config_path.as_deref()).context("failed to load configuration")?;
    if let Some(backend) = cli.backend {
        config.backend_url = backend.trim_end_matches('/').to_string();
    }
    if let Some(bucket) = cli.bucket {
        config.storage_bucket = Some(bucket);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }

    let manager = DeletionManager::from_config(&config)?;
    let id = ListingId::new(cli.listing_id);

    println!("🗑️  Permanently deleting listing {}", id);
    println!("   Backend: {}", config.backend_url);
    println!();

    match manager.delete_listing(&id).await {
        Ok(report) => {
            println!("   ✅ Listing {} has been deleted", report.listing_id);
            println!("   Media erased: {}/{}", report.erased(), report.outcomes.len());
            for failure in report.failures() {
                println!(
                    "   ⚠️  Not erased: {} ({})",
                    failure.reference,
                    failure.error.as_deref().unwrap_or("unknown error")
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("   ❌ {}", e);
            if let DeletionError::StatusCommitFailed { erased, .. } = &e {
                if *erased > 0 {
                    eprintln!("   {} media objects were already erased; the listing is still live.", erased);
                }
            }
            eprintln!("   Failed to delete listing. Please try again.");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    listing_id: String,
    config_path: Option<PathBuf>,
    backend: Option<String>,
    bucket: Option<String>,
    timeout: Option<u64>,
}

/// Parses everything after the program name. `Ok(None)` means help was asked for.
fn parse_args(args: &[String]) -> anyhow::Result<Option<CliArgs>> {
    let mut cli = CliArgs::default();
    let mut listing_id: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", arg))
        };

        match arg.as_str() {
            "--config" | "-c" => cli.config_path = Some(PathBuf::from(value()?)),
            "--backend" | "-b" => cli.backend = Some(value()?),
            "--bucket" => cli.bucket = Some(value()?),
            "--timeout" | "-t" => {
                cli.timeout = Some(value()?.parse().context("invalid --timeout")?)
            }
            "--help" | "-h" => return Ok(None),
            other if other.starts_with('-') => bail!("unknown option: {}", other),
            other => {
                if let Some(first) = &listing_id {
                    bail!("unexpected argument {} (property_id already given as {})", other, first);
                }
                listing_id = Some(other.to_string());
            }
        }
    }

    cli.listing_id = listing_id.context("missing <property_id>")?;
    Ok(Some(cli))
}

fn print_help() {
    println!(
        r#"listing-purge - permanently delete a property listing and its media

USAGE:
    listing-purge [OPTIONS] <property_id>

OPTIONS:
    -c, --config <FILE>     Config file (toml/json/yaml)
    -b, --backend <URL>     Property backend URL (overrides PURGE_BACKEND_URL)
        --bucket <NAME>     Storage bucket for bare object paths
    -t, --timeout <SECS>    Per-request timeout
    -h, --help              Print help

Environment variables with the PURGE_ prefix override the config file.
Log verbosity is controlled by RUST_LOG."#
    );
}
