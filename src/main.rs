//! pgconf - generates a high load configuration for PostgreSQL 9.1

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod models;
mod services;
mod templates;
mod utils;

use config::Settings;

#[derive(Parser)]
#[command(name = "pgconf")]
#[command(about = "Generate the most optimal high load configuration for PostgreSQL")]
#[command(disable_version_flag = true)]
struct Args {
    /// Operating memory. Supported units: kB, MB, GB, TB. If no unit was specified GB units will be used by default.
    #[arg(short, long, default_value = "1GB")]
    memory: String,

    /// CPU count.
    #[arg(short = 'p', long, default_value_t = 2)]
    cpus: u32,

    /// Maximum connections that database server aimed to support.
    #[arg(short, long, default_value_t = 100)]
    connections: u32,

    /// Database count.
    #[arg(short, long, default_value_t = 1)]
    databases: u32,

    /// PostgreSQL version to generate configuration for.
    #[arg(short = 'v', long = "version", default_value = "9.1")]
    pg_version: String,

    /// Use memory and CPU count of this machine.
    #[arg(long, conflicts_with_all = ["memory", "cpus"])]
    detect: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        eprintln!("Exiting...");
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = if args.detect {
        let host = services::host::detect_host()?;
        Settings::from_host(&host, args.connections, args.databases, &args.pg_version)?
    } else {
        Settings::new(
            &args.memory,
            args.cpus,
            args.connections,
            args.databases,
            &args.pg_version,
        )?
    };

    let parameters = services::calculator::calculate(&settings);
    info!("Generated {} settings", parameters.len());

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(templates::render_config(&parameters).as_bytes())
        .context("Failed to write configuration")?;
    stdout.flush().context("Failed to write configuration")?;

    Ok(())
}
