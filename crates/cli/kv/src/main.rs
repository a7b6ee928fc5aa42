//! kv compiler CLI
//!
//! Compiles one kv source file to a C header and source file pair.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod compile;
mod config;

#[derive(Parser)]
#[command(name = "kv")]
#[command(about = "Lambda-lifting compiler from kv to C", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Directory for the generated files [default: out]
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Module name [default: source file stem]
    #[arg(long)]
    name: Option<String>,

    /// Configuration file [default: kv.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the source as a JSON raw parse tree
    #[arg(long)]
    raw_tree: bool,

    /// Log compiler events (filtered by RUST_LOG, default info)
    #[arg(long)]
    trace: bool,
}

fn install_subscriber(trace: bool) {
    if !trace {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_subscriber(cli.trace);

    let config = config::Config::discover(cli.config.as_deref(), &std::env::current_dir()?)?;
    compile::compile(
        &cli.source,
        config,
        compile::Overrides {
            out_dir: cli.out_dir,
            name: cli.name,
            raw_tree: cli.raw_tree,
        },
    )
}
