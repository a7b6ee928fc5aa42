//! Compile command implementation

use crate::config::Config;
use anyhow::{Context, Result};
use colored::Colorize;
use kv_driver::{CompileError, CompileOptions, SourceFormat};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Command line settings that override the configuration file
pub struct Overrides {
    pub out_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub raw_tree: bool,
}

pub fn compile(source: &Path, config: Config, overrides: Overrides) -> Result<()> {
    let start = Instant::now();

    let options = CompileOptions {
        codegen: config.codegen,
        core_bindings: config.resolve.core,
        out_dir: overrides
            .out_dir
            .or(config.output.dir)
            .unwrap_or_else(|| PathBuf::from("out")),
        name: overrides.name,
        format: if overrides.raw_tree {
            SourceFormat::RawTree
        } else {
            SourceFormat::Text
        },
    };

    println!("{} {}", "Compiling".green().bold(), source.display());

    let artifacts = match kv_driver::compile_file(source, &options) {
        Ok(artifacts) => artifacts,
        Err(CompileError::Syntax { module, errors }) => {
            for error in errors {
                eprintln!("{:?}", miette::Report::new(error));
            }
            anyhow::bail!("Could not compile module `{module}` due to syntax errors");
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to compile {}", source.display()));
        }
    };

    println!("  {} {}", "Header:".bold(), artifacts.header.display());
    println!("  {} {}", "Source:".bold(), artifacts.source.display());
    println!(
        "{} in {:.2}s",
        "Finished".green().bold(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
