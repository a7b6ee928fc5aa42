//! Integration test utilities for the kv compiler
//!
//! Each directory under `test-programs/` holds a `main.kv` together with the
//! `expected.h` and `expected.c` it must compile to.

use anyhow::{Context, Result};
use kv_codegen::EmittedUnit;
use kv_driver::{CompileError, CompileOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// A test program on disk
#[derive(Debug, Clone)]
pub struct TestProgram {
    /// Directory name
    pub name: String,
    /// Program directory
    pub dir: PathBuf,
}

impl TestProgram {
    /// Path of the program source
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        self.dir.join("main.kv")
    }

    /// Compiles the program in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or does not compile
    pub fn compile(&self, options: &CompileOptions) -> Result<EmittedUnit> {
        let path = self.source_path();
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        kv_driver::compile_source("main", &source, options)
            .with_context(|| format!("Failed to compile test program `{}`", self.name))
    }

    /// Expected header text
    ///
    /// # Errors
    ///
    /// Returns an error if `expected.h` is missing
    pub fn expected_header(&self) -> Result<String> {
        read_expected(&self.dir.join("expected.h"))
    }

    /// Expected source text
    ///
    /// # Errors
    ///
    /// Returns an error if `expected.c` is missing
    pub fn expected_source(&self) -> Result<String> {
        read_expected(&self.dir.join("expected.c"))
    }
}

fn read_expected(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Missing expectation {}", path.display()))
}

/// Directory holding the test programs
#[must_use]
pub fn programs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-programs")
}

/// All test programs, sorted by name
///
/// # Errors
///
/// Returns an error if the programs directory cannot be read
pub fn load_programs() -> Result<Vec<TestProgram>> {
    let mut programs = Vec::new();
    for entry in fs::read_dir(programs_dir()).context("Failed to read test-programs directory")? {
        let dir = entry?.path();
        if dir.join("main.kv").is_file() {
            let name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            programs.push(TestProgram { name, dir });
        }
    }

    programs.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(programs)
}

/// Compiles an inline source with default options
///
/// # Errors
///
/// Returns the driver's error unchanged
pub fn compile_inline(source: &str) -> Result<EmittedUnit, CompileError> {
    kv_driver::compile_source("main", source, &CompileOptions::default())
}
