//! Compilation units and the files emitted from them

use crate::config::CodegenConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Declarations and definitions collected while lowering one module
///
/// Entries stay in creation order, and the i-th declaration always belongs
/// to the i-th definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    name: String,
    declarations: Vec<String>,
    definitions: Vec<String>,
}

impl CompilationUnit {
    /// An empty unit for the module `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Module name, also the base name of the emitted files
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Function prototypes, in creation order
    #[must_use]
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Function bodies, in creation order
    #[must_use]
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Number of functions in the unit
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.declarations.len()
    }

    /// Appends one function
    pub fn push_function(&mut self, declaration: String, definition: String) {
        self.declarations.push(declaration);
        self.definitions.push(definition);
    }

    /// Renders both files
    #[must_use]
    pub fn emit(&self, config: &CodegenConfig) -> EmittedUnit {
        EmittedUnit {
            name: self.name.clone(),
            header: self.header_text(config),
            source: self.source_text(),
        }
    }

    fn header_text(&self, config: &CodegenConfig) -> String {
        let guard = header_guard(&self.name);
        format!(
            "// auto generated\n#ifndef {guard}\n#define {guard}\n\ntypedef void *{};\n\n{}\n\n#endif // {guard}\n",
            config.any_type,
            self.declarations.join("\n"),
        )
    }

    fn source_text(&self) -> String {
        format!(
            "#include \"{}.h\"\n\n{}",
            self.name,
            self.definitions.join("\n")
        )
    }
}

/// Header guard macro for module `name`, e.g. `__MAIN_H_`
#[must_use]
pub fn header_guard(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("__{stem}_H_")
}

/// Rendered text of a unit's header and source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    /// Module name
    pub name: String,
    /// Contents of `NAME.h`
    pub header: String,
    /// Contents of `NAME.c`
    pub source: String,
}

/// Paths of the files written by [`EmittedUnit::write_to`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// `DIR/NAME.h`
    pub header: PathBuf,
    /// `DIR/NAME.c`
    pub source: PathBuf,
}

impl EmittedUnit {
    /// Writes `NAME.h` and `NAME.c` into `dir`, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating the directory or writing a file.
    pub fn write_to(&self, dir: &Path) -> io::Result<Artifacts> {
        fs::create_dir_all(dir)?;

        let header = dir.join(format!("{}.h", self.name));
        let source = dir.join(format!("{}.c", self.name));
        fs::write(&source, &self.source)?;
        fs::write(&header, &self.header)?;

        tracing::info!(
            header = %header.display(),
            source = %source.display(),
            "wrote compilation unit"
        );
        Ok(Artifacts { header, source })
    }
}
