//! Compilation driver for kv
//!
//! Runs the whole pipeline: parse (or decode a JSON raw tree), instantiate,
//! resolve, lower, then emit and write the header and source files.

mod error;

pub use error::CompileError;

use kv_ast::Module;
use kv_codegen::{Artifacts, CodegenConfig, EmittedUnit, lower_module};
use kv_resolve::{CoreScope, resolve_module};
use kv_syntax::RawNode;
use std::fs;
use std::path::{Path, PathBuf};

/// How a source file is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// kv source text
    #[default]
    Text,
    /// JSON-encoded raw parse tree
    RawTree,
}

/// Settings for one compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Naming conventions of the emitted C
    pub codegen: CodegenConfig,
    /// Names visible to resolution without being bound in the module
    pub core_bindings: Vec<String>,
    /// Directory receiving `NAME.h` and `NAME.c`
    pub out_dir: PathBuf,
    /// Module name; the source file stem when absent
    pub name: Option<String>,
    /// Encoding of the source file
    pub format: SourceFormat,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            codegen: CodegenConfig::default(),
            core_bindings: Vec::new(),
            out_dir: PathBuf::from("out"),
            name: None,
            format: SourceFormat::Text,
        }
    }
}

/// Module name derived from a source path, `main` for `dir/main.kv`
#[must_use]
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "unknown".to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Parses and instantiates `source` as module `name`
///
/// # Errors
///
/// Returns [`CompileError::Syntax`] when the parser yields no tree, or the
/// instantiation error.
pub fn parse_module(name: &str, source: &str) -> Result<Module, CompileError> {
    let parsed = kv_parser::parse_named(name, source);
    let Some(syntax) = parsed.syntax else {
        return Err(CompileError::Syntax {
            module: name.to_string(),
            errors: parsed.errors,
        });
    };
    Ok(kv_instantiate::instantiate_module(name, &syntax)?)
}

/// Decodes a JSON raw tree and instantiates it as module `name`
///
/// # Errors
///
/// Fails on malformed JSON or on a tree the instantiator rejects.
pub fn decode_module(name: &str, json: &str) -> Result<Module, CompileError> {
    let raw = RawNode::from_json(json)?;
    Ok(kv_instantiate::instantiate_module(name, &raw)?)
}

/// Resolves and lowers `module`, returning the rendered files
///
/// Lambdas that use names from an enclosing lambda are reported with a
/// warning before lowering rejects them.
///
/// # Errors
///
/// Returns the resolution or lowering error.
pub fn compile_module(
    module: &Module,
    options: &CompileOptions,
) -> Result<EmittedUnit, CompileError> {
    let core = CoreScope::with_bindings(options.core_bindings.iter().map(String::as_str));
    let resolution = resolve_module(module, &core)?;
    for capture in resolution.captures() {
        tracing::warn!(
            module = module.name(),
            symbol = capture.site.name(),
            "lambda uses a name bound outside it"
        );
    }

    let unit = lower_module(module, &options.codegen)?;
    tracing::info!(
        module = unit.name(),
        functions = unit.function_count(),
        "compiled module"
    );
    Ok(unit.emit(&options.codegen))
}

/// Compiles kv source text as module `name`
///
/// # Errors
///
/// Returns the first error of any pipeline stage.
pub fn compile_source(
    name: &str,
    source: &str,
    options: &CompileOptions,
) -> Result<EmittedUnit, CompileError> {
    compile_module(&parse_module(name, source)?, options)
}

/// Compiles a JSON raw tree as module `name`
///
/// # Errors
///
/// Returns the first error of any pipeline stage.
pub fn compile_raw(
    name: &str,
    json: &str,
    options: &CompileOptions,
) -> Result<EmittedUnit, CompileError> {
    compile_module(&decode_module(name, json)?, options)
}

/// Compiles the file at `path` and writes its artifacts to `options.out_dir`
///
/// # Errors
///
/// Returns the first error of any pipeline stage; nothing is written unless
/// compilation succeeds.
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<Artifacts, CompileError> {
    let input = fs::read_to_string(path)?;
    let name = options.name.clone().unwrap_or_else(|| module_name(path));

    let emitted = match options.format {
        SourceFormat::Text => compile_source(&name, &input, options)?,
        SourceFormat::RawTree => compile_raw(&name, &input, options)?,
    };
    Ok(emitted.write_to(&options.out_dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kv_ast::NodeKind;
    use kv_codegen::LowerError;
    use kv_resolve::ResolveError;

    #[test]
    fn test_module_name_from_stem() {
        assert_eq!(module_name(Path::new("src/main.kv")), "main");
        assert_eq!(module_name(Path::new("lib")), "lib");
    }

    #[test]
    fn test_compile_identity() {
        let emitted = compile_source("main", "(x) => x", &CompileOptions::default()).unwrap();
        assert!(emitted.source.ends_with("kv_any_t kv_abs0_f(kv_any_t x) {\n\treturn x;\n}"));
        assert!(emitted.header.contains("kv_any_t kv_abs0_f(kv_any_t x);"));
    }

    #[test]
    fn test_syntax_error_keeps_diagnostics() {
        let err = compile_source("main", "(x", &CompileOptions::default()).unwrap_err();
        let CompileError::Syntax { module, errors } = err else {
            panic!("expected a syntax error, got {err:?}");
        };
        assert_eq!(module, "main");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_free_symbol_fails_resolution() {
        let err = compile_source("main", "(f 1)", &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::Resolve(ResolveError::Unresolved { .. })));
    }

    #[test]
    fn test_core_binding_passes_resolution() {
        let options = CompileOptions {
            core_bindings: vec!["print".to_string()],
            ..CompileOptions::default()
        };
        // Resolution accepts `print`, but the top-level renaming context has
        // no binding for it.
        let err = compile_source("main", "(print 1)", &options).unwrap_err();
        assert!(matches!(err, CompileError::Lower(LowerError::UnresolvedSymbol { .. })));
    }

    #[test]
    fn test_capture_fails_lowering() {
        let err = compile_source("main", "(x) => (y) => (x y)", &CompileOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "unresolved symbol `x`; did you mean `y`?");
    }

    #[test]
    fn test_compile_raw_tree() {
        let json = r#"{
            "kind": "mod",
            "children": [
                { "kind": "abs", "children": [
                    { "kind": "sym", "text": "a" },
                    { "kind": "sym", "text": "a" }
                ] }
            ]
        }"#;
        let emitted = compile_raw("raw", json, &CompileOptions::default()).unwrap();
        assert!(emitted.header.contains("kv_any_t kv_abs0_f(kv_any_t a);"));
    }

    #[test]
    fn test_raw_assign_to_integer_fails_resolution() {
        let json = r#"{
            "kind": "mod",
            "children": [
                { "kind": "let", "children": [
                    { "kind": "int", "text": "1" },
                    { "kind": "int", "text": "2" }
                ] }
            ]
        }"#;
        let err = compile_raw("raw", json, &CompileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Resolve(ResolveError::ExpectedSymbol {
                found: NodeKind::Integer,
                context: "assignment target",
            })
        ));
    }

    #[test]
    fn test_long_integer_compiles() {
        let emitted =
            compile_source("main", "(x) => 99999999999999999999", &CompileOptions::default())
                .unwrap();
        assert!(emitted.source.contains("\treturn 99999999999999999999;\n"));
    }

    #[test]
    fn test_malformed_raw_tree() {
        let err = compile_raw("raw", "{", &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::RawTree(_)));
    }

    #[test]
    fn test_compile_file_writes_artifacts() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("ident.kv");
        fs::write(&source, "(x) => x\n").unwrap();
        let options = CompileOptions {
            out_dir: temp.path().join("out"),
            ..CompileOptions::default()
        };

        let artifacts = compile_file(&source, &options).unwrap();

        assert_eq!(artifacts.header, temp.path().join("out").join("ident.h"));
        let source_text = fs::read_to_string(&artifacts.source).unwrap();
        assert!(source_text.starts_with("#include \"ident.h\"\n\n"));
    }

    #[test]
    fn test_failed_compile_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("bad.kv");
        fs::write(&source, "{ 1 }").unwrap();
        let options = CompileOptions {
            out_dir: temp.path().join("out"),
            ..CompileOptions::default()
        };

        assert!(compile_file(&source, &options).is_err());
        assert!(!options.out_dir.exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = compile_file(Path::new("/nonexistent/file.kv"), &CompileOptions::default())
            .unwrap_err();
        assert!(matches!(err, CompileError::Io(_)));
    }
}
