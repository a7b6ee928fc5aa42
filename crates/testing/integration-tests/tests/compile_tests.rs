//! End-to-end compilation tests
//!
//! Runs every program in `test-programs/` through the driver and compares the
//! emitted files with the expectations stored next to it.

use expect_test::{expect, expect_file};
use integration_tests::{compile_inline, load_programs};
use kv_codegen::{CodegenConfig, LowerError};
use kv_driver::{CompileError, CompileOptions, SourceFormat};
use kv_span::Span;
use kv_syntax::{RawNode, kinds};
use std::fs;

#[test]
fn test_all_programs() {
    let programs = load_programs().unwrap();
    assert!(!programs.is_empty(), "no test programs found");

    let mut failures = Vec::new();
    for program in &programs {
        let emitted = match program.compile(&CompileOptions::default()) {
            Ok(emitted) => emitted,
            Err(err) => {
                failures.push(format!("{}: {err:#}", program.name));
                continue;
            }
        };
        if emitted.header != program.expected_header().unwrap() {
            failures.push(format!("{}: header differs:\n{}", program.name, emitted.header));
        }
        if emitted.source != program.expected_source().unwrap() {
            failures.push(format!("{}: source differs:\n{}", program.name, emitted.source));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn test_identity_snapshot() {
    let emitted = compile_inline("(x) => x").unwrap();
    expect_file!["../test-programs/identity/expected.h"].assert_eq(&emitted.header);
    expect_file!["../test-programs/identity/expected.c"].assert_eq(&emitted.source);
}

#[test]
fn test_nested_lambda_snapshot() {
    let emitted = compile_inline("(f x) => ((y) => y (f x))").unwrap();
    expect_file!["../test-programs/nested/expected.c"].assert_eq(&emitted.source);
}

#[test]
fn test_every_lambda_gets_one_function() {
    let emitted = compile_inline("(a) => ((b) => ((c) => c b) a)").unwrap();
    for index in 0..3 {
        let name = format!("kv_abs{index}_f(");
        assert_eq!(emitted.header.matches(&name).count(), 1, "{name}");
        assert_eq!(emitted.source.matches(&format!("kv_any_t {name}")).count(), 1, "{name}");
    }
    assert!(!emitted.header.contains("kv_abs3_f"));
}

#[test]
fn test_identity_body_is_exact() {
    let emitted = compile_inline("(x) => x").unwrap();
    assert!(emitted.source.contains("{\n\treturn x;\n}"));
}

#[test]
fn test_long_integer_literal() {
    let emitted = compile_inline("(x) => 99999999999999999999").unwrap();
    expect![[r#"
        #include "main.h"

        kv_any_t kv_abs0_f(kv_any_t x) {
        	return 99999999999999999999;
        }"#]]
    .assert_eq(&emitted.source);
}

#[test]
fn test_write_artifacts_to_directory() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("lib.kv");
    fs::write(&source, "(x) => x").unwrap();
    let options = CompileOptions {
        out_dir: temp.path().join("build"),
        ..CompileOptions::default()
    };

    let artifacts = kv_driver::compile_file(&source, &options).unwrap();

    let header = fs::read_to_string(artifacts.header).unwrap();
    let source_text = fs::read_to_string(artifacts.source).unwrap();
    assert!(header.starts_with("// auto generated\n#ifndef __LIB_H_\n"));
    assert!(header.ends_with("\n\n#endif // __LIB_H_\n"));
    assert!(source_text.starts_with("#include \"lib.h\"\n\n"));
}

#[test]
fn test_explicit_module_name() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("input.kv");
    fs::write(&source, "(x) => x").unwrap();
    let options = CompileOptions {
        out_dir: temp.path().to_path_buf(),
        name: Some("renamed".to_string()),
        ..CompileOptions::default()
    };

    let artifacts = kv_driver::compile_file(&source, &options).unwrap();

    assert_eq!(artifacts.header, temp.path().join("renamed.h"));
    assert_eq!(artifacts.source, temp.path().join("renamed.c"));
}

#[test]
fn test_raw_tree_matches_parsed_source() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("main.json");
    fs::write(&source, identity_raw_tree()).unwrap();
    let options = CompileOptions {
        out_dir: temp.path().join("out"),
        format: SourceFormat::RawTree,
        ..CompileOptions::default()
    };

    let artifacts = kv_driver::compile_file(&source, &options).unwrap();

    let expected = compile_inline("(x) => x").unwrap();
    assert_eq!(fs::read_to_string(artifacts.header).unwrap(), expected.header);
    assert_eq!(fs::read_to_string(artifacts.source).unwrap(), expected.source);
}

fn identity_raw_tree() -> String {
    let param = RawNode::leaf(kinds::SYMBOL, "x", Span::default());
    let body = param.clone();
    let lambda = RawNode::branch(kinds::LAMBDA, Span::default(), vec![body, param]);
    RawNode::branch(kinds::MODULE, Span::default(), vec![lambda])
        .to_json()
        .unwrap()
}

#[test]
fn test_custom_codegen_naming() {
    let options = CompileOptions {
        codegen: CodegenConfig {
            any_type: "obj".to_string(),
            function_prefix: "fn_".to_string(),
            function_suffix: String::new(),
        },
        ..CompileOptions::default()
    };
    let emitted = kv_driver::compile_source("m", "(x) => x", &options).unwrap();
    expect![[r#"
        #include "m.h"

        obj fn_0(obj x) {
        	return x;
        }"#]]
    .assert_eq(&emitted.source);
}

#[test]
fn test_syntax_error() {
    let err = compile_inline("(x) =>").unwrap_err();
    expect!["syntax error in module `main`"].assert_eq(&err.to_string());
    assert!(matches!(err, CompileError::Syntax { errors, .. } if errors.len() == 1));
}

#[test]
fn test_unbound_symbol() {
    let err = compile_inline("(x) => (y z)").unwrap_err();
    expect!["unresolved symbol `y`; did you mean `x`?"].assert_eq(&err.to_string());
}

#[test]
fn test_closure_capture_is_rejected() {
    let err = compile_inline("(x) => (y) => (x y)").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Lower(LowerError::UnresolvedSymbol { ref name, .. }) if name == "x"
    ));
}

#[test]
fn test_block_is_not_lowered() {
    let err = compile_inline("{ a = 1; a }").unwrap_err();
    expect!["cannot lower a `blk` node"].assert_eq(&err.to_string());
}

#[test]
fn test_unknown_raw_kind() {
    let raw = RawNode::branch(
        kinds::MODULE,
        Span::default(),
        vec![RawNode::leaf("str", "hello", Span::default())],
    );
    let err = kv_driver::compile_raw("main", &raw.to_json().unwrap(), &CompileOptions::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Instantiate(_)));
}
