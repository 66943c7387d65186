use std::fs;

use gdvm_bytecode::{ProgramError, Version};
use gdvm_vm::RuntimeError;

use super::run_common::*;

#[test]
fn assemble_write_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("prog.gd");
    let output = dir.path().join("prog.gdb");
    fs::write(&source, "push 3\npush 4\nadd\nout\nhlt\n").unwrap();

    let program = assemble_file(&source, Version::V2, false).unwrap();
    write_program(&output, &program).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..3], b"GD\x02");
    assert_eq!(bytes.len(), 11 + 21);

    let reloaded = load_bytecode(&output).unwrap();
    let mut out = Vec::new();
    VmOptions::default().build().execute(&reloaded, &mut out).unwrap();
    assert_eq!(out, b"7\n");
}

#[test]
fn assembly_errors_render_with_path_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("bad.gd");
    fs::write(&source, "push 1\nfrob\n").unwrap();

    let err = assemble_file(&source, Version::V2, false).unwrap_err();
    let rendered = err.render(false);
    let path = source.display().to_string();

    insta::assert_snapshot!(rendered.replace(&path, "bad.gd"), @r"
    error: unknown mnemonic `frob`
     --> bad.gd:2:1
      |
    2 | frob
      | ^^^^
    error: could not assemble 'bad.gd': 1 error
    ");
}

#[test]
fn load_program_detects_source_and_bytecode() {
    let dir = tempfile::tempdir().unwrap();

    let source = dir.path().join("prog.gd");
    fs::write(&source, "push 1\nout\n").unwrap();
    let from_source = load_program(&source).unwrap();
    assert_eq!(from_source.body().len(), 10);

    let bytecode = dir.path().join("prog.gdb");
    write_program(&bytecode, &from_source).unwrap();
    let from_bytecode = load_program(&bytecode).unwrap();
    assert_eq!(from_bytecode.body(), from_source.body());
}

#[test]
fn load_program_rejects_binary_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, [0xff, 0xfe, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();

    let err = load_program(&path).unwrap_err();
    assert!(matches!(err, InputError::Program(ProgramError::InvalidMagic)));
    assert_eq!(err.render(false), "error: invalid magic: expected GD");
}

#[test]
fn load_bytecode_reports_header_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v3.gdb");
    let mut bytes = b"GD\x03".to_vec();
    bytes.extend_from_slice(&0u64.to_le_bytes());
    fs::write(&path, bytes).unwrap();

    let err = load_bytecode(&path).unwrap_err();
    assert_eq!(
        err.render(false),
        "error: unsupported version: 3 (expected 1..=2)"
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_bytecode(&dir.path().join("nope.gdb")).unwrap_err();
    assert!(matches!(err, InputError::Read { .. }));
    assert!(err.render(false).starts_with("error: failed to read '"));
}

#[test]
fn vm_options_apply_limits() {
    let options = VmOptions {
        memory: 4,
        fuel: Some(3),
        recursion_limit: 1,
    };
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("loop.gd");
    fs::write(&source, "top: jmp top\n").unwrap();
    let program = assemble_file(&source, Version::V2, false).unwrap();

    let err = options.build().execute(&program, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, RuntimeError::ExecFuelExhausted(3)));

    fs::write(&source, "push 1\npop [4]\n").unwrap();
    let program = assemble_file(&source, Version::V2, false).unwrap();
    let err = options.build().execute(&program, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, RuntimeError::MemoryOutOfBounds { size: 4, .. }));
}

#[test]
fn source_with_invalid_utf8_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("latin1.gd");
    fs::write(&source, b"push 1\n\xff\nout\n").unwrap();

    let err = assemble_file(&source, Version::V2, false).unwrap_err();
    assert!(matches!(err, InputError::InvalidUtf8 { .. }));

    let path = source.display().to_string();
    let rendered = err.render(false).replace(&path, "latin1.gd");
    assert!(rendered.starts_with("error: failed to read 'latin1.gd': not valid UTF-8 ("));
    assert!(rendered.ends_with("from index 7)"));
}
