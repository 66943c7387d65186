use super::*;

fn body(instrs: &[Instruction]) -> Vec<u8> {
    let mut out = Vec::new();
    for instr in instrs {
        instr.encode(Version::V2, &mut out);
    }
    out
}

#[test]
fn from_body_roundtrip() {
    let code = body(&[Instruction::Push(Operand::imm(1.0)), Instruction::Out]);
    let program = Program::from_body(Version::V2, &code);

    assert_eq!(program.body(), code.as_slice());
    assert_eq!(program.header().body_len, code.len() as u64);

    let reloaded = Program::from_bytes(program.as_bytes().to_vec()).unwrap();
    assert_eq!(reloaded.version(), Version::V2);
    assert_eq!(reloaded.body(), code.as_slice());
}

#[test]
fn rejects_short_file() {
    let err = Program::from_bytes(b"GD\x02".to_vec()).unwrap_err();
    assert!(matches!(err, ProgramError::TooShort(3)));
    assert_eq!(err.to_string(), "file too small: 3 bytes (minimum 11)");
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = Program::from_body(Version::V2, &[0]).into_bytes();
    bytes[0] = b'X';
    let err = Program::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, ProgramError::InvalidMagic));
}

#[test]
fn rejects_error_marker() {
    let mut bytes = Program::from_body(Version::V2, &[0]).into_bytes();
    bytes[2] = 0;
    let err = Program::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, ProgramError::AssembledWithErrors));
}

#[test]
fn rejects_future_version() {
    let mut bytes = Program::from_body(Version::V2, &[0]).into_bytes();
    bytes[2] = 3;
    let err = Program::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, ProgramError::UnsupportedVersion(3)));
    assert_eq!(err.to_string(), "unsupported version: 3 (expected 1..=2)");
}

#[test]
fn rejects_length_mismatch() {
    let mut bytes = Program::from_body(Version::V2, &[0, 0]).into_bytes();
    bytes.push(0);
    let err = Program::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        ProgramError::LengthMismatch {
            header: 2,
            actual: 3
        }
    ));
}

#[test]
fn empty_body_is_valid() {
    let program = Program::from_bytes(Program::from_body(Version::V1, &[]).into_bytes()).unwrap();
    assert_eq!(program.version(), Version::V1);
    assert!(program.body().is_empty());
    assert_eq!(program.instructions().count(), 0);
}

#[test]
fn decode_at_returns_next_offset() {
    let code = body(&[
        Instruction::Push(Operand::imm(2.0)),
        Instruction::Jmp(0),
        Instruction::Hlt,
    ]);
    let program = Program::from_body(Version::V2, &code);

    assert_eq!(
        program.decode_at(0).unwrap(),
        (Instruction::Push(Operand::imm(2.0)), 9)
    );
    assert_eq!(program.decode_at(9).unwrap(), (Instruction::Jmp(0), 14));
    assert_eq!(program.decode_at(14).unwrap(), (Instruction::Hlt, 15));
}

#[test]
fn instructions_stop_after_error() {
    let mut code = body(&[Instruction::Add]);
    code.push(0x07);
    code.push(0x00);
    let program = Program::from_body(Version::V2, &code);

    let items: Vec<_> = program.instructions().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], Ok((0, Instruction::Add)));
    assert_eq!(
        items[1],
        Err(DecodeError::UndefinedCommand {
            byte: 0x07,
            offset: 1
        })
    );
}

#[test]
fn from_path_reports_io_error() {
    let err = Program::from_path("/nonexistent/dir/prog.gdb").unwrap_err();
    assert!(matches!(err, ProgramError::Io(_)));
}
