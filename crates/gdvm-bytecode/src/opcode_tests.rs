use super::*;

#[test]
fn opcode_numbering() {
    assert_eq!(Opcode::Hlt as u8, 0);
    assert_eq!(Opcode::Out as u8, 6);
    assert_eq!(Opcode::Pop as u8, 8);
    assert_eq!(Opcode::Sqrt as u8, 12);
    assert_eq!(Opcode::Jne as u8, 18);
}

#[test]
fn opcode_from_u8_gaps() {
    assert_eq!(Opcode::from_u8(7), None);
    assert_eq!(Opcode::from_u8(19), None);
    assert_eq!(Opcode::from_u8(31), None);
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_u8(op as u8), Some(op));
    }
}

#[test]
fn mnemonic_lookup_ignores_case() {
    assert_eq!(Opcode::from_mnemonic("push"), Some(Opcode::Push));
    assert_eq!(Opcode::from_mnemonic("PUSH"), Some(Opcode::Push));
    assert_eq!(Opcode::from_mnemonic("JaE"), Some(Opcode::Jae));
    assert_eq!(Opcode::from_mnemonic("pusha"), None);
    assert_eq!(Opcode::from_mnemonic(""), None);
}

#[test]
fn operand_shapes() {
    assert!(Opcode::Push.has_operand());
    assert!(Opcode::Pop.has_operand());
    assert!(!Opcode::Add.has_operand());

    assert!(Opcode::Call.has_target());
    assert!(Opcode::Jbe.has_target());
    assert!(!Opcode::Ret.has_target());
}

#[test]
fn legacy_subset() {
    assert!(Opcode::Push.is_supported(Version::V1));
    assert!(Opcode::Out.is_supported(Version::V1));
    assert!(!Opcode::Pop.is_supported(Version::V1));
    assert!(!Opcode::Jmp.is_supported(Version::V1));
    assert!(Opcode::Jmp.is_supported(Version::V2));
}

#[test]
fn op_byte_packs_flags() {
    let mode = Mode {
        num: true,
        reg: true,
        mem: true,
    };
    let byte = OpByte::with_mode(Opcode::Push, mode).to_byte();
    assert_eq!(byte, 0x01 | NUM_ARG | REG_ARG | MEM_ARG);
    assert_eq!(byte, 0xE1);

    let decoded = OpByte::from_byte(byte).unwrap();
    assert_eq!(decoded.opcode, Opcode::Push);
    assert_eq!(decoded.mode, mode);
}

#[test]
fn op_byte_single_flags() {
    assert_eq!(OpByte::from_byte(0x21).unwrap().mode, Mode { num: true, ..Mode::NONE });
    assert_eq!(OpByte::from_byte(0x48).unwrap().mode, Mode { reg: true, ..Mode::NONE });
    assert_eq!(OpByte::from_byte(0x48).unwrap().opcode, Opcode::Pop);
    assert!(OpByte::from_byte(0x0B).unwrap().mode.is_empty());
}

#[test]
fn op_byte_rejects_undefined() {
    assert_eq!(OpByte::from_byte(0x07), Err(0x07));
    assert_eq!(OpByte::from_byte(0x27), Err(0x27));
    assert_eq!(OpByte::from_byte(0x1F), Err(0x1F));
}
