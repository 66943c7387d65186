use super::*;

#[test]
fn index_zero_is_reserved() {
    assert_eq!(Register::from_index(0), None);
    assert_eq!(Register::from_index(9), None);
    assert_eq!(Register::from_index(255), None);
}

#[test]
fn banks_split_at_five() {
    assert_eq!(Register::from_index(1), Some(Register::Address(0)));
    assert_eq!(Register::from_index(4), Some(Register::Address(3)));
    assert_eq!(Register::from_index(5), Some(Register::Value(0)));
    assert_eq!(Register::from_index(8), Some(Register::Value(3)));
}

#[test]
fn every_index_roundtrips() {
    for index in 1..=8 {
        let reg = Register::from_index(index).unwrap();
        assert_eq!(reg.index(), index);
        assert_eq!(Register::from_name(reg.name()), Some(reg));
    }
}

#[test]
fn names_are_case_sensitive() {
    assert_eq!(Register::from_name("rax"), Some(Register::Address(0)));
    assert_eq!(Register::from_name("rhx"), Some(Register::Value(3)));
    assert_eq!(Register::from_name("RAX"), None);
    assert_eq!(Register::from_name("empty"), None);
    assert_eq!(Register::from_name("rix"), None);
}

#[test]
fn out_of_table_slot() {
    assert_eq!(Register::Address(4).index(), 0);
    assert_eq!(Register::Value(9).name(), "r??");
}

#[test]
fn register_kinds() {
    assert!(Register::Address(2).is_address());
    assert!(!Register::Value(2).is_address());
    assert_eq!(Register::Value(1).to_string(), "rfx");
}
