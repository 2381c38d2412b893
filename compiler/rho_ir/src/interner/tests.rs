use super::*;

#[test]
fn interning_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("mean");
    let b = interner.intern("mean");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "mean");
}

#[test]
fn distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("y");
    assert_ne!(a, b);
    assert_eq!(interner.lookup(b), "y");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("names<-"), None);
    let name = interner.intern("names<-");
    assert_eq!(interner.get("names<-"), Some(name));
}

#[test]
fn shared_interner_sees_same_table() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("seq");
    assert_eq!(other.lookup(name), "seq");
}
