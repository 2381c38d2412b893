use pretty_assertions::assert_eq;

use rho_ir::SharedInterner;

use super::*;

struct Chain {
    interner: SharedInterner,
    base: Environment,
    global: Environment,
}

fn chain() -> Chain {
    let base = Environment::empty().extend_named("base");
    let global = Environment::new_global(&base);
    Chain {
        interner: SharedInterner::default(),
        base,
        global,
    }
}

fn number(env: &Environment, name: Name) -> Option<f64> {
    env.lookup(name)?.as_vector()?.first_f64()
}

#[test]
fn lookup_walks_enclosures() {
    let c = chain();
    let x = c.interner.intern("x");
    c.base.store(x, Value::number(1.0));
    let inner = c.global.extend().extend();
    assert_eq!(number(&inner, x), Some(1.0));
    assert!(inner.lookup_local(x).is_none());
}

#[test]
fn store_shadows_outer_binding() {
    let c = chain();
    let x = c.interner.intern("x");
    c.global.store(x, Value::number(1.0));
    let frame = c.global.extend();
    frame.store(x, Value::number(2.0));
    assert_eq!(number(&frame, x), Some(2.0));
    assert_eq!(number(&c.global, x), Some(1.0));
}

#[test]
fn clones_share_one_frame() {
    let c = chain();
    let x = c.interner.intern("x");
    let frame = c.global.extend();
    let alias = frame.clone();
    alias.store(x, Value::number(3.0));
    assert_eq!(number(&frame, x), Some(3.0));
    assert!(frame.ptr_eq(&alias));
}

#[test]
fn extend_with_prepopulates() {
    let c = chain();
    let x = c.interner.intern("x");
    let frame = c.global.extend_with([(x, Value::number(4.0))]);
    assert_eq!(frame.symbols(), vec![x]);
}

#[test]
fn superassignment_target_is_nearest_binder() {
    let c = chain();
    let n = c.interner.intern("n");
    let outer = c.global.extend();
    outer.store(n, Value::number(0.0));
    let inner = outer.extend();
    inner.store(n, Value::number(9.0));

    let target = inner.target_for_assignment(n, true).unwrap();
    assert!(target.ptr_eq(&outer));
    // Plain assignment stays local.
    assert!(inner.target_for_assignment(n, false).unwrap().ptr_eq(&inner));
}

#[test]
fn superassignment_falls_back_to_global() {
    let c = chain();
    let g = c.interner.intern("g");
    let inner = c.global.extend().extend();
    assert!(inner.target_for_assignment(g, true).unwrap().ptr_eq(&c.global));
    // From the global environment itself, too.
    assert!(c.global.target_for_assignment(g, true).unwrap().ptr_eq(&c.global));
}

#[test]
fn superassignment_stops_at_a_package() {
    let c = chain();
    let g = c.interner.intern("g");
    let package = Environment::new_package(&c.global, "package:p");
    assert!(package.target_for_assignment(g, true).unwrap().ptr_eq(&package));
    let inner = package.extend();
    assert!(inner.target_for_assignment(g, true).unwrap().ptr_eq(&package));
    assert!(!package.is_global());
}

#[test]
fn superassignment_without_global() {
    let c = chain();
    let g = c.interner.intern("g");
    let detached = c.base.extend();
    assert!(detached.target_for_assignment(g, true).is_none());
}

#[test]
fn global_and_named_ancestors() {
    let c = chain();
    let frame = c.global.extend().extend();
    assert!(frame.get_global().unwrap().ptr_eq(&c.global));
    assert!(c.base.get_global().is_none());
    assert!(frame.get_named_ancestor("base").unwrap().ptr_eq(&c.base));
    assert!(c.global
        .get_named_ancestor("R_GlobalEnv")
        .unwrap()
        .ptr_eq(&c.global));
    assert!(frame.get_named_ancestor("package:stats").is_none());
}

#[test]
fn packages_are_searched_newest_first() {
    let c = chain();
    let f = c.interner.intern("f");
    let first = c.global.extend_named("package:a");
    first.store(f, Value::number(1.0));
    let second = c.global.extend_named("package:b");
    second.store(f, Value::number(2.0));
    c.global.attach_package(Package {
        name: "a".into(),
        env: first,
    });
    c.global.attach_package(Package {
        name: "b".into(),
        env: second,
    });

    let names: Vec<String> = c.global.packages().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(c.global.lookup_in_packages(f), Some(Value::number(2.0)));
}

#[test]
fn debug_shows_name() {
    let c = chain();
    assert_eq!(format!("{:?}", c.global), "<environment: R_GlobalEnv>");
    assert_eq!(format!("{:?}", c.global.extend()), "<environment: 0 bindings>");
}

#[test]
fn weak_link_does_not_keep_alive() {
    let c = chain();
    let frame = c.global.extend();
    let weak = frame.downgrade();
    assert!(weak.upgrade().is_some());
    drop(frame);
    assert!(weak.upgrade().is_none());
}

#[test]
fn tracker_clears_live_environments() {
    let c = chain();
    let x = c.interner.intern("x");
    let frame = c.global.extend();
    frame.store(x, Value::Env(frame.clone()));

    let mut tracker = EnvTracker::default();
    tracker.track(&frame);
    let weak = frame.downgrade();
    drop(frame);
    // The self-reference keeps the frame alive until it is cleared.
    assert!(weak.upgrade().is_some());
    tracker.clear_all();
    assert!(weak.upgrade().is_none());
}
