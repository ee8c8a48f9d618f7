use super::*;
use pretty_assertions::assert_eq;

fn n(text: &str) -> Name {
    Name::from(text)
}

#[test]
fn put_and_get() {
    let env = Environment::new();
    env.put(n("x"), Value::number(42.0));
    assert_eq!(env.get("x"), Some(Value::number(42.0)));
    assert_eq!(env.get("y"), None);
}

#[test]
fn put_replaces_in_same_frame() {
    let env = Environment::new();
    env.put(n("x"), Value::number(1.0));
    env.put(n("x"), Value::number(2.0));
    assert_eq!(env.get("x"), Some(Value::number(2.0)));
    assert_eq!(env.names(), vec![n("x")]);
}

#[test]
fn child_shadows_parent() {
    let root = Environment::new();
    root.put(n("x"), Value::number(1.0));
    let child = root.child();
    child.put(n("x"), Value::number(2.0));

    assert_eq!(child.get("x"), Some(Value::number(2.0)));
    assert_eq!(root.get("x"), Some(Value::number(1.0)));
    assert_eq!(child.get_at(1, "x"), Some(Value::number(1.0)));
}

#[test]
fn get_at_only_looks_at_one_frame() {
    let root = Environment::new();
    root.put(n("x"), Value::number(1.0));
    let child = root.child();
    assert_eq!(child.get_at(0, "x"), None);
    assert_eq!(child.get_at(1, "x"), Some(Value::number(1.0)));
    assert_eq!(child.get_at(2, "x"), None);
}

#[test]
fn assign_updates_nearest_binding() {
    let root = Environment::new();
    root.put(n("x"), Value::number(1.0));
    let child = root.child();

    assert_eq!(child.assign("x", Value::number(5.0)), Ok(()));
    assert_eq!(root.get("x"), Some(Value::number(5.0)));
    assert!(child.names().is_empty());
}

#[test]
fn assign_to_unbound_fails() {
    let env = Environment::new().child();
    assert_eq!(env.assign("nope", Value::unit()), Err(Undefined));
    assert_eq!(env.get("nope"), None);
}

#[test]
fn assign_at_targets_exact_frame() {
    let root = Environment::new();
    root.put(n("x"), Value::number(1.0));
    let child = root.child();
    child.put(n("x"), Value::number(2.0));

    assert_eq!(child.assign_at(1, "x", Value::number(10.0)), Ok(()));
    assert_eq!(child.get("x"), Some(Value::number(2.0)));
    assert_eq!(root.get("x"), Some(Value::number(10.0)));
    assert_eq!(child.assign_at(0, "y", Value::unit()), Err(Undefined));
    assert_eq!(child.assign_at(3, "x", Value::unit()), Err(Undefined));
}

#[test]
fn depth_and_ancestors() {
    let root = Environment::new();
    let mid = root.child();
    let leaf = mid.child();

    assert_eq!(root.depth(), 0);
    assert_eq!(leaf.depth(), 2);
    assert!(leaf.ancestor(0).is_some_and(|e| e.ptr_eq(&leaf)));
    assert!(leaf.ancestor(2).is_some_and(|e| e.ptr_eq(&root)));
    assert!(leaf.ancestor(3).is_none());
    assert!(leaf.parent().is_some_and(|e| e.ptr_eq(&mid)));

    let frames = leaf.frames();
    assert_eq!(frames.len(), 3);
    assert!(frames[0].ptr_eq(&root));
    assert!(frames[2].ptr_eq(&leaf));
}

#[test]
fn bindings_snapshot_is_sorted() {
    let env = Environment::new();
    env.put(n("b"), Value::number(2.0));
    env.put(n("a"), Value::number(1.0));
    let names: Vec<_> = env.bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![n("a"), n("b")]);
}

#[test]
fn clones_share_the_frame() {
    let env = Environment::new();
    let alias = env.clone();
    alias.put(n("x"), Value::unit());
    assert_eq!(env.get("x"), Some(Value::unit()));
    assert!(env.ptr_eq(&alias));
}
