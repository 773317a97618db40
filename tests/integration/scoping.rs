//! Synchronous scoping: default fallback, override and nesting precedence,
//! return-value transparency.

use ambient_context::{create_context, create_runner, depth, lookup, perform, Runner};
use std::panic::{self, AssertUnwindSafe};

#[test]
fn test_default_fallback_outside_any_runner() {
    let age = create_context(30u32);
    let name = create_context(String::from("Marcel"));
    assert_eq!(perform(&age), 30);
    assert_eq!(perform(&name), "Marcel");
}

#[test]
fn test_override_precedence() {
    let age = create_context(30u32);
    let run = create_runner([age.with(29)]).unwrap();
    assert_eq!(run.run(|| perform(&age)), 29);
    // scope ended
    assert_eq!(perform(&age), 30);
}

#[test]
fn test_child_inherits_parent_override() {
    let age = create_context(30u32);
    let name = create_context(String::from("Marcel"));
    let r1 = create_runner([age.with(29)]).unwrap();
    let r2 = create_runner([name.with("Not Marcel".to_string())]).unwrap();

    let (seen_age, seen_name) = r1.run(|| r2.run(|| (perform(&age), perform(&name))));
    assert_eq!(seen_age, 29);
    assert_eq!(seen_name, "Not Marcel");
}

#[test]
fn test_nearest_override_wins() {
    let age = create_context(30u32);
    let r1 = create_runner([age.with(29)]).unwrap();
    let r2 = create_runner([age.with(41)]).unwrap();

    let (inner, after_inner) = r1.run(|| (r2.run(|| perform(&age)), perform(&age)));
    assert_eq!(inner, 41);
    assert_eq!(after_inner, 29);
}

#[test]
fn test_equal_defaults_do_not_alias() {
    let a = create_context(0i64);
    let b = create_context(0i64);
    let run = create_runner([a.with(7)]).unwrap();
    assert_eq!(run.run(|| (perform(&a), perform(&b))), (7, 0));
}

#[test]
fn test_last_duplicate_pair_wins() {
    let age = create_context(30u32);
    let run = create_runner([age.with(1), age.with(2), age.with(3)]).unwrap();
    assert_eq!(run.run(|| perform(&age)), 3);
}

#[test]
fn test_runner_reuse_is_independent() {
    let age = create_context(30u32);
    let run = create_runner([age.with(29)]).unwrap();

    let first = run.run(|| perform(&age));
    let nested = run.run(|| run.run(depth));
    let second = run.run(|| perform(&age));

    assert_eq!(first, 29);
    assert_eq!(nested, 2);
    assert_eq!(second, 29);
}

#[test]
fn test_return_value_transparency() {
    let run = Runner::empty();
    assert_eq!(run.run(|| "A return value"), "A return value");

    let result: Result<u8, String> = run.run(|| Err("failed".to_string()));
    assert_eq!(result, Err("failed".to_string()));

    let values = run.run(|| vec![1, 2, 3]);
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_scope_restored_after_panic() {
    let age = create_context(30u32);
    let outer = create_runner([age.with(29)]).unwrap();
    let inner = create_runner([age.with(99)]).unwrap();

    let after = outer.run(|| {
        let caught = panic::catch_unwind(AssertUnwindSafe(|| {
            inner.run(|| panic!("callback failed"))
        }));
        assert!(caught.is_err());
        perform(&age)
    });
    assert_eq!(after, 29);
    assert_eq!(lookup(&age), None);
}

#[test]
fn test_lookup_matches_perform_fallback() {
    let age = create_context(30u32);
    let run = create_runner([age.with(30)]).unwrap();

    // an override equal to the default is still an override
    assert_eq!(run.run(|| lookup(&age)), Some(30));
    assert_eq!(lookup(&age), None);
}
