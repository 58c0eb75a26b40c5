//! Eager consumers over lazy chains.

use cursorflow::prelude::*;

#[test]
fn test_reduce_over_empty_is_initial() {
    assert_eq!(reduce(array_cursor(Vec::<i32>::new()), 0, |a, v| a + v).unwrap(), 0);
    assert_eq!(reduce(array_cursor(vec![1, 2, 3, 4]), 0, |a, v| a + v).unwrap(), 10);
}

#[test]
fn test_first_or_default_with_predicate() {
    let v = first_or_default_where(array_cursor(vec![1, 3, 5]), -1, |v| v % 2 == 0).unwrap();
    assert_eq!(v, -1);
    let v = first_or_default_where(array_cursor(vec![1, 4, 5]), -1, |v| v % 2 == 0).unwrap();
    assert_eq!(v, 4);
}

#[test]
fn test_first_or_default_lazy_fallback() {
    let v = first_or_default(array_cursor(Vec::<u8>::new()), Fallback::lazy(|| 42)).unwrap();
    assert_eq!(v, 42);
}

#[test]
fn test_first_leaves_rest_for_later() {
    let mut c = array_cursor(vec!['a', 'b', 'c']);
    assert_eq!(first(&mut c).unwrap(), Some('a'));
    assert_eq!(first_where(&mut c, |ch| *ch == 'c').unwrap(), Some('c'));
    assert_eq!(first(&mut c).unwrap(), None);
}

#[test]
fn test_to_array_with_limit() {
    let c = array_cursor((1..=10).collect::<Vec<i32>>()).map(|v, _| v * v);
    assert_eq!(to_array(c, Some(4)).unwrap(), vec![1, 4, 9, 16]);
}

#[test]
fn test_consumer_propagates_protocol_error() {
    let mut calls = 0;
    let bad = from_fn(move || {
        calls += 1;
        if calls < 3 {
            RawResult::<i32, ()>::Yielded(calls)
        } else {
            RawResult::Missing
        }
    });
    let err = to_array(bad, None).unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(err.operation(), Operation::Next);
}
