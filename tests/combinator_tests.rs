//! Lazy combinators and how they forward early termination.

use cursorflow::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn collect<C: Cursor>(cursor: C) -> Vec<C::Yield> {
    to_array(cursor, None).unwrap()
}

#[test]
fn test_filter_keeps_even_values() {
    let c = filter(array_cursor(vec![1, 2, 3, 4, 5]), |v: &i32, _| v % 2 == 0);
    assert_eq!(collect(c), vec![2, 4]);
}

#[test]
fn test_map_passes_terminal_value_unmapped() {
    let factory = ArrayFactory::new(vec![1, 2]);
    let mut c = map(
        factory.iterator(ArrayOptions::<i32, &str, (), ()>::new().end_value("X")),
        |v: i32, _| v.to_string(),
    );
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending("1".to_string()));
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending("2".to_string()));
    assert_eq!(c.next(None).unwrap(), IterationResult::Done(Some("X")));
}

#[test]
fn test_limit_zero_and_three() {
    assert!(collect(limit(array_cursor(vec![1, 2, 3]), 0)).is_empty());

    let mut c = limit(array_cursor((1..=100).collect::<Vec<i32>>()), 3);
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending(1));
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending(2));
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending(3));
    assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
}

#[test]
fn test_reiterate_observes_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let c = array_cursor(vec![3, 1, 2])
        .reiterate(move |v, _| sink.borrow_mut().push(*v))
        .filter(|v, _| *v > 1);
    assert_eq!(collect(c), vec![3, 2]);
    assert_eq!(*log.borrow(), vec![3, 1, 2]);
}

#[test]
fn test_stop_propagates_through_chain() {
    let factory = ArrayFactory::new(vec![1, 2, 3, 4]);
    let source = factory.iterator(ArrayOptions::<i32, &str, (), ()>::new().handle_return(true));
    let mut c = source
        .filter(|v, _| v % 2 == 0)
        .map(|v, _| v * 10)
        .limit(10);
    assert!(c.capabilities().stop);
    assert!(!c.capabilities().abort);
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending(20));
    assert_eq!(c.stop(Some("halt")).unwrap(), IterationResult::Done(Some("halt")));
    assert_eq!(c.next(None).unwrap(), IterationResult::Done(Some("halt")));
}

#[test]
fn test_abort_recovery_through_relay() {
    let factory = ArrayFactory::new(vec![1, 2, 3]);
    let source = factory.iterator(ArrayOptions::<i32, (), (), bool>::new().on_throw(
        |fatal: Option<bool>| {
            if fatal == Some(true) {
                IterationResult::<i32, ()>::finished()
            } else {
                IterationResult::Pending(0)
            }
        },
    ));
    let mut c = source.filter(|_, _| true);
    assert_eq!(c.abort(Some(false)).unwrap(), IterationResult::Pending(0));
    assert_eq!(c.next(None).unwrap(), IterationResult::Pending(1));
    assert_eq!(c.abort(Some(true)).unwrap(), IterationResult::Done(None));
    assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
}

#[test]
fn test_wrappers_reject_unadvertised_stop_and_abort() {
    let bare = array_cursor(vec![1, 2, 3]);
    let mut c = bare.filter(|_, _| true).map(|v, _| v * 2).limit(5);
    assert_eq!(c.capabilities(), Capabilities::NONE);
    assert_eq!(c.stop(None).unwrap_err(), Error::unsupported(Operation::Return));
    assert_eq!(c.abort(None).unwrap_err(), Error::unsupported(Operation::Throw));
    // The rejected calls leave the chain running.
    assert_eq!(collect(&mut c), vec![2, 4, 6]);

    let mut f = array_cursor(vec![1]).filter(|_, _| true);
    assert_eq!(f.stop(None).unwrap_err(), Error::unsupported(Operation::Return));
    assert_eq!(f.next(None).unwrap(), IterationResult::Pending(1));
}

#[test]
fn test_custom_relay_step() {
    // Yields every value twice.
    let mut pending: Option<i32> = None;
    let step = move |source: &mut ArrayCursor<i32>,
                     termination: &mut Termination<()>,
                     arg: Option<()>|
          -> Result<IterationResult<i32, ()>> {
        if let Some(v) = pending.take() {
            return Ok(IterationResult::Pending(v));
        }
        let result = termination.observe(source.next(arg)?);
        if let IterationResult::Pending(v) = result {
            pending = Some(v);
        }
        Ok(result)
    };
    let c = relay(array_cursor(vec![1, 2]), step);
    assert_eq!(collect(c), vec![1, 1, 2, 2]);
}

#[test]
fn test_iterator_interop() {
    let c = from_iter(0..10).filter(|v, _| v % 3 == 0);
    let mut results = into_results(c);
    let values: Vec<i32> = results.by_ref().map(|r| r.unwrap()).collect();
    assert_eq!(values, vec![0, 3, 6, 9]);
    assert!(results.is_exhausted());
    assert_eq!(results.terminal(), None);
}
