//! End-to-end pipeline behavior: laziness, composition, terminals, errors.


use lazyq::{
    BoxedEnumerator, Comparison, Enumerable, Equality, Error, PullTracker, QueryConfig,
    SinglePassPolicy, SliceCursor,
};
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use test_data_gen::pets;

#[test]
fn test_building_a_pipeline_touches_nothing() {
    let tracker = PullTracker::new();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let source = Enumerable::from_vec((1..=100).collect::<Vec<i32>>()).tracked(&tracker);

    let pipeline = source
        .filter(move |x| {
            seen.set(seen.get() + 1);
            x % 3 == 0
        })
        .map(|x| x * 2)
        .skip(1)
        .distinct()
        .concat(&source.take(5))
        .order_by(|x| -x)
        .reverse()
        .chunk(4)
        .expect("valid size");

    assert_eq!(tracker.cursors(), 0);
    assert_eq!(tracker.advances(), 0);
    assert_eq!(calls.get(), 0);

    assert!(pipeline.any());
    assert!(tracker.advances() > 0);
}

#[test]
fn test_selector_runs_once_per_pulled_element() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let seq = Enumerable::from_vec(vec![1, 2, 3, 4, 5]).map(move |x| {
        seen.set(seen.get() + 1);
        x + 1
    });
    assert_eq!(seq.take(2).to_vec(), vec![2, 3]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_take_does_not_over_read() {
    let tracker = PullTracker::new();
    let seq = Enumerable::from_iterable(vec![1, 2, 3, 4, 5]).tracked(&tracker);
    assert_eq!(seq.take(2).to_vec(), vec![1, 2]);
    assert_eq!(tracker.advances(), 2);

    tracker.reset();
    assert_eq!(seq.take_while(|x| *x < 3).to_vec(), vec![1, 2]);
    assert_eq!(tracker.advances(), 3);
}

#[test]
fn test_count_fast_path_never_advances() {
    let factory_calls = Rc::new(Cell::new(0));
    let spy = Rc::clone(&factory_calls);
    let seq = Enumerable::from_factory_sized(3, move || -> BoxedEnumerator<i32> {
        spy.set(spy.get() + 1);
        Box::new(SliceCursor::new(vec![1, 2, 3].into()))
    });
    assert_eq!(seq.count(), 3);
    assert_eq!(factory_calls.get(), 0);

    let tracker = PullTracker::new();
    let arr = Enumerable::from_vec(vec![1, 2, 3]).tracked(&tracker);
    assert_eq!(arr.count(), 3);
    assert_eq!(Enumerable::from_chars("abc").count(), 3);
    assert_eq!(tracker.cursors(), 0);
    assert_eq!(tracker.advances(), 0);
}

#[test]
fn test_where_select_composition() {
    let nums = Enumerable::from_vec(vec![1, 2, 3, 4, 5]);
    assert_eq!(nums.filter(|x| *x > 2).to_vec(), vec![3, 4, 5]);
    assert_eq!(Enumerable::from_vec(vec![1, 2, 3]).map(|x| x + 1).to_vec(), vec![2, 3, 4]);
    assert_eq!(nums.filter(|x| *x > 2).map(|x| x + 1).to_vec(), vec![4, 5, 6]);
    assert_eq!(nums.map(|x| x + 1).filter(|x| *x > 2).to_vec(), vec![3, 4, 5, 6]);
}

#[test]
fn test_single_and_defaults() {
    assert_eq!(
        Enumerable::<i32>::empty().single(),
        Err(Error::EmptySequence { op: "single" })
    );
    assert_eq!(
        Enumerable::from_vec(vec![1, 2]).single(),
        Err(Error::AmbiguousMatch { op: "single" })
    );
    assert_eq!(Enumerable::from_vec(vec![1]).single(), Ok(1));
    assert_eq!(Enumerable::from_vec(vec![1, 2]).single_or_default(None), None);
}

#[test]
fn test_chunk_boundaries() {
    let seq = Enumerable::from_vec(vec![1, 2, 3, 4, 5]);
    assert_eq!(
        seq.chunk(2).expect("valid size").to_vec(),
        vec![vec![1, 2], vec![3, 4], vec![5]]
    );
    assert!(Enumerable::<i32>::empty()
        .chunk(2)
        .expect("valid size")
        .to_vec()
        .is_empty());
    assert!(matches!(
        seq.chunk(0),
        Err(Error::OutOfRange { param: "size", .. })
    ));
    assert_eq!(
        seq.chunk_or_default(2, Some(vec![0])).expect("valid size").to_vec(),
        vec![Some(vec![1, 2]), Some(vec![3, 4]), Some(vec![0])]
    );
}

#[test]
fn test_flat_map_drains_inner_first() {
    let seq = Enumerable::from_vec(vec![1, 2, 3]);
    let out = seq
        .flat_map_with(|n| Enumerable::repeat(*n, *n as usize), |n, m| n * 10 + m)
        .to_vec();
    assert_eq!(out, vec![11, 22, 22, 33, 33, 33]);
}

#[test]
fn test_set_operators() {
    let a = Enumerable::from_vec(vec![1, 2, 2, 3, 4]);
    let b = Enumerable::from_vec(vec![3, 4, 5, 5]);
    assert_eq!(a.distinct().to_vec(), vec![1, 2, 3, 4]);
    assert_eq!(a.except(&b).to_vec(), vec![1, 2, 2]);
    assert_eq!(a.intersect(&b).to_vec(), vec![3, 4]);
    assert_eq!(a.union(&b).to_vec(), vec![1, 2, 3, 4, 5]);

    let words = Enumerable::from_vec(vec!["apple", "Avocado", "banana"]);
    let by_initial = words.distinct_by_with(
        |w| w.chars().next().unwrap_or(' '),
        Equality::new(|a: &char, b: &char| a.eq_ignore_ascii_case(b)),
    );
    assert_eq!(by_initial.to_vec(), vec!["apple", "banana"]);
}

#[test]
fn test_combining_operators() {
    let a = Enumerable::from_vec(vec![1, 2, 3]);
    assert_eq!(a.prepend(0).append(4).to_vec(), vec![0, 1, 2, 3, 4]);
    assert_eq!(
        a.zip(&Enumerable::from_chars("xy"), |n, c| format!("{n}{c}")).to_vec(),
        vec!["1x".to_string(), "2y".to_string()]
    );
    assert_eq!(Enumerable::<i32>::empty().default_if_empty(7).to_vec(), vec![7]);
}

#[test]
fn test_trailing_windows() {
    let seq = Enumerable::range(1, 6).expect("valid range");
    assert_eq!(seq.take_last(2).expect("re-iterable").to_vec(), vec![4, 5]);
    assert_eq!(seq.skip_last(2).expect("re-iterable").to_vec(), vec![1, 2, 3]);
    assert_eq!(seq.skip(3).to_vec(), vec![4, 5]);
    assert_eq!(seq.skip_while(|x| *x < 4).to_vec(), vec![4, 5]);
}

#[test]
fn test_trailing_window_over_one_shot_source() {
    let once = Enumerable::from_iter_once(1..=5);
    assert_eq!(
        once.take_last(2).map(|_| ()),
        Err(Error::SinglePass { op: "take_last" })
    );

    let buffered = Enumerable::from_iter_once(1..=5)
        .with_config(QueryConfig::default().with_single_pass(SinglePassPolicy::Buffer));
    assert_eq!(buffered.skip_last(3).expect("buffered").to_vec(), vec![1, 2]);
}

#[test]
fn test_aggregation_terminals() {
    let ages = pets().map(|p| p.age);
    assert_eq!(ages.max(), Ok(8.3));
    assert_eq!(pets().min_by(|p| p.age).map(|p| p.name), Ok("Whiskers"));
    assert_eq!(
        pets()
            .max_by_with(|p| p.name.len(), &Comparison::natural())
            .map(|p| p.name),
        Ok("Whiskers")
    );
    let total = Enumerable::from_vec(vec![1, 2, 3, 4]).sum();
    assert_eq!(total, Ok(10));
    assert_eq!(
        Enumerable::from_vec(vec!["a", "b", "c"]).aggregate_with(
            String::new(),
            |acc, s| acc + *s,
            |s| s.to_uppercase()
        ),
        "ABC"
    );
}

#[test]
fn test_of_type_filters_by_runtime_type() {
    let mixed: Enumerable<Rc<dyn Any>> = Enumerable::from_vec(vec![
        Rc::new(1i32) as Rc<dyn Any>,
        Rc::new("two") as Rc<dyn Any>,
        Rc::new(3i32) as Rc<dyn Any>,
    ]);
    assert_eq!(mixed.of_type::<i32>().to_vec(), vec![1, 3]);
    assert_eq!(mixed.of_type::<&str>().to_vec(), vec!["two"]);
}

#[test]
fn test_indexed_variants() {
    let seq = Enumerable::from_vec(vec!['a', 'b', 'c', 'd']);
    assert_eq!(seq.filter_indexed(|_, i| i % 2 == 0).to_vec(), vec!['a', 'c']);
    assert_eq!(
        seq.map_indexed(|c, i| format!("{i}{c}")).join_by(" "),
        "0a 1b 2c 3d"
    );
}

#[test]
fn test_element_access() {
    let names = pets().map(|p| p.name);
    assert_eq!(names.first(), Ok("Barley"));
    assert_eq!(names.last(), Ok("Daisy"));
    assert_eq!(names.element_at(2), Ok("Whiskers"));
    assert_eq!(names.first_where(|n| n.starts_with('D')), Ok("Daisy"));
    assert_eq!(
        names.last_where(|n| n.starts_with('Z')),
        Err(Error::NoMatch { op: "last" })
    );
    assert!(names.sequence_equal(&Enumerable::from_vec(vec![
        "Barley", "Boots", "Whiskers", "Daisy"
    ])));
}

#[test]
fn test_facade_reexports_member_crates() {
    // `core` must still name the language crate next to the facade modules.
    let cfg = lazyq::query_core::QueryConfig::default();
    let seq = lazyq::operators::Enumerable::from_vec(vec![1, 2]).with_config(cfg.clone());
    assert_eq!(seq.config(), &cfg);
    let mut cursor: lazyq::cursor::BoxedEnumerator<i32> = seq.cursor();
    assert!(lazyq::cursor::Enumerator::advance(&mut cursor));
    let first = lazyq::cursor::Enumerator::current(&cursor).copied();
    assert_eq!(core::cmp::max(first, Some(0)), Some(1));
}
