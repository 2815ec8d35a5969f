//! Integration tests for the range contract across container families

use stencil_containers::{
    AssociativeRange, BidirectionalRange, ContiguousRange, ForwardRange, HashMap, HashSet,
    InputRange, Iterable, List, Queue, RandomAccessRange, TreapMap, TreapSet, TreeMap, TreeSet,
    Vector,
};

/// Pops a fresh range exactly `size()` times and checks it empties.
fn drains_in_size_steps<C: Iterable>(container: &C) {
    let mut range = container.range();
    if container.size() > 0 {
        assert!(!range.is_empty());
    }
    for _ in 0..container.size() {
        assert!(!range.is_empty());
        range.pop_front();
    }
    assert!(range.is_empty());
}

#[test]
fn every_family_drains_in_size_steps() {
    let values = [5, 3, 8, 1, 4];
    drains_in_size_steps(&values.iter().copied().collect::<Vector<_>>());
    drains_in_size_steps(&values.iter().copied().collect::<List<_>>());
    drains_in_size_steps(&values.iter().copied().collect::<Queue<_>>());
    drains_in_size_steps(&values.iter().copied().collect::<HashSet<_>>());
    drains_in_size_steps(&values.iter().copied().collect::<TreeSet<_>>());
    drains_in_size_steps(&values.iter().copied().collect::<TreapSet<_>>());
    drains_in_size_steps(&values.iter().map(|v| (*v, ())).collect::<HashMap<_, _>>());
    drains_in_size_steps(&values.iter().map(|v| (*v, ())).collect::<TreeMap<_, _>>());
    drains_in_size_steps(&values.iter().map(|v| (*v, ())).collect::<TreapMap<_, _>>());
    drains_in_size_steps(&Vector::<i32>::new());
}

#[test]
fn contiguous_size_shrinks_with_each_pop() {
    let vector: Vector<i32> = (0..10).collect();
    let mut range = vector.range();
    let original = range.size();
    for k in 0..original {
        assert_eq!(range.size(), original - k);
        assert_eq!(*range.view(0), i32::try_from(k).unwrap());
        range.pop_front();
    }
    assert_eq!(range.as_slice(), &[] as &[i32]);
}

#[test]
fn forward_ranges_snapshot_their_position() {
    let set: TreeSet<i32> = (1..=5).collect();
    let mut range = set.range();
    range.pop_front();
    let saved = range.save();
    range.pop_front();
    range.pop_front();
    assert_eq!(*saved.view_front(), 2);
    assert_eq!(*range.view_front(), 4);
}

#[test]
fn queue_ranges_meet_in_the_middle() {
    let queue: Queue<i32> = (1..=4).collect();
    let mut range = queue.range();
    assert_eq!(range.take_front(), 1);
    assert_eq!(range.take_back(), 4);
    range.pop_front();
    range.pop_back();
    assert_eq!((range.take_front(), range.take_back()), (2, 3));
    range.pop_back();
    range.pop_front();
    assert!(range.is_empty());
}

#[test]
fn associative_ranges_expose_keys_in_order() {
    let map: TreeMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    let mut range = map.range();
    let mut keys = Vec::new();
    while !range.is_empty() {
        keys.push(range.take_key_front());
        range.pop_front();
    }
    assert_eq!(keys, [1, 2, 3]);

    let treap: TreapMap<i32, char> = [(9, 'z'), (0, 'a')].into_iter().collect();
    let range = treap.range();
    assert_eq!((*range.view_key_front(), *range.view_front()), (0, 'a'));
}

#[test]
#[should_panic(expected = "empty range")]
fn empty_range_access_panics() {
    let list: List<i32> = List::new();
    let range = list.range();
    let _ = range.view_front();
}
