//! Integration tests for set algebra and sequence operations

use std::cmp::Ordering;

use stencil_containers::{
    HashSet, InputRange, IntrusiveHashSet, Iterable, List, Queue, SequentialOps, SetOps, TreapSet,
    TreeSet, Vector,
};

fn sorted<S: Iterable<Element = i32>>(set: &S) -> Vec<i32> {
    let mut values: Vec<i32> = set.range().elements().copied().collect();
    values.sort_unstable();
    values
}

/// Runs the whole algebra on one family.
fn algebra<S>()
where
    S: SetOps<Element = i32> + FromIterator<i32>,
{
    let a: S = [1, 2, 3, 4].into_iter().collect();
    let b: S = [3, 4, 5].into_iter().collect();

    assert_eq!(sorted(&a.create_join(&b)), [1, 2, 3, 4, 5]);
    assert_eq!(sorted(&a.create_difference(&b)), [1, 2]);
    assert_eq!(sorted(&a.create_intersection(&b)), [3, 4]);
    assert_eq!(sorted(&a.create_disjunction(&b)), [1, 2, 5]);
    assert_eq!(sorted(&a), [1, 2, 3, 4]);

    let small: S = [2, 3].into_iter().collect();
    assert!(small.subset(&a));
    assert!(!a.subset(&small));
    assert!(!small.disjoint(&b) && small.create_difference(&b).disjoint(&b));

    let mut c = a.clone();
    c.disjoin(&b);
    assert!(c.set_equal(&a.create_disjunction(&b)));
    c.intersect(&b);
    assert_eq!(sorted(&c), [5]);
    c.subtract(&b);
    assert_eq!(c.size(), 0);

    let reordered: S = [4, 3, 2, 1].into_iter().collect();
    assert!(reordered.set_equal(&a));
    assert_eq!(reordered.set_hash(), a.set_hash());
}

#[test]
fn hash_set_algebra() {
    algebra::<HashSet<i32>>();
}

#[test]
fn tree_set_algebra() {
    algebra::<TreeSet<i32>>();
}

#[test]
fn treap_set_algebra() {
    algebra::<TreapSet<i32>>();
}

#[test]
fn set_hash_agrees_across_families() {
    let values = [7, 1, 9];
    let hash: HashSet<i32> = values.into_iter().collect();
    let tree: TreeSet<i32> = values.into_iter().collect();
    let treap: TreapSet<i32> = values.into_iter().collect();
    assert_eq!(hash.set_hash(), tree.set_hash());
    assert_eq!(tree.set_hash(), treap.set_hash());
}

#[test]
fn intrusive_set_joins_like_tagged() {
    let mut a = IntrusiveHashSet::with_sentinels(-1, -2);
    let mut b = IntrusiveHashSet::with_sentinels(-1, -2);
    for v in [1, 2] {
        a.put(v);
    }
    for v in [2, 3] {
        b.put(v);
    }
    a.join(&b);
    assert_eq!(sorted(&a), [1, 2, 3]);
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn sequences_share_equality_order_and_hash() {
    let vector: Vector<i32> = [1, 2, 3].into_iter().collect();
    let list: List<i32> = [1, 2, 3].into_iter().collect();
    let queue: Queue<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(vector.hash_code(), list.hash_code());
    assert_eq!(list.hash_code(), queue.hash_code());

    let longer: Vector<i32> = [1, 2, 3, 0].into_iter().collect();
    assert_eq!(vector.compare(&longer), Ordering::Less);
    assert!(!vector.equal(&longer));

    let reversed: List<i32> = [3, 2, 1].into_iter().collect();
    assert_ne!(list.hash_code(), reversed.hash_code());
    assert_eq!(list.compare(&reversed), Ordering::Less);
}

#[test]
fn sequences_search_by_equality() {
    let queue: Queue<&str> = ["a", "b", "a"].into_iter().collect();
    assert!(SequentialOps::contains(&queue, &"b"));
    assert!(!SequentialOps::contains(&queue, &"z"));
    assert_eq!(queue.find_first(&"a"), Some(&"a"));
}
