//! Integration tests for container behaviour under realistic sequences

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stencil_containers::{HashMap, HashSet, InputRange, IntrusiveHashSet, TreapSet, TreeMap, TreeSet};
use stencil_foundation::HashConfig;

const KEYS: [i32; 5] = [5, 3, 8, 1, 4];

// =============================================================================
// Ordered and hashed sets over the same keys
// =============================================================================

#[test]
fn tree_set_traverses_in_key_order() {
    let mut set = TreeSet::new();
    for k in KEYS {
        assert!(set.put(k));
    }
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    assert_eq!(set.descending().elements().copied().collect::<Vec<_>>(), [8, 5, 4, 3, 1]);
    set.check_invariants().unwrap();
}

#[test]
fn treap_set_traverses_in_key_order() {
    let mut set = TreapSet::new();
    for k in KEYS {
        assert!(set.put(k));
    }
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    set.check_invariants().unwrap();
}

#[test]
fn hash_set_counts_and_finds() {
    let mut set = HashSet::new();
    for k in KEYS {
        assert!(set.put(k));
    }
    assert_eq!(set.len(), 5);
    assert!(set.contains(&8));
    assert!(!set.contains(&9));
}

#[test]
fn intrusive_hash_set_agrees_with_tagged() {
    let mut intrusive = IntrusiveHashSet::with_sentinels(i32::MIN, i32::MIN + 1);
    let mut tagged = HashSet::new();
    for k in KEYS {
        assert_eq!(intrusive.put(k), tagged.put(k));
    }
    assert!(!intrusive.put(5));
    assert_eq!(intrusive.len(), tagged.len());
    for k in 0..10 {
        assert_eq!(intrusive.contains(&k), tagged.contains(&k));
    }
}

// =============================================================================
// Randomized churn against a model
// =============================================================================

#[test]
fn hash_set_matches_model_under_churn() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut set = HashSet::new();
    let mut model = BTreeSet::new();
    for _ in 0..5_000 {
        let k: i32 = rng.gen_range(0..256);
        if rng.gen_bool(0.6) {
            assert_eq!(set.put(k), model.insert(k));
        } else {
            assert_eq!(set.remove(&k), model.remove(&k));
        }
        assert_eq!(set.len(), model.len());
    }
    for k in 0..256 {
        assert_eq!(set.contains(&k), model.contains(&k), "{k}");
    }
    assert!(set.capacity().is_power_of_two());
}

#[test]
fn hash_growth_respects_load_factor() {
    let config = HashConfig::default();
    let mut set = HashSet::with_config(config);
    assert_eq!(set.capacity(), 8);
    for k in 0..1_000 {
        set.put(k);
        let limit = set.capacity() as f64 * config.load_factor;
        assert!(set.len() as f64 <= limit, "{} > {limit}", set.len());
        assert!(set.capacity().is_power_of_two());
    }
}

#[test]
fn removal_never_shrinks() {
    let mut set: HashSet<i32> = (0..100).collect();
    let capacity = set.capacity();
    for k in 0..100 {
        set.remove(&k);
    }
    assert!(set.is_empty());
    assert_eq!(set.capacity(), capacity);
}

#[test]
fn trees_stay_balanced_under_churn() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut tree = TreeSet::new();
    let mut treap = TreapSet::new();
    let mut model = BTreeSet::new();
    for _ in 0..3_000 {
        let k: u16 = rng.gen_range(0..512);
        if rng.gen_bool(0.55) {
            assert_eq!(tree.put(k), model.insert(k));
            treap.put(k);
        } else {
            assert_eq!(tree.remove(&k), model.remove(&k));
            treap.remove(&k);
        }
    }
    tree.check_invariants().unwrap();
    treap.check_invariants().unwrap();
    assert!(tree.iter().eq(model.iter()));
    assert!(treap.iter().eq(model.iter()));
}

#[test]
fn treap_split_then_merge_restores_content() {
    let set: TreapSet<i32> = (0..64).collect();
    let (left, right) = set.split(&20);
    assert!(left.iter().all(|k| *k < 20));
    assert!(right.iter().all(|k| *k >= 20));
    let merged = left.merge(right);
    merged.check_invariants().unwrap();
    assert!(merged.iter().copied().eq(0..64));
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn maps_replace_values_and_report_it() {
    let mut hash = HashMap::new();
    let mut tree = TreeMap::new();
    assert!(hash.put("a", 1));
    assert!(!hash.put("a", 2));
    assert_eq!(hash.get(&"a"), Some(1));
    assert_eq!(hash.set("a", 3), Some(1));
    assert_eq!(hash.view(&"a"), Some(&3));

    assert!(tree.put(2, "two"));
    assert_eq!(tree.set(2, "deux"), Some("two"));
    assert_eq!(tree.set(1, "un"), None);
    assert_eq!(tree.first(), Some((&1, &"un")));
    assert!(tree.contains_key(&2));
    assert_eq!(tree.take(&2), Some("deux"));
    assert!(!tree.contains_key(&2));
}
