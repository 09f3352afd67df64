//! Tests for result shuffling

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn test_empty_input() {
    let mut rng = StdRng::seed_from_u64(7);
    let items: Vec<String> = Vec::new();
    assert!(shuffled(&items, &mut rng).is_empty());
}

#[test]
fn test_single_item() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(shuffled(&["only"], &mut rng), vec!["only"]);
}

#[test]
fn test_input_is_not_mutated() {
    let mut rng = StdRng::seed_from_u64(42);
    let items = vec!["a", "b", "c", "d", "e", "f"];
    let before = items.clone();

    let _ = shuffled(&items, &mut rng);

    assert_eq!(items, before);
}

#[test]
fn test_same_seed_same_order() {
    let items: Vec<u32> = (0..20).collect();
    let first = shuffled(&items, &mut StdRng::seed_from_u64(3));
    let second = shuffled(&items, &mut StdRng::seed_from_u64(3));
    assert_eq!(first, second);
}

#[test]
fn test_all_orders_appear_roughly_evenly() {
    let mut rng = StdRng::seed_from_u64(2024);
    let items = [0u8, 1, 2];
    let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();

    for _ in 0..6000 {
        *counts.entry(shuffled(&items, &mut rng)).or_default() += 1;
    }

    assert_eq!(counts.len(), 6, "every permutation of three items should occur");
    for (order, count) in counts {
        assert!(
            (800..=1200).contains(&count),
            "order {:?} occurred {} times out of 6000",
            order,
            count
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Output is a permutation of the input: same multiset of elements
    #[test]
    fn prop_output_is_permutation(
        items in prop::collection::vec("[a-z]{0,6}", 0..30),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = shuffled(&items, &mut rng);

        let mut expected = items.clone();
        let mut actual = result;
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }
}
