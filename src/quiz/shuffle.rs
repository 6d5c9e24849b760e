use rand::Rng;

/// Return a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Fisher–Yates over a copy of `items`, driven by the given generator.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_input_is_not_mutated() {
        let items = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&items);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(shuffle::<u8>(&[]).is_empty());
        assert_eq!(shuffle(&["only"]), vec!["only"]);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_not_always_identity() {
        let items = vec!['a', 'b'];
        let moved = (0..200).any(|_| shuffle(&items) != items);
        assert!(moved, "200 shuffles of two items never changed the order");
    }

    #[test]
    fn test_every_position_is_reachable() {
        let items = vec![0, 1, 2];
        let mut rng = StdRng::seed_from_u64(42);
        let mut first_seen = [false; 3];
        for _ in 0..300 {
            first_seen[shuffle_with(&items, &mut rng)[0]] = true;
        }
        assert_eq!(first_seen, [true; 3]);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(xs in prop::collection::vec(any::<i32>(), 0..64)) {
            let mut shuffled = shuffle(&xs);
            let mut original = xs.clone();
            shuffled.sort_unstable();
            original.sort_unstable();
            prop_assert_eq!(shuffled, original);
        }
    }
}
