use rand::Rng;

/// Fisher–Yates shuffle into a fresh vector, leaving `pool` untouched
pub fn shuffle<T: Clone, R: Rng + ?Sized>(pool: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = pool.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Randomised traversal over a pool with a cursor.
///
/// `index < order.len()` holds whenever the order is non-empty. Running off
/// the end reshuffles the same pool instead of wrapping around.
#[derive(Debug, Clone)]
pub struct DrawOrder<T> {
    pool: Vec<T>,
    order: Vec<T>,
    index: usize,
}

impl<T: Clone> DrawOrder<T> {
    pub fn new<R: Rng + ?Sized>(pool: Vec<T>, rng: &mut R) -> Self {
        let order = shuffle(&pool, rng);
        Self {
            pool,
            order,
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.order.get(self.index)
    }

    /// Moves to the next element. Returns true when a new shuffle was started.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.order.is_empty() {
            return false;
        }

        self.index += 1;
        if self.index >= self.order.len() {
            self.order = shuffle(&self.pool, rng);
            self.index = 0;
            return true;
        }
        false
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The current shuffle, in draw order
    pub fn order(&self) -> &[T] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let pool: Vec<u32> = (0..50).collect();
        let shuffled = shuffle(&pool, &mut rng());
        assert_eq!(shuffled.len(), pool.len());
        assert_eq!(shuffled.iter().copied().sorted().collect::<Vec<_>>(), pool);
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let pool = vec!['a', 'a', 'b'];
        let shuffled = shuffle(&pool, &mut rng());
        assert_eq!(shuffled.iter().filter(|c| **c == 'a').count(), 2);
    }

    #[test]
    fn test_shuffle_does_not_touch_input() {
        let pool = vec![1, 2, 3, 4];
        let _ = shuffle(&pool, &mut rng());
        assert_eq!(pool, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        assert!(shuffle::<u8, _>(&[], &mut rng()).is_empty());
        assert_eq!(shuffle(&[9], &mut rng()), vec![9]);
    }

    #[test]
    fn test_shuffle_roughly_uniform() {
        // Every one of the 6 permutations of 3 elements should show up
        // close to 1/6 of the time.
        let mut rng = rng();
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        let runs = 12_000;
        for _ in 0..runs {
            *counts.entry(shuffle(&[0u8, 1, 2], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, n) in counts {
            assert!((1_600..2_400).contains(&n), "{perm:?} drawn {n} times");
        }
    }

    #[test]
    fn test_one_cycle_visits_each_element_once() {
        let mut rng = rng();
        let mut order = DrawOrder::new((0..10).collect::<Vec<u32>>(), &mut rng);

        let mut seen = vec![*order.current().unwrap()];
        for _ in 1..10 {
            assert!(!order.advance(&mut rng));
            seen.push(*order.current().unwrap());
        }
        assert_eq!(seen.into_iter().sorted().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_exhaustion_reshuffles() {
        let mut rng = rng();
        let mut order = DrawOrder::new(vec![1, 2, 3], &mut rng);
        order.advance(&mut rng);
        order.advance(&mut rng);
        assert_eq!(order.position(), 2);

        assert!(order.advance(&mut rng));
        assert_eq!(order.position(), 0);
        assert_eq!(order.len(), 3);
        assert_eq!(order.order().iter().copied().sorted().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_element_stays_put() {
        let mut rng = rng();
        let mut order = DrawOrder::new(vec!["x"], &mut rng);
        assert!(order.advance(&mut rng));
        assert_eq!(order.current(), Some(&"x"));
    }

    #[test]
    fn test_empty_order_advance_is_noop() {
        let mut rng = rng();
        let mut order: DrawOrder<u8> = DrawOrder::new(vec![], &mut rng);
        assert!(order.is_empty());
        assert_eq!(order.current(), None);
        assert!(!order.advance(&mut rng));
        assert_eq!(order.position(), 0);
        assert_eq!(order.current(), None);
    }
}
