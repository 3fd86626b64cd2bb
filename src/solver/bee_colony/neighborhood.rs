use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::constant::SELL_START_INDEX;
use crate::domain::assignment::Assignment;

/// Produce a neighbor by moving one random product to one random sellable
/// market. The input is left untouched. The target may coincide with the
/// product's current market, in which case the perturbation is a no-op
/// apart from reordering that market's list.
pub fn produce_new(solution: &Assignment, num_products: usize, rng: &mut ChaCha8Rng) -> Assignment {
    let mut next = solution.clone();

    let product = rng.gen_range(0..num_products);
    let target = SELL_START_INDEX + rng.gen_range(0..next.num_slots());
    next.transfer(product, target);

    next
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn seeded(num_markets: usize, placements: &[usize]) -> Assignment {
        let mut a = Assignment::empty(num_markets);
        for &m in placements {
            a.place(m);
        }
        a
    }

    #[test]
    fn keeps_every_product_exactly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let original = seeded(7, &[3, 4, 4, 6, 5]);

        for _ in 0..200 {
            let next = produce_new(&original, 5, &mut rng);
            let mut counts = vec![0usize; 5];
            for (_, items) in next.iter() {
                for &p in items {
                    counts[p] += 1;
                }
            }
            assert!(counts.iter().all(|&c| c == 1));
        }
    }

    #[test]
    fn does_not_mutate_the_source() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let original = seeded(6, &[3, 5, 4]);
        let snapshot = original.clone();

        let _ = produce_new(&original, 3, &mut rng);
        assert_eq!(original, snapshot);
    }

    #[test]
    fn moved_product_lands_on_a_sellable_market() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let original = seeded(8, &[3, 3, 3, 3]);

        for _ in 0..100 {
            let next = produce_new(&original, 4, &mut rng);
            for p in 0..4 {
                assert!(next.market_of(p) >= SELL_START_INDEX);
                assert!(next.market_of(p) < 8);
            }
        }
    }
}
