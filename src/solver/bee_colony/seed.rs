use crate::config::constant::{PRICE_TIE_TOLERANCE, SELL_START_INDEX};
use crate::domain::assignment::Assignment;
use crate::domain::types::ProblemInstance;

/// Build a deterministic starting assignment, one product at a time.
///
/// Each product scores every sellable market by an even blend of normalized
/// price and normalized distance from the start. Markets whose raw price is
/// within `PRICE_TIE_TOLERANCE` of that product's cheapest sellable price
/// count as price-tied; among tied markets the smallest raw start distance
/// wins outright, bypassing the blended score.
pub fn initial_assignment(pi: &ProblemInstance, requested: &[String], start: usize) -> Assignment {
    let mut solution = Assignment::empty(pi.num_markets());

    for product in requested {
        let prices = &pi.products[product];
        let norm_prices = &pi.normalized_products[product];
        let min_price = prices[SELL_START_INDEX..]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);

        let mut best_mkt: Option<usize> = None;
        let mut best_score = f64::INFINITY;

        for mkt in pi.sellable_markets() {
            let score = 0.5 * norm_prices[mkt] + 0.5 * pi.normalized_distances[start][mkt];

            if (prices[mkt] - min_price).abs() < PRICE_TIE_TOLERANCE {
                let closer = match best_mkt {
                    None => true,
                    Some(b) => pi.distances[start][mkt] < pi.distances[start][b],
                };
                if closer {
                    best_mkt = Some(mkt);
                    best_score = score;
                }
            } else if score < best_score {
                best_mkt = Some(mkt);
                best_score = score;
            }
        }

        let best_mkt =
            best_mkt.expect("no candidate market selected; sellable market range must be non-empty");
        solution.place(best_mkt);
    }

    solution
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn instance(distances: Vec<Vec<f64>>, products: Vec<(&str, Vec<f64>)>) -> ProblemInstance {
        let n = distances.len();
        let names: Vec<String> = (0..n).map(|i| format!("market-{i}")).collect();
        let products: HashMap<String, Vec<f64>> = products
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        ProblemInstance::new(names, distances, products)
    }

    #[test]
    fn price_tie_prefers_closer_market() {
        // markets 3 and 4 sell bread at the same price; 4 is closer to start 0
        let distances = vec![
            vec![0.0, 1.0, 2.0, 900.0, 300.0],
            vec![1.0, 0.0, 2.0, 500.0, 400.0],
            vec![2.0, 2.0, 0.0, 100.0, 800.0],
            vec![900.0, 500.0, 100.0, 0.0, 250.0],
            vec![300.0, 400.0, 800.0, 250.0, 0.0],
        ];
        let pi = instance(distances, vec![("bread", vec![0.0, 0.0, 0.0, 12.5, 12.5])]);

        let sol = initial_assignment(&pi, &["bread".to_string()], 0);
        assert_eq!(sol.market_of(0), 4);
    }

    #[test]
    fn distance_tie_keeps_first_market_in_index_order() {
        let distances = vec![
            vec![0.0, 1.0, 2.0, 400.0, 400.0],
            vec![1.0, 0.0, 2.0, 500.0, 400.0],
            vec![2.0, 2.0, 0.0, 100.0, 800.0],
            vec![400.0, 500.0, 100.0, 0.0, 250.0],
            vec![400.0, 400.0, 800.0, 250.0, 0.0],
        ];
        let pi = instance(distances, vec![("milk", vec![0.0, 0.0, 0.0, 8.0, 8.0])]);

        let sol = initial_assignment(&pi, &["milk".to_string()], 0);
        assert_eq!(sol.market_of(0), 3);
    }

    #[test]
    fn untied_prices_follow_blended_score() {
        // market 3 holds the minimum price, so it enters the tie branch and
        // becomes the incumbent; market 4 is well outside the tie tolerance
        // but so much closer that its blended score wins anyway.
        //
        // From start 0: normalized distances are 1.0 (3) vs 0.025 (4),
        // normalized prices 0.25 (3) vs 1.0 (4), so the blended scores are
        // 0.625 vs 0.5125.
        let distances = vec![
            vec![0.0, 1.0, 2.0, 4000.0, 100.0],
            vec![1.0, 0.0, 2.0, 3500.0, 400.0],
            vec![2.0, 2.0, 0.0, 3800.0, 800.0],
            vec![4000.0, 3500.0, 3800.0, 0.0, 250.0],
            vec![100.0, 400.0, 800.0, 250.0, 0.0],
        ];
        let pi = instance(distances, vec![("eggs", vec![0.0, 0.0, 0.0, 5.0, 20.0])]);

        let sol = initial_assignment(&pi, &["eggs".to_string()], 0);
        assert_eq!(sol.market_of(0), 4);
    }

    #[test]
    fn single_sellable_market_takes_everything() {
        let distances = vec![vec![0.0; 4]; 4];
        let pi = instance(distances, vec![("milk", vec![0.0, 0.0, 0.0, 10.0])]);

        let sol = initial_assignment(&pi, &["milk".to_string()], 0);
        assert_eq!(sol.market_of(0), 3);
        assert_eq!(sol.products_at(3), &[0]);
    }

    #[test]
    fn deterministic_across_runs() {
        let distances = vec![
            vec![0.0, 5.0, 9.0, 300.0, 700.0, 120.0],
            vec![5.0, 0.0, 4.0, 250.0, 650.0, 90.0],
            vec![9.0, 4.0, 0.0, 220.0, 610.0, 60.0],
            vec![300.0, 250.0, 220.0, 0.0, 410.0, 170.0],
            vec![700.0, 650.0, 610.0, 410.0, 0.0, 530.0],
            vec![120.0, 90.0, 60.0, 170.0, 530.0, 0.0],
        ];
        let pi = instance(
            distances,
            vec![
                ("milk", vec![0.0, 0.0, 0.0, 9.5, 11.0, 10.5]),
                ("bread", vec![0.0, 0.0, 0.0, 4.0, 3.0, 6.5]),
            ],
        );
        let requested = vec!["milk".to_string(), "bread".to_string()];

        let a = initial_assignment(&pi, &requested, 1);
        let b = initial_assignment(&pi, &requested, 1);
        assert_eq!(a, b);
    }
}
