use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::constant::SELL_START_INDEX;
use crate::data::scenario::Scenario;

const START_NAMES: [&str; 3] = ["home", "work", "other"];
const MARKET_POOL: [&str; 8] = [
    "migros", "carrefour", "bim", "a101", "sok", "metro", "kipa", "onur",
];
const PRODUCT_POOL: [&str; 12] = [
    "milk", "bread", "eggs", "cheese", "rice", "pasta", "olive oil", "tea", "sugar", "yogurt",
    "butter", "flour",
];

/// Generate a deterministic random scenario for tests and demo runs.
///
/// The first `SELL_START_INDEX` markets are the fixed starting locations;
/// the rest draw names from a small chain pool. Distances are symmetric
/// with a zero diagonal, and roughly one price in seven is zeroed out to
/// model a product a market does not stock.
pub fn generate_scenario(num_markets: usize, num_products: usize, seed: u64) -> Scenario {
    assert!(
        num_markets > SELL_START_INDEX,
        "scenario needs at least one sellable market"
    );
    assert!(num_products <= PRODUCT_POOL.len());

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut markets: Vec<String> = START_NAMES.iter().map(|s| s.to_string()).collect();
    for i in 0..(num_markets - SELL_START_INDEX) {
        let base = MARKET_POOL[i % MARKET_POOL.len()];
        if i < MARKET_POOL.len() {
            markets.push(base.to_string());
        } else {
            markets.push(format!("{}-{}", base, i / MARKET_POOL.len() + 1));
        }
    }

    let mut distances = vec![vec![0.0; num_markets]; num_markets];
    for i in 0..num_markets {
        for j in (i + 1)..num_markets {
            let d = rng.gen_range(100.0_f64..5000.0).round();
            distances[i][j] = d;
            distances[j][i] = d;
        }
    }

    let products = PRODUCT_POOL[..num_products]
        .iter()
        .map(|name| {
            let mut prices = vec![0.0; num_markets];
            for price in prices.iter_mut().skip(SELL_START_INDEX) {
                if rng.gen_range(0..7) != 0 {
                    *price = (rng.gen_range(3.0_f64..80.0) * 100.0).round() / 100.0;
                }
            }
            (name.to_string(), prices)
        })
        .collect();

    Scenario {
        markets,
        distances,
        products,
    }
}
