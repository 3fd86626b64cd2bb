use std::collections::HashMap;

use crate::config::constant::SELL_START_INDEX;
use crate::utils::normalize;

/// Immutable problem data for one shopping run: market list, travel
/// distances, per-market price vectors, and normalized copies of both.
///
/// Distances are normalized per origin row, so the same physical distance
/// costs differently depending on where the leg starts. Price vectors are
/// normalized across the full market range, start locations included. Both
/// choices match the observed behavior this solver reproduces and must not
/// be swapped for a global normalization.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub market_names: Vec<String>,
    pub distances: Vec<Vec<f64>>,
    /// Lowercase product name -> price per market, aligned to market order.
    /// A price of 0.0 means "not sold there" but is scored as free.
    pub products: HashMap<String, Vec<f64>>,
    pub normalized_distances: Vec<Vec<f64>>,
    pub normalized_products: HashMap<String, Vec<f64>>,
}

impl ProblemInstance {
    pub fn new(
        market_names: Vec<String>,
        distances: Vec<Vec<f64>>,
        products: HashMap<String, Vec<f64>>,
    ) -> Self {
        let normalized_distances = distances.iter().map(|row| normalize(row)).collect();
        let normalized_products = products
            .iter()
            .map(|(name, prices)| (name.clone(), normalize(prices)))
            .collect();

        ProblemInstance {
            market_names,
            distances,
            products,
            normalized_distances,
            normalized_products,
        }
    }

    pub fn num_markets(&self) -> usize {
        self.market_names.len()
    }

    /// Market indices eligible as purchase destinations.
    pub fn sellable_markets(&self) -> std::ops::Range<usize> {
        SELL_START_INDEX..self.market_names.len()
    }
}
