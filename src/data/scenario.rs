use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::constant::SELL_START_INDEX;
use crate::domain::types::ProblemInstance;

/// A complete dataset in one JSON document: market names, distance matrix
/// and price table. Used both as an alternative to the CSV trio and as the
/// container the fixture generator produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub markets: Vec<String>,
    pub distances: Vec<Vec<f64>>,
    pub products: HashMap<String, Vec<f64>>,
}

impl Scenario {
    pub fn from_json_file(path: &Path) -> Result<Scenario, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Shape checks the optimizer relies on: a square matrix matching the
    /// market count, at least one sellable market, and every price vector
    /// aligned to market order.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let n = self.markets.len();
        if n <= SELL_START_INDEX {
            return Err(format!(
                "need more than {} markets ({} reserved as start locations), got {}",
                SELL_START_INDEX, SELL_START_INDEX, n
            )
            .into());
        }
        if self.distances.len() != n {
            return Err(format!(
                "distance matrix has {} rows for {} markets",
                self.distances.len(),
                n
            )
            .into());
        }
        for (i, row) in self.distances.iter().enumerate() {
            if row.len() != n {
                return Err(format!("distance matrix row {} has {} columns, expected {}", i, row.len(), n).into());
            }
        }
        if self.products.is_empty() {
            return Err("no product data loaded".into());
        }
        for (name, prices) in &self.products {
            if prices.len() != n {
                return Err(format!(
                    "product '{}' has {} prices for {} markets",
                    name,
                    prices.len(),
                    n
                )
                .into());
            }
        }
        Ok(())
    }

    pub fn into_instance(self) -> ProblemInstance {
        ProblemInstance::new(self.markets, self.distances, self.products)
    }
}
