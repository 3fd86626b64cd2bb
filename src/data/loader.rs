use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::config::constant::{DISTANCES_FILE, MARKET_NAMES_FILE, PRICES_FILE};

/// Load market names from a text file, one per line, blank lines skipped.
pub fn load_market_names(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("market names file not found: {}", path.display()).into());
    }
    let content = fs::read_to_string(path)?;
    let markets: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    Ok(markets)
}

/// Load an N×N distance matrix from a headerless CSV file. Cells that do
/// not parse as numbers coerce to 0.0.
pub fn load_distance_matrix(path: &Path) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("distance file not found: {}", path.display()).into());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut matrix = Vec::new();
    for row in reader.records() {
        let record = row?;
        let parsed: Vec<f64> = record
            .iter()
            .map(|cell| cell.parse::<f64>().unwrap_or(0.0))
            .collect();
        matrix.push(parsed);
    }
    Ok(matrix)
}

/// Load product prices per market from a CSV file.
///
/// The first column holds market names; every other column is one product,
/// named by its (lowercased, trimmed) header. Prices are re-aligned to the
/// order of `market_names`; markets absent from the file get all-zero
/// prices, duplicate market rows are averaged with a warning, and
/// non-numeric cells coerce to 0.0.
pub fn load_product_prices(
    market_names: &[String],
    path: &Path,
) -> Result<HashMap<String, Vec<f64>>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("price file not found: {}", path.display()).into());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    // duplicate headers would misalign the per-product price vectors, so
    // only the first column for a given product name is read
    let mut product_names: Vec<String> = Vec::new();
    let mut product_columns: Vec<usize> = Vec::new();
    for (col, header) in reader.headers()?.iter().enumerate().skip(1) {
        let name = header.trim().to_lowercase();
        if product_names.contains(&name) {
            warn!(
                "duplicate product column '{}' in price file; keeping the first occurrence",
                name
            );
            continue;
        }
        product_names.push(name);
        product_columns.push(col);
    }

    // market name -> (price sums, row count) so duplicate rows average out
    let mut rows: HashMap<String, (Vec<f64>, usize)> = HashMap::new();
    let mut saw_duplicates = false;

    for row in reader.records() {
        let record = row?;
        let market = match record.get(0) {
            Some(name) if !name.trim().is_empty() => name.trim().to_lowercase(),
            _ => continue,
        };

        let prices: Vec<f64> = product_columns
            .iter()
            .map(|&col| {
                record
                    .get(col)
                    .and_then(|cell| cell.parse::<f64>().ok())
                    .unwrap_or(0.0)
            })
            .collect();

        match rows.get_mut(&market) {
            Some((sums, count)) => {
                saw_duplicates = true;
                for (sum, price) in sums.iter_mut().zip(&prices) {
                    *sum += price;
                }
                *count += 1;
            }
            None => {
                rows.insert(market, (prices, 1));
            }
        }
    }

    if saw_duplicates {
        warn!("duplicate market rows in price file; averaging their values");
    }

    // align to the market list; unknown markets fall back to all zeros
    let mut products: HashMap<String, Vec<f64>> = product_names
        .iter()
        .map(|name| (name.clone(), Vec::with_capacity(market_names.len())))
        .collect();

    for market in market_names {
        let key = market.to_lowercase();
        for (col, name) in product_names.iter().enumerate() {
            let price = rows
                .get(&key)
                .map(|(sums, count)| sums[col] / *count as f64)
                .unwrap_or(0.0);
            products.get_mut(name).expect("product column vanished").push(price);
        }
    }

    Ok(products)
}

/// Load the full CSV dataset from a directory and cross-check the parts.
pub fn load_all(
    dir: &Path,
) -> Result<(Vec<String>, Vec<Vec<f64>>, HashMap<String, Vec<f64>>), Box<dyn Error>> {
    let markets = load_market_names(&dir.join(MARKET_NAMES_FILE))?;
    let distances = load_distance_matrix(&dir.join(DISTANCES_FILE))?;
    if distances.len() != markets.len() {
        return Err(format!(
            "mismatch between market count ({}) and distance matrix size ({})",
            markets.len(),
            distances.len()
        )
        .into());
    }

    let products = load_product_prices(&markets, &dir.join(PRICES_FILE))?;
    if products.is_empty() {
        return Err("no product data loaded; check the price file".into());
    }

    info!(
        "loaded {} markets and {} products from {}",
        markets.len(),
        products.len(),
        dir.display()
    );

    Ok((markets, distances, products))
}
