use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use csv::Writer;
use dotenv::dotenv;
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{DEFAULT_DATA_DIR, SELL_START_INDEX};
use crate::data::loader::load_all;
use crate::data::scenario::Scenario;
use crate::domain::assignment::Assignment;
use crate::domain::types::ProblemInstance;
use crate::evaluation::fitness::raw_trip_totals;
use crate::fixtures::data_generator::generate_scenario;
use crate::solver::bee_colony::search::run_colony;

const DEMO_SEED: u64 = 12345;

/// Initialize tracing and environment
fn init_tracing_and_env() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    dotenv().ok();
}

/// Load the dataset: a JSON scenario if `SHOPPER_SCENARIO` points at one,
/// otherwise the CSV trio from the data directory, otherwise a generated
/// demo scenario as a last resort.
fn load_instance() -> Result<ProblemInstance, Box<dyn Error>> {
    if let Ok(path) = std::env::var("SHOPPER_SCENARIO") {
        let scenario = Scenario::from_json_file(Path::new(&path))?;
        info!("loaded scenario from {}", path);
        return Ok(scenario.into_instance());
    }

    let data_dir =
        PathBuf::from(std::env::var("SHOPPER_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into()));

    match load_all(&data_dir) {
        Ok((markets, distances, products)) => {
            Ok(ProblemInstance::new(markets, distances, products))
        }
        Err(err) => {
            warn!(
                "failed to load data from {}: {}. Falling back to a generated demo scenario.",
                data_dir.display(),
                err
            );
            let scenario = generate_scenario(10, 12, DEMO_SEED);
            scenario.validate()?;
            Ok(scenario.into_instance())
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();

    let pi = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        load_instance()?
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let start = prompt_start_location(&pi.market_names, &mut input)?;
    let requested = prompt_products(&pi, &mut input)?;
    if requested.is_empty() {
        println!("No valid products selected. Exiting.");
        return Ok(());
    }

    let mut rng = match std::env::var("SHOPPER_SEED") {
        Ok(seed) => ChaCha8Rng::seed_from_u64(seed.parse()?),
        Err(_) => ChaCha8Rng::from_entropy(),
    };

    let state = {
        let span = span!(Level::INFO, "solve", products = requested.len());
        let _guard = span.enter();
        run_colony(&pi, &requested, start, &mut rng)
    };

    let best = state
        .best_solution
        .clone()
        .unwrap_or_else(|| state.population[0].clone());
    display_results(&pi, &requested, &best, start, state.best_fitness);

    if let Ok(path) = std::env::var("SHOPPER_TRACE_CSV") {
        save_trace_csv(&state.best_updates, &path)?;
        info!("wrote convergence trace to {}", path);
    }

    Ok(())
}

/// Ask for a starting location until a valid 1-based choice comes in.
fn prompt_start_location(
    market_names: &[String],
    input: &mut impl BufRead,
) -> Result<usize, Box<dyn Error>> {
    println!("Choose your starting location:");
    for idx in 0..SELL_START_INDEX {
        println!("{} - {}", idx + 1, market_names[idx]);
    }

    loop {
        print!("Your choice (1-{}): ", SELL_START_INDEX);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err("input closed before a starting location was chosen".into());
        }
        if let Ok(choice) = line.trim().parse::<usize>() {
            if (1..=SELL_START_INDEX).contains(&choice) {
                return Ok(choice - 1);
            }
        }
        println!("Invalid choice, try again.");
    }
}

/// Ask for a comma-separated product list; unknown names are dropped with a
/// warning and the valid remainder is returned in entry order.
fn prompt_products(
    pi: &ProblemInstance,
    input: &mut impl BufRead,
) -> Result<Vec<String>, Box<dyn Error>> {
    let catalog = pi.products.keys().sorted().join(", ");
    println!("Available products: {}", catalog);
    print!("Enter the products you want, separated by commas: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let mut valid = Vec::new();
    for wanted in line.split(',') {
        let name = wanted.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        if pi.products.contains_key(&name) {
            valid.push(name);
        } else {
            println!("{}", format!("[warning] '{}' not found.", name).yellow());
        }
    }
    Ok(valid)
}

fn display_results(
    pi: &ProblemInstance,
    requested: &[String],
    solution: &Assignment,
    start: usize,
    fitness: f64,
) {
    println!("\nStarting from: {}", pi.market_names[start].bold());

    let mut last = start;
    for (market, items) in solution.iter() {
        if items.is_empty() {
            continue;
        }
        let dist = pi.distances[last][market];
        let market_name = &pi.market_names[market];
        for &p in items {
            let product = &requested[p];
            let price = pi.products[product][market];
            println!(
                "{} -> {} | Price: {:.2} TL | Distance: {:.0} m",
                product.green(),
                market_name,
                price,
                dist
            );
        }
        last = market;
    }

    let (total_price, total_dist) = raw_trip_totals(solution, pi, requested, start);
    println!("\nTotal price   : {:.2} TL", total_price);
    println!("Total distance: {:.0} m", total_dist);
    println!("Fitness       : {:.4}", fitness);
}

fn save_trace_csv(best_updates: &[(usize, f64)], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["cycle", "new_best_fitness"])?;
    for (cycle, fitness) in best_updates {
        wtr.write_record([cycle.to_string(), fitness.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
