use std::collections::HashSet;

use crate::config::constant::{FITNESS_EPSILON, MARKET_VISIT_PENALTY};
use crate::domain::assignment::Assignment;
use crate::domain::types::ProblemInstance;

/// Score an assignment; higher is better.
///
/// Walks markets in ascending index order as a single sequential trip:
/// each distinct non-empty market adds one normalized distance leg from the
/// previous stop, and every product adds its normalized price at that
/// market. A flat penalty per visited market discourages spreading the
/// purchases thin. Fitness is the inverse of the summed cost, so it is
/// always strictly positive.
pub fn find_fitness(
    solution: &Assignment,
    pi: &ProblemInstance,
    requested: &[String],
    start: usize,
) -> f64 {
    let mut total_cost = 0.0;
    let mut last = start;
    let mut visited: HashSet<usize> = HashSet::new();

    for (market, items) in solution.iter() {
        if items.is_empty() {
            continue;
        }
        if visited.insert(market) {
            total_cost += pi.normalized_distances[last][market];
            last = market;
        }
        for &p in items {
            total_cost += pi.normalized_products[&requested[p]][market];
        }
    }

    let penalty = visited.len() as f64 * MARKET_VISIT_PENALTY;
    1.0 / (total_cost + penalty + FITNESS_EPSILON)
}

/// Keep the fitter of two assignments. Ties keep the incumbent, so the
/// result is never worse than `current`.
pub fn greedy_select(
    current: Assignment,
    candidate: Assignment,
    pi: &ProblemInstance,
    requested: &[String],
    start: usize,
) -> Assignment {
    if find_fitness(&candidate, pi, requested, start) > find_fitness(&current, pi, requested, start)
    {
        candidate
    } else {
        current
    }
}

/// Raw (unnormalized, unpenalized) price and distance totals for reporting.
/// The trip is walked the same way the fitness walk does, but against the
/// original matrices, so the figures are in real units.
pub fn raw_trip_totals(
    solution: &Assignment,
    pi: &ProblemInstance,
    requested: &[String],
    start: usize,
) -> (f64, f64) {
    let mut total_price = 0.0;
    let mut total_dist = 0.0;
    let mut last = start;

    for (market, items) in solution.iter() {
        if items.is_empty() {
            continue;
        }
        total_dist += pi.distances[last][market];
        for &p in items {
            total_price += pi.products[&requested[p]][market];
        }
        last = market;
    }

    (total_price, total_dist)
}
