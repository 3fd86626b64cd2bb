/// Rescale a sequence linearly so its minimum maps to 0.0 and maximum to 1.0.
///
/// A constant sequence has no spread to rescale against; every element maps
/// to a neutral 0.5 instead of dividing by zero. Callers guarantee the input
/// is non-empty.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min_v = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_v = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max_v == min_v {
        return vec![0.5; values.len()];
    }

    values
        .iter()
        .map(|v| (v - min_v) / (max_v - min_v))
        .collect()
}
