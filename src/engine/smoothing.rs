/// Weight of the freshly computed score in the one-step EMA.
pub const EMA_WEIGHT: f64 = 0.7;

/// Blend the base score with the previously persisted score. Damps noise
/// from a single bad measurement; the result always lies between the two
/// inputs, so smoothing can never boost a score above either of them.
pub fn smooth(base_score: f64, previous_score: Option<f64>) -> f64 {
    match previous_score {
        Some(previous) => EMA_WEIGHT * base_score + (1.0 - EMA_WEIGHT) * previous,
        None => base_score,
    }
}
