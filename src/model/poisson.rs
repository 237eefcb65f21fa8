//! Poisson distribution primitives for goal and corner counts.

/// P(X = k) for X ~ Poisson(lambda).
pub fn pmf(k: u32, lambda: f64) -> f64 {
    lambda.powi(k as i32) * (-lambda).exp() / factorial(k)
}

/// P(X <= k) for X ~ Poisson(lambda).
pub fn cdf(k: u32, lambda: f64) -> f64 {
    (0..=k).map(|i| pmf(i, lambda)).sum()
}

/// Exact for the small k used here (goals <= 6, corner lines <= 12).
fn factorial(k: u32) -> f64 {
    (1..=k).map(f64::from).product()
}
