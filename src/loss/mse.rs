pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²). Used for progress
    /// reporting; training computes its own error term.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_equal_vectors_is_zero() {
        assert_eq!(MseLoss::loss(&[0.5, 0.25], &[0.5, 0.25]), 0.0);
    }

    #[test]
    fn mse_averages_squared_differences() {
        let loss = MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]);
        assert!((loss - 0.5).abs() < 1e-12);
    }
}
