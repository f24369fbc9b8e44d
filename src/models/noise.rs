//! Synthetic observation noise.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::models::ModelError;

/// Add independent zero-mean Gaussian noise with standard deviation `sigma`
/// to each value.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    values: &[f64],
    sigma: f64,
    rng: &mut R,
) -> Result<Vec<f64>, ModelError> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| ModelError::Noise(e.to_string()))?;
    Ok(values
        .iter()
        .map(|v| v + sigma * normal.sample(rng))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn noise_has_requested_scale() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = vec![5.0; 20_000];
        let noisy = add_gaussian_noise(&base, 0.5, &mut rng).unwrap();

        let n = noisy.len() as f64;
        let mean = noisy.iter().sum::<f64>() / n;
        let var = noisy.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!((mean - 5.0).abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std {}", var.sqrt());
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let base = vec![1.0, 2.0, 3.0];
        assert_eq!(add_gaussian_noise(&base, 0.0, &mut rng).unwrap(), base);
    }
}
