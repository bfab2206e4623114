use rand::Rng;

use crate::error::NetError;
use crate::loss::mse::MseLoss;
use crate::network::network::MimirNet;

/// Trains `net` with `draws` single-example updates, each on a uniformly
/// random draw from the dataset, then returns the mean loss over one full
/// pass of the dataset.
///
/// # Panics
/// Panics if `inputs` is empty or the lengths of `inputs` and `targets`
/// differ.
pub fn train_samples<R: Rng>(
    net: &mut MimirNet,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    draws: usize,
    rng: &mut R,
) -> Result<f64, NetError> {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        targets.len(),
        "inputs and targets must have equal length"
    );

    for _ in 0..draws {
        let idx = rng.gen_range(0..inputs.len());
        net.train(&inputs[idx], &targets[idx])?;
    }

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = net.feedforward(input)?;
        total += MseLoss::loss(&output, target);
    }
    Ok(total / inputs.len() as f64)
}
