use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::NetError;
use crate::math::matrix::Matrix;

/// Logistic sigmoid.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative in terms of the activation: for y = sigmoid(x),
/// sigmoid'(x) = y * (1 - y).
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}

/// One affine transform plus sigmoid nonlinearity.
///
/// Weights are (outputs × inputs), bias is (outputs × 1). The most recent
/// input and activation are cached for the backward pass and overwritten
/// on every forward call, so a layer serves exactly one example at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    inputs: usize,
    outputs: usize,
    weights: Matrix,
    bias: Matrix,
    input_vector: Option<Matrix>,
    output_vector: Option<Matrix>,
}

impl Layer {
    /// A layer with weights and bias drawn uniformly from [-1, 1].
    pub fn new<R: Rng>(inputs: usize, outputs: usize, rng: &mut R) -> Layer {
        Layer {
            inputs,
            outputs,
            weights: Matrix::random(outputs, inputs, rng),
            bias: Matrix::random(outputs, 1, rng),
            input_vector: None,
            output_vector: None,
        }
    }

    /// Computes `sigmoid(W·x + b)`, caches `x` and the activation, and
    /// returns the activation as a fresh column matrix.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix, NetError> {
        if input.rows != self.inputs || input.cols != 1 {
            return Err(NetError::Shape {
                op: "forward",
                expected: format!("a {}x1 column vector", self.inputs),
                found: format!("{}x{}", input.rows, input.cols),
            });
        }

        let mut activation = Matrix::multiply(&self.weights, input)?;
        activation.combine_mut(&self.bias, |x, y| x + y)?;
        activation.map_mut(sigmoid);

        self.input_vector = Some(input.clone());
        self.output_vector = Some(activation.clone());
        Ok(activation)
    }

    /// One in-place backward adjustment given the error already propagated
    /// to this layer's output, scaled by `learning_rate`.
    ///
    /// Gradient is `dsigmoid(output) ⊙ error * learning_rate`; the weight
    /// delta is its outer product with the cached input. Requires a
    /// preceding `forward` call so both caches are populated.
    pub(crate) fn adjust(&mut self, error: &Matrix, learning_rate: f64) -> Result<(), NetError> {
        let (input, output) = match (&self.input_vector, &self.output_vector) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                return Err(NetError::Shape {
                    op: "adjust",
                    expected: "a cached forward pass".to_string(),
                    found: "no cached activations".to_string(),
                })
            }
        };

        let mut gradient = output.map(dsigmoid);
        gradient.combine_mut(error, |x, y| x * y)?;
        gradient.map_mut(|x| x * learning_rate);

        let weights_delta = Matrix::multiply(&gradient, &input.transpose())?;

        self.weights.combine_mut(&weights_delta, |x, y| x + y)?;
        self.bias.combine_mut(&gradient, |x, y| x + y)?;
        Ok(())
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// The (outputs × inputs) weight matrix. Read-only; export with
    /// `to_rows` for display.
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// The (outputs × 1) bias matrix.
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    /// The input column from the most recent forward pass, if any.
    pub fn input_vector(&self) -> Option<&Matrix> {
        self.input_vector.as_ref()
    }

    /// The activation column from the most recent forward pass, if any.
    pub fn output_vector(&self) -> Option<&Matrix> {
        self.output_vector.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn new_layer_has_expected_shapes() {
        let layer = Layer::new(3, 2, &mut test_rng());
        assert_eq!(layer.weights().rows, 2);
        assert_eq!(layer.weights().cols, 3);
        assert_eq!(layer.bias().rows, 2);
        assert_eq!(layer.bias().cols, 1);
        assert!(layer.input_vector().is_none());
        assert!(layer.output_vector().is_none());
    }

    #[test]
    fn forward_outputs_sigmoid_range_and_caches() {
        let mut layer = Layer::new(2, 3, &mut test_rng());
        let input = Matrix::column(&[0.5, -0.25]);
        let out = layer.forward(&input).unwrap();

        assert_eq!(out.rows, 3);
        assert_eq!(out.cols, 1);
        for &y in &out.to_flat_vec() {
            assert!(y > 0.0 && y < 1.0);
        }
        assert_eq!(layer.input_vector(), Some(&input));
        assert_eq!(layer.output_vector(), Some(&out));
    }

    #[test]
    fn forward_rejects_wrong_height_or_non_column_input() {
        let mut layer = Layer::new(2, 1, &mut test_rng());
        let too_tall = Matrix::column(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            layer.forward(&too_tall),
            Err(NetError::Shape { op: "forward", .. })
        ));

        let not_a_column = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            layer.forward(&not_a_column),
            Err(NetError::Shape { op: "forward", .. })
        ));
    }

    #[test]
    fn forward_overwrites_the_previous_cache() {
        let mut layer = Layer::new(1, 1, &mut test_rng());
        let first = Matrix::column(&[0.0]);
        let second = Matrix::column(&[1.0]);
        layer.forward(&first).unwrap();
        layer.forward(&second).unwrap();
        assert_eq!(layer.input_vector(), Some(&second));
    }

    #[test]
    fn sigmoid_and_derivative_identities() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((dsigmoid(0.5) - 0.25).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }
}
