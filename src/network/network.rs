use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::NetError;
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;

/// A feedforward network: an ordered chain of sigmoid layers mapping
/// `num_inputs` values to `num_outputs` values.
///
/// Consecutive layer widths chain exactly; the topology is fixed at
/// construction and only the weights and biases change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MimirNet {
    num_inputs: usize,
    num_outputs: usize,
    learning_rate: f64,
    layers: Vec<Layer>,
}

impl MimirNet {
    /// Builds a network with one layer per width transition:
    /// input → hidden_layout[0] → … → hidden_layout[last] → output, or
    /// input → output directly when `hidden_layout` is empty.
    ///
    /// Weights and biases start uniform in [-1, 1], drawn from `rng`.
    pub fn new<R: Rng>(
        num_inputs: usize,
        num_outputs: usize,
        hidden_layout: &[usize],
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<MimirNet, NetError> {
        if num_inputs < 1 || num_outputs < 1 {
            return Err(NetError::InvalidTopology {
                inputs: num_inputs,
                outputs: num_outputs,
            });
        }

        let mut layers = Vec::with_capacity(hidden_layout.len() + 1);
        let mut width = num_inputs;
        for &hidden in hidden_layout {
            layers.push(Layer::new(width, hidden, rng));
            width = hidden;
        }
        layers.push(Layer::new(width, num_outputs, rng));

        Ok(MimirNet {
            num_inputs,
            num_outputs,
            learning_rate,
            layers,
        })
    }

    /// Convenience constructor: `num_hidden` hidden layers of
    /// `hidden_size` neurons each.
    pub fn uniform<R: Rng>(
        num_inputs: usize,
        num_hidden: usize,
        num_outputs: usize,
        hidden_size: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<MimirNet, NetError> {
        let layout = vec![hidden_size; num_hidden];
        MimirNet::new(num_inputs, num_outputs, &layout, learning_rate, rng)
    }

    /// Evaluates the network on `input`, returning the final activations
    /// as a flat vector. Overwrites every layer's cached input/output as a
    /// side effect; `train` relies on those caches.
    pub fn feedforward(&mut self, input: &[f64]) -> Result<Vec<f64>, NetError> {
        if input.len() != self.num_inputs {
            return Err(NetError::Shape {
                op: "feedforward",
                expected: format!("{} inputs", self.num_inputs),
                found: format!("{} inputs", input.len()),
            });
        }

        let mut current = Matrix::column(input);
        for layer in &mut self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current.to_flat_vec())
    }

    /// One supervised update on a single example.
    ///
    /// Runs a forward pass, takes `target - output` as the output error,
    /// then walks the layers back to front. The error is carried backward
    /// by a propagation matrix that starts as the identity sized to the
    /// output and becomes each layer's just-updated weights as the walk
    /// moves toward the input. This reuses each layer's own weight matrix
    /// as the next step's propagation operator instead of storing
    /// per-layer Jacobians; it is not textbook backpropagation (which
    /// would propagate through the pre-update weights), but it is the
    /// behavior the reference outputs were produced with.
    ///
    /// All shape validation happens before any weight is touched, so a
    /// failed call leaves the network unchanged.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<(), NetError> {
        if target.len() != self.num_outputs {
            return Err(NetError::Shape {
                op: "train",
                expected: format!("{} targets", self.num_outputs),
                found: format!("{} targets", target.len()),
            });
        }

        // Populates every layer's caches and validates the input length.
        let output = self.feedforward(input)?;

        let mut error = Matrix::column(target).combine(&Matrix::column(&output), |t, o| t - o)?;

        let mut propagator = Matrix::identity(self.num_outputs);
        for layer in self.layers.iter_mut().rev() {
            error = Matrix::multiply(&propagator.transpose(), &error)?;
            layer.adjust(&error, self.learning_rate)?;
            propagator = layer.weights().clone();
        }
        Ok(())
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// The layer chain, front to back. Read-only; intended for display
    /// collaborators that render weights and activations.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
