use rand::Rng;

use crate::{Matrix, ShapeMismatchError};

/// One layer of a [`Network`].
///
/// The stack only ever contains these two kinds, so the forward pass can
/// match exhaustively instead of dispatching through trait objects.
#[derive(Debug, Clone)]
pub enum Layer {
    /// Affine transform with no bias; `weight` maps
    /// `input_features -> output_features` and has shape
    /// `output_features x input_features`.
    Linear {
        /// The layer's weight matrix.
        weight: Matrix,
    },
    /// Shape-preserving elementwise hyperbolic tangent.
    Tanh,
}

/// Number of output features of every network; the single output drives the
/// flap decision.
pub const OUTPUT_FEATURES: usize = 1;

/// An ordered stack of alternating linear and tanh layers.
///
/// The topology (input feature count and hidden layer sizes) is fixed for
/// the lifetime of the network; evolution only ever replaces weight values,
/// never the structure. After each [`Self::forward`] call the network
/// retains the activation trace (raw input plus every tanh output) for
/// external introspection; later forward passes do not depend on it.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    activations: Vec<Matrix>,
}

impl Network {
    /// Builds a network with freshly randomized weights.
    ///
    /// For input width `k` and hidden sizes `h1..hn` the stack is
    /// `Linear(k->h1), Tanh, Linear(h1->h2), Tanh, ..., Linear(hn->1), Tanh`.
    /// With no hidden layers the stack is a single `Linear(k->1), Tanh`.
    ///
    /// # Panics
    ///
    /// Panics if `input_features` is zero or any hidden size is zero.
    #[must_use]
    pub fn random<R>(input_features: usize, hidden_layers: &[usize], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(input_features > 0, "network needs at least one input");
        let mut layers = Vec::with_capacity((hidden_layers.len() + 1) * 2);
        let mut previous = input_features;
        for &neurons in hidden_layers {
            assert!(neurons > 0, "hidden layer sizes must be positive");
            layers.push(Layer::Linear {
                weight: Matrix::random(neurons, previous, rng),
            });
            layers.push(Layer::Tanh);
            previous = neurons;
        }
        layers.push(Layer::Linear {
            weight: Matrix::random(OUTPUT_FEATURES, previous, rng),
        });
        layers.push(Layer::Tanh);

        Self {
            layers,
            activations: Vec::new(),
        }
    }

    /// Builds a network from explicit linear-layer weights, interleaving a
    /// tanh layer after each. Used by the genetic operators to assemble
    /// offspring networks.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty, consecutive weights do not chain
    /// (`weights[i].rows() != weights[i + 1].cols()`), or the final layer
    /// does not produce exactly [`OUTPUT_FEATURES`] outputs.
    #[must_use]
    pub fn from_weights(weights: Vec<Matrix>) -> Self {
        assert!(!weights.is_empty(), "network needs at least one layer");
        for pair in weights.windows(2) {
            assert_eq!(
                pair[0].rows(),
                pair[1].cols(),
                "consecutive linear layers must chain"
            );
        }
        assert_eq!(
            weights.last().map(Matrix::rows),
            Some(OUTPUT_FEATURES),
            "final layer must produce the flap output"
        );

        let layers = weights
            .into_iter()
            .flat_map(|weight| [Layer::Linear { weight }, Layer::Tanh])
            .collect();
        Self {
            layers,
            activations: Vec::new(),
        }
    }

    /// Returns the layer stack in order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the weight matrices of the linear layers, in order.
    pub fn linear_weights(&self) -> impl Iterator<Item = &Matrix> + '_ {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Linear { weight } => Some(weight),
            Layer::Tanh => None,
        })
    }

    /// Number of input features expected by [`Self::forward`].
    #[must_use]
    pub fn input_features(&self) -> usize {
        self.linear_weights()
            .next()
            .map_or(0, Matrix::cols)
    }

    /// Runs inference on a `1 x input_features` input matrix.
    ///
    /// Applies each layer in order and returns the final `1 x 1` output.
    /// Deterministic given weights and input. The input and every tanh
    /// output are recorded into the activation trace.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix, ShapeMismatchError> {
        let mut data = input.clone();
        let mut activations = vec![data.clone()];

        for layer in &self.layers {
            data = match layer {
                Layer::Linear { weight } => data.linear(weight, None)?,
                Layer::Tanh => {
                    let out = data.tanh();
                    activations.push(out.clone());
                    out
                }
            };
        }

        self.activations = activations;
        Ok(data)
    }

    /// Returns the activation trace of the most recent forward pass: the raw
    /// input followed by every tanh layer's output. Empty before the first
    /// call.
    #[must_use]
    pub fn activations(&self) -> &[Matrix] {
        &self.activations
    }
}

/// The control decision derived from a network output: flap when the single
/// output value is strictly positive. An output of exactly `0.0` means no
/// flap.
#[must_use]
pub fn should_flap(output: &Matrix) -> bool {
    output.get(0, 0) > 0.0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn input(values: Vec<f32>) -> Matrix {
        Matrix::from_rows(vec![values])
    }

    #[test]
    fn test_layer_stack_alternates_linear_and_tanh() {
        let mut rng = Pcg32::seed_from_u64(1);
        let network = Network::random(3, &[2, 3], &mut rng);
        // three linear layers (3->2, 2->3, 3->1), each followed by tanh
        assert_eq!(network.layers().len(), 6);
        let shapes: Vec<_> = network
            .linear_weights()
            .map(|w| (w.rows(), w.cols()))
            .collect();
        assert_eq!(shapes, vec![(2, 3), (3, 2), (1, 3)]);
        assert_eq!(network.input_features(), 3);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut network = Network::random(3, &[2, 3], &mut rng);
        let input = input(vec![0.3, -0.2, 0.9]);
        let first = network.forward(&input).unwrap();
        let second = network.forward(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_forward_output_shape_and_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut network = Network::random(4, &[5, 4], &mut rng);
        let output = network
            .forward(&input(vec![1.0, -1.0, 0.5, -0.5]))
            .unwrap();
        assert_eq!((output.rows(), output.cols()), (1, 1));
        assert!(output.get(0, 0).abs() < 1.0);
    }

    #[test]
    fn test_forward_records_activation_trace() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut network = Network::random(3, &[2, 3], &mut rng);
        assert!(network.activations().is_empty());

        let input = input(vec![0.1, 0.2, 0.3]);
        network.forward(&input).unwrap();
        // raw input + one entry per tanh layer
        let trace = network.activations();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace[0], input);
        // every activation after the input is a tanh output
        for activation in &trace[1..] {
            assert!(activation.iter().all(|v| (-1.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_forward_rejects_wrong_input_width() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut network = Network::random(3, &[2], &mut rng);
        let err = network.forward(&input(vec![1.0, 2.0])).unwrap_err();
        assert_eq!(err.op, "multiply");
    }

    #[test]
    fn test_no_hidden_layers() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut network = Network::random(2, &[], &mut rng);
        assert_eq!(network.layers().len(), 2);
        let output = network.forward(&input(vec![0.5, -0.5])).unwrap();
        assert_eq!((output.rows(), output.cols()), (1, 1));
    }

    #[test]
    fn test_from_weights_round_trips_topology() {
        let mut rng = Pcg32::seed_from_u64(7);
        let source = Network::random(3, &[2], &mut rng);
        let rebuilt = Network::from_weights(source.linear_weights().cloned().collect());
        let mut a = source.clone();
        let mut b = rebuilt;
        let input = input(vec![0.1, -0.6, 0.4]);
        assert_eq!(a.forward(&input).unwrap(), b.forward(&input).unwrap());
    }

    #[test]
    #[should_panic(expected = "must chain")]
    fn test_from_weights_rejects_broken_chain() {
        let mut rng = Pcg32::seed_from_u64(8);
        let weights = vec![
            Matrix::random(2, 3, &mut rng),
            Matrix::random(1, 4, &mut rng),
        ];
        let _ = Network::from_weights(weights);
    }

    #[test]
    fn test_flap_decision_boundary() {
        // exactly zero is a no-flap boundary
        assert!(!should_flap(&Matrix::from_rows(vec![vec![0.0]])));
        assert!(should_flap(&Matrix::from_rows(vec![vec![1e-9]])));
        assert!(!should_flap(&Matrix::from_rows(vec![vec![-1e-9]])));
    }
}
