use crate::activation::activation::Activation;
use crate::multilayer::layer::Layer;
use crate::multilayer::neuron::{random_weights, Neuron};

pub const MIN_LAYERS: usize = 2;
pub const MAX_LAYERS: usize = 7;
pub const MIN_NEURONS_IN_LAYER: usize = 1;
pub const MAX_NEURONS_IN_LAYER: usize = 6;

/// Neuron count of a freshly inserted hidden layer.
pub const DEFAULT_HIDDEN_SIZE: usize = 3;

/// A fully connected feed-forward network with per-neuron state.
///
/// Invariant: for every non-terminal layer i,
/// `layers[i].neurons[*].weights.len() == layers[i + 1].neurons.len()`;
/// output-layer neurons have empty weight vectors. Structural mutation
/// re-derives the affected weight vectors (see `reseed_weights`). The whole
/// network is `Clone`, so callers that need a snapshot of pre-mutation state
/// take one by cloning instead of patching layers incrementally.
#[derive(Debug, Clone)]
pub struct MultilayerNetwork {
    pub layers: Vec<Layer>,
    pub activation: Activation,
    pub learning_rate: f64,
    /// When set, `backward()` also moves each neuron's bias by
    /// `learning_rate * delta`. Off by default.
    pub use_bias: bool,
}

impl MultilayerNetwork {
    /// A two-layer network: `input_size` input neurons wired to
    /// `output_size` output neurons.
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> MultilayerNetwork {
        let layers = vec![
            Layer::new(input_size, output_size),
            Layer::new(output_size, 0),
        ];
        MultilayerNetwork {
            layers,
            activation,
            learning_rate: 0.1,
            use_bias: false,
        }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(Layer::size).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(Layer::size).unwrap_or(0)
    }

    /// Replaces the input and output layers' sizes, keeping hidden layers.
    /// All weight vectors are regenerated; training state does not survive a
    /// topology change.
    pub fn resize_ends(&mut self, input_size: usize, output_size: usize) {
        let last = self.layers.len() - 1;
        self.layers[0].neurons = vec![Neuron::default(); input_size];
        self.layers[last].neurons = vec![Neuron::default(); output_size];
        self.reseed_weights(0);
    }

    // ── Forward / backward ──────────────────────────────────────────────

    /// Propagates `inputs` through the network: inputs are copied verbatim
    /// into layer 0 (no activation there), then every later neuron computes
    /// `activate(bias + sum of weighted previous outputs)`.
    ///
    /// `inputs.len() == self.input_size()` is a caller precondition.
    pub fn propagate(&mut self, inputs: &[f64]) {
        debug_assert_eq!(inputs.len(), self.input_size());
        for (neuron, &value) in self.layers[0].neurons.iter_mut().zip(inputs) {
            neuron.output = value;
        }

        for l in 1..self.layers.len() {
            let prev_count = self.layers[l - 1].size();
            for j in 0..self.layers[l].size() {
                let mut net = self.layers[l].neurons[j].bias;
                for i in 0..prev_count {
                    let prev = &self.layers[l - 1].neurons[i];
                    net += prev.weights[j] * prev.output;
                }
                self.layers[l].neurons[j].output = self.activation.activate(net);
            }
        }
    }

    /// Full training pass: propagation plus error/delta seeding for every
    /// layer, output first. The output layer's error is the squared-error
    /// term `0.5 * (target - output)^2`; interior errors are the
    /// delta-weighted sums from the next layer. Deltas are computed for the
    /// input layer too, matching the visualization, though nothing consumes
    /// them there.
    pub fn forward(&mut self, inputs: &[f64], targets: &[f64]) {
        self.propagate(inputs);
        self.seed_errors(targets);
    }

    fn seed_errors(&mut self, targets: &[f64]) {
        let last = self.layers.len() - 1;
        for l in (0..=last).rev() {
            for n in 0..self.layers[l].size() {
                let output = self.layers[l].neurons[n].output;

                let error = if l == last {
                    let diff = targets[n] - output;
                    0.5 * diff * diff
                } else {
                    let next = &self.layers[l + 1];
                    self.layers[l].neurons[n]
                        .weights
                        .iter()
                        .zip(next.neurons.iter())
                        .map(|(w, next_neuron)| w * next_neuron.delta)
                        .sum()
                };

                let neuron = &mut self.layers[l].neurons[n];
                neuron.error = error;
                neuron.delta = self.activation.delta(error, output);
            }
        }
    }

    /// Applies the delta rule to every connection: for each neuron in layers
    /// 1.., its delta scales the incoming weights held by the previous layer.
    pub fn backward(&mut self) {
        let lr = self.learning_rate;
        for l in 1..self.layers.len() {
            for n in 0..self.layers[l].size() {
                let delta = self.layers[l].neurons[n].delta;
                for prev in self.layers[l - 1].neurons.iter_mut() {
                    prev.weights[n] += lr * delta * prev.output;
                }
                if self.use_bias {
                    self.layers[l].neurons[n].bias += lr * delta;
                }
            }
        }
    }

    // ── Structural mutation ─────────────────────────────────────────────

    /// Inserts a fresh hidden layer of [`DEFAULT_HIDDEN_SIZE`] neurons just
    /// before the output layer. Returns false when at [`MAX_LAYERS`].
    pub fn add_layer(&mut self) -> bool {
        if self.layers.len() >= MAX_LAYERS {
            return false;
        }
        let insert_at = self.layers.len() - 1;
        self.layers.insert(insert_at, Layer::new(DEFAULT_HIDDEN_SIZE, 0));
        self.reseed_weights(insert_at.saturating_sub(1));
        true
    }

    /// Removes the hidden layer closest to the output. Returns false when at
    /// [`MIN_LAYERS`].
    pub fn remove_layer(&mut self) -> bool {
        if self.layers.len() <= MIN_LAYERS {
            return false;
        }
        let remove_at = self.layers.len() - 2;
        self.layers.remove(remove_at);
        self.reseed_weights(remove_at.saturating_sub(1));
        true
    }

    /// Appends one neuron to layer `layer_id`. Returns false when the layer
    /// is already at [`MAX_NEURONS_IN_LAYER`] or the index is out of range.
    pub fn add_neuron(&mut self, layer_id: usize) -> bool {
        match self.layers.get_mut(layer_id) {
            Some(layer) if layer.size() < MAX_NEURONS_IN_LAYER => {
                layer.neurons.push(Neuron::default());
            }
            _ => return false,
        }
        self.reseed_weights(layer_id.saturating_sub(1));
        true
    }

    /// Drops the last neuron of layer `layer_id`. Returns false when the
    /// layer is already at [`MIN_NEURONS_IN_LAYER`] or the index is out of
    /// range.
    pub fn remove_neuron(&mut self, layer_id: usize) -> bool {
        match self.layers.get_mut(layer_id) {
            Some(layer) if layer.size() > MIN_NEURONS_IN_LAYER => {
                layer.neurons.pop();
            }
            _ => return false,
        }
        self.reseed_weights(layer_id.saturating_sub(1));
        true
    }

    /// Regenerates the weight vectors of layers `from..`, sized to the next
    /// layer's neuron count (zero for the output layer). Called after every
    /// structural change, since outgoing-weight lengths depend on the
    /// downstream layer.
    pub fn reseed_weights(&mut self, from: usize) {
        let count = self.layers.len();
        for l in from..count {
            let fan_out = if l + 1 < count { self.layers[l + 1].size() } else { 0 };
            for neuron in self.layers[l].neurons.iter_mut() {
                neuron.weights = random_weights(fan_out);
            }
        }
    }

    /// Checks the outgoing-weight-length invariant across all layers.
    pub fn weights_consistent(&self) -> bool {
        self.layers.windows(2).all(|pair| {
            pair[0]
                .neurons
                .iter()
                .all(|n| n.weights.len() == pair[1].size())
        }) && self
            .layers
            .last()
            .map(|l| l.neurons.iter().all(|n| n.weights.is_empty()))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired(input: usize, hidden: &[usize], output: usize) -> MultilayerNetwork {
        let mut net = MultilayerNetwork::new(input, output, Activation::Sigmoid);
        for &size in hidden {
            assert!(net.add_layer());
            let idx = net.layers.len() - 2;
            while net.layers[idx].size() > size {
                assert!(net.remove_neuron(idx));
            }
            while net.layers[idx].size() < size {
                assert!(net.add_neuron(idx));
            }
        }
        net
    }

    #[test]
    fn single_connection_sigmoid_outputs_half_on_zero_input() {
        let mut net = MultilayerNetwork::new(1, 1, Activation::Sigmoid);
        net.layers[0].neurons[0].weights = vec![1.0];
        net.layers[1].neurons[0].bias = 0.0;

        net.propagate(&[0.0]);
        assert_eq!(net.layers[1].neurons[0].output, 0.5);
    }

    #[test]
    fn forward_is_deterministic() {
        let mut a = wired(2, &[3], 2);
        let mut b = a.clone();

        a.forward(&[0.25, -0.75], &[0.01, 0.99]);
        b.forward(&[0.25, -0.75], &[0.01, 0.99]);

        assert_eq!(a.layers, b.layers);
    }

    #[test]
    fn forward_seeds_errors_and_deltas_on_every_layer() {
        let mut net = wired(2, &[3], 2);
        for layer in net.layers.iter_mut() {
            for neuron in layer.neurons.iter_mut() {
                neuron.weights.iter_mut().for_each(|w| *w = 0.05);
            }
        }
        net.forward(&[0.3, -0.4], &[0.99, 0.01]);

        let last = net.layers.len() - 1;
        for neuron in &net.layers[last].neurons {
            // Terminal error is the squared-error term, strictly positive here.
            assert!(neuron.error > 0.0);
        }
        // Interior and input layers receive delta-weighted error sums; the
        // input layer is seeded too even though nothing consumes it.
        assert!(net.layers[0].neurons.iter().all(|n| n.error != 0.0));
    }

    #[test]
    fn backward_moves_weights_along_delta() {
        let mut net = MultilayerNetwork::new(1, 1, Activation::Sigmoid);
        net.learning_rate = 0.5;
        net.layers[0].neurons[0].weights = vec![0.0];

        net.forward(&[1.0], &[0.99]);
        let delta = net.layers[1].neurons[0].delta;
        net.backward();

        let expected = 0.5 * delta * 1.0;
        assert!((net.layers[0].neurons[0].weights[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn bias_updates_only_when_enabled() {
        let mut fixed = MultilayerNetwork::new(1, 1, Activation::Sigmoid);
        fixed.forward(&[1.0], &[0.99]);
        fixed.backward();
        assert_eq!(fixed.layers[1].neurons[0].bias, 0.0);

        let mut learned = MultilayerNetwork::new(1, 1, Activation::Sigmoid);
        learned.use_bias = true;
        learned.forward(&[1.0], &[0.99]);
        learned.backward();
        assert_ne!(learned.layers[1].neurons[0].bias, 0.0);
    }

    #[test]
    fn add_layer_inserts_before_output_and_keeps_invariant() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Tanh);
        assert!(net.add_layer());
        assert_eq!(net.layers.len(), 3);
        assert_eq!(net.layers[1].size(), DEFAULT_HIDDEN_SIZE);
        assert!(net.weights_consistent());
    }

    #[test]
    fn layer_count_limits_are_enforced() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Tanh);
        assert!(!net.remove_layer());
        for _ in 0..MAX_LAYERS {
            net.add_layer();
        }
        assert_eq!(net.layers.len(), MAX_LAYERS);
        assert!(!net.add_layer());
    }

    #[test]
    fn remove_layer_drops_second_to_last() {
        let mut net = wired(2, &[4, 5], 2);
        let removed_size = net.layers[2].size();
        assert_eq!(removed_size, 5);
        assert!(net.remove_layer());
        assert_eq!(net.layers.len(), 3);
        assert_eq!(net.layers[1].size(), 4);
        assert!(net.weights_consistent());
    }

    #[test]
    fn add_neuron_regrows_upstream_weight_vectors() {
        // Hidden layer of 2 feeding 3 outputs: after adding a neuron the
        // input layer's vectors must stretch to 3 while the hidden layer's
        // stay at the unchanged output size.
        let mut net = wired(2, &[2], 3);
        assert!(net.add_neuron(1));

        assert_eq!(net.layers[1].size(), 3);
        for n in &net.layers[0].neurons {
            assert_eq!(n.weights.len(), 3);
        }
        for n in &net.layers[1].neurons {
            assert_eq!(n.weights.len(), 3);
        }
        assert!(net.weights_consistent());
    }

    #[test]
    fn neuron_count_limits_are_enforced() {
        let mut net = MultilayerNetwork::new(1, 1, Activation::Sigmoid);
        assert!(!net.remove_neuron(1));
        for _ in 0..MAX_NEURONS_IN_LAYER {
            net.add_neuron(1);
        }
        assert_eq!(net.layers[1].size(), MAX_NEURONS_IN_LAYER);
        assert!(!net.add_neuron(1));
        assert!(net.weights_consistent());
    }

    #[test]
    fn resize_ends_rebuilds_terminal_layers() {
        let mut net = wired(2, &[3], 2);
        net.resize_ends(4, 5);
        assert_eq!(net.input_size(), 4);
        assert_eq!(net.output_size(), 5);
        assert!(net.weights_consistent());
    }
}
