use crate::multilayer::neuron::Neuron;

/// An ordered group of neurons at one depth of the network. Layer 0 is the
/// input layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    /// A layer of `size` neurons, each with `fan_out` random outgoing weights.
    pub fn new(size: usize, fan_out: usize) -> Layer {
        Layer {
            neurons: (0..size).map(|_| Neuron::with_random_weights(fan_out)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    /// Output values of every neuron, in order.
    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.output).collect()
    }
}
