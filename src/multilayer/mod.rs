pub mod layer;
pub mod network;
pub mod neuron;

pub use layer::Layer;
pub use network::MultilayerNetwork;
pub use neuron::Neuron;
