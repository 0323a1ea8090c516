pub mod activation;
pub mod data;
pub mod hopfield;
pub mod multilayer;
pub mod normalize;
pub mod train;

// Convenience re-exports
pub use activation::activation::Activation;
pub use hopfield::network::HopfieldNetwork;
pub use multilayer::layer::Layer;
pub use multilayer::network::MultilayerNetwork;
pub use multilayer::neuron::Neuron;
pub use train::epoch_stats::EpochStats;
pub use train::evaluate::{evaluate, EvalReport};
pub use train::loop_fn::train_loop;
pub use train::train_config::TrainConfig;
