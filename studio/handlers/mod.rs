pub mod dataset;
pub mod hopfield;
pub mod multilayer;
pub mod train;
pub mod train_sse;
