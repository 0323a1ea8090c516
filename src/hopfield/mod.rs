pub mod network;

pub use network::HopfieldNetwork;
