pub mod minmax;

pub use minmax::{min_max, min_max_negative};
