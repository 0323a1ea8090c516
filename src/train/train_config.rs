use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
pub struct TrainConfig {
    /// Full passes over the training rows.
    pub epochs: usize,
    /// One `EpochStats` is sent per completed epoch. If the receiver is
    /// dropped the loop terminates early.
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    /// Checked between samples so another thread can abort a long run
    /// mid-epoch.
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
