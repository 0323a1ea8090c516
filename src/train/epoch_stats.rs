use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one
/// `EpochStats` value is sent at the end of every completed epoch. The studio
/// SSE handler serializes these to drive the live cost readout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Summed output-layer error over the epoch, divided by twice the sample
    /// count (the lab's historical cost normalization).
    pub cost: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
