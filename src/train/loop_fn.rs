use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::data::columns::{class_count, extract_last_column};
use crate::multilayer::network::MultilayerNetwork;
use crate::normalize::minmax::min_max_negative;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Target vector fill values: every class slot gets `TARGET_LOW`, the
/// expected class gets `TARGET_HIGH`. Soft extremes keep sigmoid-family
/// outputs reachable.
pub const TARGET_LOW: f64 = 0.01;
pub const TARGET_HIGH: f64 = 0.99;

/// Trains `network` on `rows` for `config.epochs` epochs and returns the
/// cost of the last completed epoch.
///
/// Each row's last column is the class label; the remaining columns are
/// scaled column-wise to [-1, 1] before training. Per sample the loop builds
/// a target vector (0.01 everywhere, 0.99 at the class index), runs a
/// forward and a backward pass, and accumulates the output layer's summed
/// error. The epoch cost divides that sum by twice the sample count; note
/// the extra factor of two on top of the 0.5 already in the error terms.
///
/// # Early termination
/// - `config.stop_flag` is checked between samples; when set, the run ends
///   immediately and the last fully computed epoch cost is returned.
/// - A dropped `progress_tx` receiver also ends the run.
///
/// # Panics
/// Panics if `rows` is empty, if the feature width does not match the
/// network's input layer, or if the label classes do not fit the output
/// layer. The studio validates all of these before calling.
pub fn train_loop(
    network: &mut MultilayerNetwork,
    rows: &[Vec<f64>],
    config: &TrainConfig,
) -> f64 {
    assert!(!rows.is_empty(), "training rows must not be empty");

    let mut features = rows.to_vec();
    let labels = extract_last_column(&mut features);
    min_max_negative(&mut features);

    assert_eq!(
        features[0].len(),
        network.input_size(),
        "feature count must match the input layer size"
    );
    assert!(
        class_count(&labels) <= network.output_size(),
        "output layer is smaller than the number of classes"
    );

    let output_size = network.output_size();
    let sample_count = features.len();
    let mut last_cost = 0.0;

    'epochs: for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let mut cost_sum = 0.0;

        for (inputs, &label) in features.iter().zip(labels.iter()) {
            if let Some(ref flag) = config.stop_flag {
                if flag.load(Ordering::Relaxed) {
                    break 'epochs;
                }
            }

            let mut targets = vec![TARGET_LOW; output_size];
            targets[label as usize] = TARGET_HIGH;

            network.forward(inputs, &targets);
            network.backward();

            let output_layer = network.layers.last().expect("network has layers");
            cost_sum += output_layer.neurons.iter().map(|n| n.error).sum::<f64>();
        }

        let cost = cost_sum / (2.0 * sample_count as f64);
        last_cost = cost;

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                cost,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // Receiver gone means the consumer went away; stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    last_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::Activation;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    fn two_class_rows() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 2.0, 0.0],
            vec![9.0, 8.0, 1.0],
            vec![10.0, 9.0, 1.0],
        ]
    }

    #[test]
    fn returns_finite_cost_and_adjusts_weights() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Tanh);
        let before = net.clone();

        let cost = train_loop(&mut net, &two_class_rows(), &TrainConfig::new(3));

        assert!(cost.is_finite());
        assert_ne!(
            net.layers[0].neurons[0].weights,
            before.layers[0].neurons[0].weights
        );
    }

    #[test]
    fn emits_one_stats_entry_per_epoch() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Sigmoid);
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig {
            epochs: 5,
            progress_tx: Some(tx),
            stop_flag: None,
        };

        train_loop(&mut net, &two_class_rows(), &config);
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[4].epoch, 5);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
    }

    #[test]
    fn pre_set_stop_flag_aborts_before_any_epoch() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Tanh);
        let flag = Arc::new(AtomicBool::new(true));
        let config = TrainConfig {
            epochs: 50,
            progress_tx: None,
            stop_flag: Some(flag),
        };

        let before = net.clone();
        let cost = train_loop(&mut net, &two_class_rows(), &config);

        assert_eq!(cost, 0.0);
        assert_eq!(net.layers[0].neurons[0].weights, before.layers[0].neurons[0].weights);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_dataset_is_a_precondition_violation() {
        let mut net = MultilayerNetwork::new(2, 2, Activation::Tanh);
        train_loop(&mut net, &[], &TrainConfig::new(1));
    }
}
