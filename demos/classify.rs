/// Multilayer network training demo.
///
/// Trains a small tanh network on an inline two-class dataset (last column
/// is the class label), printing the per-epoch cost and the final test
/// accuracy.
///
/// Run with:
///   cargo run --example classify

use std::sync::mpsc;

use neurolab::{evaluate, train_loop, Activation, MultilayerNetwork, TrainConfig};

/// Two noisy clusters in 2D: class 0 near the origin, class 1 near (8, 8).
fn cluster_rows(offset: f64, label: f64) -> Vec<Vec<f64>> {
    let jitter = [0.0, 0.4, -0.3, 0.7, -0.6, 0.2];
    jitter
        .iter()
        .zip(jitter.iter().rev())
        .map(|(&dx, &dy)| vec![offset + dx, offset + dy, label])
        .collect()
}

fn main() {
    let mut train_rows = cluster_rows(0.0, 0.0);
    train_rows.extend(cluster_rows(8.0, 1.0));

    let mut test_rows = cluster_rows(0.5, 0.0);
    test_rows.extend(cluster_rows(7.5, 1.0));

    let mut network = MultilayerNetwork::new(2, 2, Activation::Tanh);
    network.add_layer();
    network.learning_rate = 0.1;

    let (tx, rx) = mpsc::channel();
    let config = TrainConfig {
        epochs: 25,
        progress_tx: Some(tx),
        stop_flag: None,
    };

    let final_cost = train_loop(&mut network, &train_rows, &config);
    drop(config);

    for stats in rx.iter() {
        if stats.epoch % 5 == 0 || stats.epoch == 1 {
            println!(
                "epoch {:>2}/{}: cost = {:.6}",
                stats.epoch, stats.total_epochs, stats.cost
            );
        }
    }

    let report = evaluate(&mut network, &test_rows);
    println!("\nfinal cost: {final_cost:.6}");
    println!(
        "test accuracy: {:.1}% ({} of {} wrong)",
        report.accuracy, report.wrong, report.total
    );
}
