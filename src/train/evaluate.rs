use crate::data::columns::extract_last_column;
use crate::multilayer::network::MultilayerNetwork;
use crate::normalize::minmax::min_max_negative;

/// Result of running a trained network over a labeled test set.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    pub total: usize,
    pub wrong: usize,
    /// Percentage in [0, 100].
    pub accuracy: f64,
}

/// Runs forward propagation only (no weight updates) over every normalized
/// test row and compares the predicted class (the argmax of the output
/// layer) against the row's label. Ties resolve to the lowest index.
///
/// Accuracy is `100 * (1 - wrong / total)`.
///
/// # Panics
/// Panics if `rows` is empty or the feature width does not match the input
/// layer; the studio validates both beforehand.
pub fn evaluate(network: &mut MultilayerNetwork, rows: &[Vec<f64>]) -> EvalReport {
    assert!(!rows.is_empty(), "test rows must not be empty");

    let mut features = rows.to_vec();
    let labels = extract_last_column(&mut features);
    min_max_negative(&mut features);

    assert_eq!(
        features[0].len(),
        network.input_size(),
        "feature count must match the input layer size"
    );

    let total = features.len();
    let mut wrong = 0;

    for (inputs, &expected) in features.iter().zip(labels.iter()) {
        network.propagate(inputs);
        let outputs = network.layers.last().expect("network has layers").outputs();
        if first_max(&outputs) != expected as usize {
            wrong += 1;
        }
    }

    EvalReport {
        total,
        wrong,
        accuracy: 100.0 * (1.0 - wrong as f64 / total as f64),
    }
}

/// Index of the largest value; on ties the earliest index wins.
fn first_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::Activation;

    /// 1 feature, 2 classes. Features normalize to -1 (class 0) and +1
    /// (class 1); steep opposing weights make the classification exact.
    fn saturating_net() -> MultilayerNetwork {
        let mut net = MultilayerNetwork::new(1, 2, Activation::Sigmoid);
        net.layers[0].neurons[0].weights = vec![-5.0, 5.0];
        for neuron in net.layers[1].neurons.iter_mut() {
            neuron.bias = 0.0;
        }
        net
    }

    #[test]
    fn perfect_classifier_scores_hundred() {
        let mut net = saturating_net();
        let rows = vec![vec![0.0, 0.0], vec![10.0, 1.0]];
        let report = evaluate(&mut net, &rows);
        assert_eq!(report, EvalReport { total: 2, wrong: 0, accuracy: 100.0 });
    }

    #[test]
    fn mislabeled_rows_are_counted_wrong() {
        let mut net = saturating_net();
        // Second row carries the wrong label on purpose.
        let rows = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 0.0],
            vec![10.0, 1.0],
        ];
        let report = evaluate(&mut net, &rows);
        assert_eq!(report.wrong, 1);
        assert_eq!(report.accuracy, 75.0);
    }

    #[test]
    fn argmax_ties_resolve_to_lowest_index() {
        // Zero weights: both outputs are sigmoid(0) = 0.5, so every
        // prediction is class 0.
        let mut net = MultilayerNetwork::new(1, 2, Activation::Sigmoid);
        net.layers[0].neurons[0].weights = vec![0.0, 0.0];

        let rows = vec![vec![0.0, 0.0], vec![10.0, 1.0]];
        let report = evaluate(&mut net, &rows);
        assert_eq!(report.wrong, 1);
        assert_eq!(report.accuracy, 50.0);
    }

    #[test]
    fn first_max_prefers_earliest_on_equal_values() {
        assert_eq!(first_max(&[0.5, 0.5, 0.5]), 0);
        assert_eq!(first_max(&[0.1, 0.9, 0.9]), 1);
    }
}
