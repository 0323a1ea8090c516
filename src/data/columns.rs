//! Helpers for slicing the label column out of a tabular dataset. The rows
//! are modified in place; the removed cells come back as a separate vector.

/// Removes the last cell of every row and returns them in row order.
/// With datasets whose final column is the class label, this splits features
/// from labels in one pass.
pub fn extract_last_column(rows: &mut [Vec<f64>]) -> Vec<f64> {
    rows.iter_mut()
        .filter_map(|row| row.pop())
        .collect()
}

/// Removes the first cell of every row and returns them in row order.
pub fn extract_first_column(rows: &mut [Vec<f64>]) -> Vec<f64> {
    rows.iter_mut()
        .filter(|row| !row.is_empty())
        .map(|row| row.remove(0))
        .collect()
}

/// Number of distinct class labels. Labels are expected to be small
/// non-negative integers stored as floats.
pub fn class_count(labels: &[f64]) -> usize {
    let mut sorted: Vec<f64> = labels.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_last_column_splits_labels_from_features() {
        let mut rows = vec![vec![1.0, 2.0, 0.0], vec![3.0, 4.0, 1.0]];
        let labels = extract_last_column(&mut rows);
        assert_eq!(labels, vec![0.0, 1.0]);
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn extract_first_column_takes_leading_cells() {
        let mut rows = vec![vec![9.0, 1.0], vec![8.0, 2.0]];
        let ids = extract_first_column(&mut rows);
        assert_eq!(ids, vec![9.0, 8.0]);
        assert_eq!(rows, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn class_count_ignores_duplicates_and_order() {
        assert_eq!(class_count(&[2.0, 0.0, 1.0, 0.0, 2.0]), 3);
        assert_eq!(class_count(&[]), 0);
    }
}
