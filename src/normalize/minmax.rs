//! Column-wise min-max scalers applied to raw tabular input before training
//! and testing. A constant column (max == min) maps to 0.0 in both variants
//! rather than producing NaN from the zero denominator.

/// Scales every column of `rows` into [0, 1]: `(x - min) / (max - min)`.
pub fn min_max(rows: &mut [Vec<f64>]) {
    for_each_column(rows, |x, min, max| (x - min) / (max - min));
}

/// Scales every column of `rows` into [-1, 1]:
/// `(x - (max + min) / 2) / ((max - min) / 2)`.
pub fn min_max_negative(rows: &mut [Vec<f64>]) {
    for_each_column(rows, |x, min, max| {
        (x - 0.5 * (max + min)) / (0.5 * (max - min))
    });
}

fn for_each_column<F>(rows: &mut [Vec<f64>], scale: F)
where
    F: Fn(f64, f64, f64) -> f64,
{
    if rows.is_empty() {
        return;
    }
    let columns = rows[0].len();

    for col in 0..columns {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in rows.iter() {
            min = min.min(row[col]);
            max = max.max(row[col]);
        }

        let constant = max == min;
        for row in rows.iter_mut() {
            row[col] = if constant { 0.0 } else { scale(row[col], min, max) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_maps_columns_to_unit_interval() {
        let mut rows = vec![vec![2.0, 10.0], vec![4.0, 30.0], vec![6.0, 20.0]];
        min_max(&mut rows);
        assert_eq!(rows[0], vec![0.0, 0.0]);
        assert_eq!(rows[1], vec![1.0, 1.0]);
        assert_eq!(rows[2], vec![0.5, 0.5]);
    }

    #[test]
    fn min_max_negative_maps_columns_to_symmetric_interval() {
        let mut rows = vec![vec![2.0], vec![4.0], vec![6.0]];
        min_max_negative(&mut rows);
        assert_eq!(rows, vec![vec![-1.0], vec![0.0], vec![1.0]]);
    }

    #[test]
    fn values_stay_in_range_per_column() {
        let mut rows = vec![
            vec![-7.5, 3.0, 0.1],
            vec![12.0, -9.0, 0.4],
            vec![0.25, 5.5, 0.2],
        ];
        min_max_negative(&mut rows);
        for row in &rows {
            for &v in row {
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn constant_column_becomes_zero_not_nan() {
        let mut rows = vec![vec![3.0, 1.0], vec![3.0, 2.0]];
        min_max_negative(&mut rows);
        assert_eq!(rows[0][0], 0.0);
        assert_eq!(rows[1][0], 0.0);
        assert!(rows.iter().flatten().all(|v| v.is_finite()));

        let mut rows = vec![vec![3.0], vec![3.0]];
        min_max(&mut rows);
        assert_eq!(rows, vec![vec![0.0], vec![0.0]]);
    }
}
