/// Upper bound on synchronous recall sweeps. Two-cycles are possible under
/// synchronous updates, so recall must not rely on convergence alone.
pub const MAX_RECALL_STEPS: usize = 100;

/// A Hopfield associative memory over `units` bipolar (+1/-1) units.
///
/// Patterns are stored by Hebbian superposition into a symmetric,
/// zero-diagonal weight matrix and recovered by sign-thresholded synchronous
/// updates. No 1/N scaling is applied to imprints; repeated `imprint` calls
/// simply accumulate.
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    pub units: usize,
    pub weights: Vec<Vec<f64>>,
}

impl HopfieldNetwork {
    /// Creates a network of `units` neurons with all weights at zero.
    pub fn new(units: usize) -> HopfieldNetwork {
        HopfieldNetwork {
            units,
            weights: vec![vec![0.0; units]; units],
        }
    }

    /// Stores `pattern` into the weight matrix: for every pair i != j,
    /// `w[i][j] += pattern[i] * pattern[j]`. The diagonal stays zero.
    ///
    /// `pattern.len() == self.units` is a caller precondition.
    pub fn imprint(&mut self, pattern: &[i8]) {
        debug_assert_eq!(pattern.len(), self.units);
        for i in 0..self.units {
            for j in 0..self.units {
                if i != j {
                    self.weights[i][j] += f64::from(pattern[i]) * f64::from(pattern[j]);
                }
            }
        }
    }

    /// Recalls the stored pattern nearest to `initial`.
    ///
    /// Each sweep recomputes every unit from the full previous state
    /// (synchronous update): unit i becomes +1 when
    /// `sum_j w[i][j] * state[j] >= 0`, else -1. Sweeps repeat until the
    /// state stops changing, capped at [`MAX_RECALL_STEPS`] so an oscillating
    /// state still terminates.
    pub fn recall(&self, initial: &[i8]) -> Vec<i8> {
        debug_assert_eq!(initial.len(), self.units);
        let mut state: Vec<i8> = initial.to_vec();

        for _ in 0..MAX_RECALL_STEPS {
            let next: Vec<i8> = self
                .weights
                .iter()
                .map(|row| {
                    let sum: f64 = row
                        .iter()
                        .zip(state.iter())
                        .map(|(w, &s)| w * f64::from(s))
                        .sum();
                    if sum >= 0.0 { 1 } else { -1 }
                })
                .collect();

            if next == state {
                break;
            }
            state = next;
        }

        state
    }

    /// Clears all imprinted patterns, keeping the size.
    pub fn reset(&mut self) {
        self.weights = vec![vec![0.0; self.units]; self.units];
    }

    /// Resizes the network to `units` neurons. The weight matrix is rebuilt
    /// from scratch: a size change discards every imprinted pattern.
    pub fn resize(&mut self, units: usize) {
        self.units = units;
        self.weights = vec![vec![0.0; units]; units];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imprint_is_symmetric_with_zero_diagonal() {
        let mut net = HopfieldNetwork::new(9);
        let pattern = [1, -1, 1, -1, 1, -1, 1, -1, 1];
        net.imprint(&pattern);
        net.imprint(&[-1, -1, -1, 1, 1, 1, -1, -1, -1]);

        for i in 0..9 {
            assert_eq!(net.weights[i][i], 0.0);
            for j in 0..9 {
                assert_eq!(net.weights[i][j], net.weights[j][i]);
            }
        }
    }

    #[test]
    fn imprint_accumulates_across_calls() {
        let mut net = HopfieldNetwork::new(4);
        let p = [1, 1, -1, -1];
        net.imprint(&p);
        assert_eq!(net.weights[0][1], 1.0);
        net.imprint(&p);
        assert_eq!(net.weights[0][1], 2.0);
        assert_eq!(net.weights[0][2], -2.0);
    }

    #[test]
    fn recall_recovers_imprinted_pattern() {
        // 3x3 "cross" pattern, single imprint, clean probe.
        let mut net = HopfieldNetwork::new(9);
        let cross = [-1, 1, -1, 1, 1, 1, -1, 1, -1];
        net.imprint(&cross);
        assert_eq!(net.recall(&cross), cross.to_vec());
    }

    #[test]
    fn recall_repairs_corrupted_bits() {
        let mut net = HopfieldNetwork::new(9);
        let cross = [-1, 1, -1, 1, 1, 1, -1, 1, -1];
        net.imprint(&cross);

        let mut noisy = cross;
        noisy[0] = 1;
        assert_eq!(net.recall(&noisy), cross.to_vec());
    }

    #[test]
    fn recall_terminates_on_blank_network() {
        // All-zero weights: every sum is 0, so every unit saturates to +1 in
        // one sweep and the state is then a fixed point.
        let net = HopfieldNetwork::new(4);
        assert_eq!(net.recall(&[-1, -1, -1, -1]), vec![1, 1, 1, 1]);
    }

    #[test]
    fn resize_discards_memory() {
        let mut net = HopfieldNetwork::new(4);
        net.imprint(&[1, 1, 1, 1]);
        net.resize(9);
        assert_eq!(net.units, 9);
        assert!(net.weights.iter().flatten().all(|&w| w == 0.0));
    }
}
