use rand::Rng;

/// Half-width of the uniform range fresh weights are drawn from.
pub const WEIGHT_INIT_RANGE: f64 = 0.1;

/// A single neuron.
///
/// `weights` holds the outgoing connections, one per neuron in the *next*
/// layer; output-layer neurons therefore carry an empty weight vector.
/// `output`, `delta` and `error` are scratch values refreshed by every
/// forward pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neuron {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub output: f64,
    pub delta: f64,
    pub error: f64,
}

impl Neuron {
    /// A neuron with `fan_out` outgoing weights drawn uniformly from
    /// [-0.1, 0.1] and all scratch values at zero.
    pub fn with_random_weights(fan_out: usize) -> Neuron {
        Neuron {
            weights: random_weights(fan_out),
            ..Neuron::default()
        }
    }
}

/// Generates `len` weights uniformly distributed in [-0.1, 0.1].
pub fn random_weights(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| rng.gen_range(-WEIGHT_INIT_RANGE..=WEIGHT_INIT_RANGE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_weights_stay_in_init_range() {
        let w = random_weights(200);
        assert_eq!(w.len(), 200);
        assert!(w.iter().all(|&x| (-0.1..=0.1).contains(&x)));
    }

    #[test]
    fn fresh_neuron_has_zeroed_scratch_state() {
        let n = Neuron::with_random_weights(3);
        assert_eq!(n.weights.len(), 3);
        assert_eq!((n.bias, n.output, n.delta, n.error), (0.0, 0.0, 0.0, 0.0));
    }
}
