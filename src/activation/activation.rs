use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Activation functions available to the multilayer network.
///
/// Each variant exposes the forward transfer function `activate()` and a
/// local-gradient rule `delta()` computed from the neuron's *output* value
/// rather than its pre-activation. This is the simplified delta rule used
/// throughout the lab; it is what the visualized training procedure is built
/// around, so it is kept exactly, not swapped for the analytic derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    Tanh,
    ReLU,
    SoftPlus,
    SoftSign,
}

impl Activation {
    /// Element-wise transfer function applied to a neuron's net input.
    pub fn activate(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::SoftPlus => (1.0 + E.powf(x)).ln(),
            Activation::SoftSign => x / (1.0 + x.abs()),
        }
    }

    /// Local gradient for backpropagation, as a function of the seeded error
    /// and the neuron's activated output.
    pub fn delta(&self, error: f64, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => error * output * (1.0 - output),
            Activation::Tanh => error * (1.0 - output * output),
            Activation::ReLU => if output < 0.0 { 0.0 } else { error },
            Activation::SoftPlus => error * (1.0 / (1.0 + E.powf(-output))),
            Activation::SoftSign => {
                let d = 1.0 + output.abs();
                error * (1.0 / (d * d))
            }
        }
    }

    /// Form-value name used by the studio selects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
            Activation::SoftPlus => "softplus",
            Activation::SoftSign => "softsign",
        }
    }

    /// Parses a form value back into a variant; unknown names fall back to
    /// `Tanh`, the lab's default.
    pub fn from_str_or_default(s: &str) -> Activation {
        match s {
            "sigmoid" => Activation::Sigmoid,
            "relu" => Activation::ReLU,
            "softplus" => Activation::SoftPlus,
            "softsign" => Activation::SoftSign,
            _ => Activation::Tanh,
        }
    }

    pub const ALL: [Activation; 5] = [
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::ReLU,
        Activation::SoftPlus,
        Activation::SoftSign,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert_eq!(Activation::Sigmoid.activate(0.0), 0.5);
    }

    #[test]
    fn tanh_is_odd_and_bounded() {
        let a = Activation::Tanh;
        assert!((a.activate(1.0) + a.activate(-1.0)).abs() < 1e-12);
        assert!(a.activate(50.0) <= 1.0);
    }

    #[test]
    fn relu_clamps_negatives() {
        let a = Activation::ReLU;
        assert_eq!(a.activate(-3.0), 0.0);
        assert_eq!(a.activate(2.5), 2.5);
        assert_eq!(a.delta(0.4, -1.0), 0.0);
        assert_eq!(a.delta(0.4, 1.0), 0.4);
    }

    #[test]
    fn sigmoid_delta_uses_output_form() {
        // error * out * (1 - out)
        let d = Activation::Sigmoid.delta(0.5, 0.5);
        assert!((d - 0.125).abs() < 1e-12);
    }

    #[test]
    fn softsign_delta_shrinks_with_output_magnitude() {
        let a = Activation::SoftSign;
        assert!(a.delta(1.0, 0.0) > a.delta(1.0, 3.0));
        assert!((a.delta(1.0, 1.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn form_names_round_trip() {
        for a in Activation::ALL {
            assert_eq!(Activation::from_str_or_default(a.as_str()), a);
        }
    }
}
