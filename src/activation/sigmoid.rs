use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^(-x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Rounds an activation to the nearest class bit.
///
/// Half-way values round up, so `0.5` counts as a positive output.
pub fn binarize(activation: f64) -> u8 {
    if activation.round() >= 1.0 { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid_known_values() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid(2.0), 0.880_797_077_977_882_3, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(-2.0) + sigmoid(2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_binarize() {
        assert_eq!(binarize(0.49), 0);
        assert_eq!(binarize(0.5), 1);
        assert_eq!(binarize(0.97), 1);
        assert_eq!(binarize(0.0), 0);
    }
}
