use std::fmt;

/// Display wrapper for an evaluation result.
///
/// Uses the shortest text that round-trips, switching to scientific
/// notation for decimal exponents below -4 or from 21 upwards:
/// `1024`, `0.4`, `2.0000000000000002e-20`, `1e22`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value(pub f64);

impl Value {
    /// Fixed-point rendering used for batch output.
    pub fn fixed(&self, precision: usize) -> String {
        if self.0.is_finite() {
            format!("{:.*}", precision, self.0)
        } else {
            self.to_string()
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.0;
        if n.is_nan() {
            return write!(f, "NaN");
        }
        if n.is_infinite() {
            return write!(f, "{}", if n > 0.0 { "inf" } else { "-inf" });
        }
        if n == 0.0 {
            return write!(f, "{}", if n.is_sign_negative() { "-0" } else { "0" });
        }

        let magnitude = n.abs();
        if !(1e-4..1e21).contains(&magnitude) {
            write!(f, "{:e}", n)
        } else {
            write!(f, "{}", n)
        }
    }
}
