use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds a scalar parameter that may depend on another quantity (e.g., the temperature)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Interp {
    /// Constant value
    Constant(f64),

    /// Piecewise linear interpolation with constant extrapolation
    ///
    /// The x-values must be sorted in ascending order.
    PiecewiseLinear {
        /// The x-values
        xx: Vec<f64>,

        /// The y-values
        yy: Vec<f64>,
    },

    /// Power law
    ///
    /// ```text
    /// y = a xⁿ
    /// ```
    PowerLaw {
        /// Coefficient
        a: f64,

        /// Exponent
        n: f64,
    },
}

impl Interp {
    /// Checks the consistency of the data
    pub fn validate(&self) -> Result<(), StrError> {
        match self {
            Interp::Constant(..) => Ok(()),
            Interp::PiecewiseLinear { xx, yy } => {
                if xx.len() < 2 {
                    return Err("piecewise linear interpolation requires at least two points");
                }
                if xx.len() != yy.len() {
                    return Err("piecewise linear interpolation requires xx.len() == yy.len()");
                }
                if xx.windows(2).any(|w| w[1] <= w[0]) {
                    return Err("piecewise linear interpolation requires strictly increasing xx");
                }
                Ok(())
            }
            Interp::PowerLaw { .. } => Ok(()),
        }
    }

    /// Calculates the value at x
    pub fn value(&self, x: f64) -> f64 {
        match self {
            Interp::Constant(c) => *c,
            Interp::PiecewiseLinear { xx, yy } => {
                let n = xx.len();
                if x <= xx[0] {
                    return yy[0];
                }
                if x >= xx[n - 1] {
                    return yy[n - 1];
                }
                let i = segment(xx, x);
                let t = (x - xx[i]) / (xx[i + 1] - xx[i]);
                yy[i] + t * (yy[i + 1] - yy[i])
            }
            Interp::PowerLaw { a, n } => a * f64::powf(x, *n),
        }
    }

    /// Calculates the derivative dy/dx at x
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Interp::Constant(..) => 0.0,
            Interp::PiecewiseLinear { xx, yy } => {
                let n = xx.len();
                if x <= xx[0] || x >= xx[n - 1] {
                    return 0.0;
                }
                let i = segment(xx, x);
                (yy[i + 1] - yy[i]) / (xx[i + 1] - xx[i])
            }
            Interp::PowerLaw { a, n } => a * n * f64::powf(x, n - 1.0),
        }
    }
}

/// Returns the index i such that xx[i] ≤ x < xx[i+1]
fn segment(xx: &[f64], x: f64) -> usize {
    match xx.iter().rposition(|&xi| xi <= x) {
        Some(i) => usize::min(i, xx.len() - 2),
        None => 0,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Interp;
    use russell_lab::{approx_eq, deriv1_central5};

    #[test]
    fn validate_captures_errors() {
        let p = Interp::PiecewiseLinear {
            xx: vec![1.0],
            yy: vec![1.0],
        };
        assert_eq!(
            p.validate().err(),
            Some("piecewise linear interpolation requires at least two points")
        );
        let p = Interp::PiecewiseLinear {
            xx: vec![1.0, 2.0],
            yy: vec![1.0],
        };
        assert_eq!(
            p.validate().err(),
            Some("piecewise linear interpolation requires xx.len() == yy.len()")
        );
        let p = Interp::PiecewiseLinear {
            xx: vec![1.0, 1.0],
            yy: vec![1.0, 2.0],
        };
        assert_eq!(
            p.validate().err(),
            Some("piecewise linear interpolation requires strictly increasing xx")
        );
        assert_eq!(Interp::Constant(1.0).validate(), Ok(()));
    }

    #[test]
    fn value_works() {
        assert_eq!(Interp::Constant(3.0).value(123.0), 3.0);
        let p = Interp::PiecewiseLinear {
            xx: vec![300.0, 400.0, 600.0],
            yy: vec![10.0, 20.0, 0.0],
        };
        assert_eq!(p.value(200.0), 10.0);
        assert_eq!(p.value(300.0), 10.0);
        approx_eq(p.value(350.0), 15.0, 1e-15);
        assert_eq!(p.value(400.0), 20.0);
        approx_eq(p.value(500.0), 10.0, 1e-15);
        assert_eq!(p.value(700.0), 0.0);
        let p = Interp::PowerLaw { a: 2.0, n: 3.0 };
        approx_eq(p.value(2.0), 16.0, 1e-15);
    }

    #[test]
    fn derivative_works() {
        let p = Interp::PiecewiseLinear {
            xx: vec![300.0, 400.0, 600.0],
            yy: vec![10.0, 20.0, 0.0],
        };
        approx_eq(p.derivative(350.0), 0.1, 1e-15);
        approx_eq(p.derivative(450.0), -0.1, 1e-15);
        assert_eq!(p.derivative(100.0), 0.0);
        assert_eq!(p.derivative(800.0), 0.0);
        let p = Interp::PowerLaw { a: 2.0, n: 3.5 };
        let mut args = 0;
        for x in [0.5, 1.0, 2.5] {
            let num = deriv1_central5(x, &mut args, |x, _| Ok(p.value(x))).unwrap();
            approx_eq(p.derivative(x), num, 1e-9);
        }
    }
}
