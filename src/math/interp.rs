//! Piecewise-linear interpolation over a small knot table.
//!
//! Used to map an income to a percentile rank:
//!
//! ```text
//! x = income (USD)   y = percentile
//! ```
//!
//! Behavior at the edges follows a "fill value" policy rather than
//! extrapolation: queries below the first knot return `below`, queries above
//! the last knot return `above`. Queries exactly on the end knots interpolate
//! normally.
//!
//! Knots are sorted by `x` (stable), so repeated `x` values keep their input
//! order. A query landing exactly on a repeated `x` resolves to the first of
//! them; just above it, interpolation starts from the last of them.

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpError {
    #[error("knot vectors differ in length ({xs} x-values, {ys} y-values)")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("need at least 2 distinct x-values, found {distinct}")]
    TooFewKnots { distinct: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
    below: f64,
    above: f64,
}

impl LinearInterpolant {
    pub fn new(xs: &[f64], ys: &[f64], below: f64, above: f64) -> Result<Self, InterpError> {
        if xs.len() != ys.len() {
            return Err(InterpError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let mut knots: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        knots.sort_by(|a, b| a.0.total_cmp(&b.0));

        let distinct = count_distinct_sorted(knots.iter().map(|k| k.0));
        if distinct < 2 {
            return Err(InterpError::TooFewKnots { distinct });
        }

        let (xs, ys) = knots.into_iter().unzip();
        Ok(Self { xs, ys, below, above })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let (x_first, x_last) = (self.xs[0], self.xs[n - 1]);

        if x < x_first {
            return self.below;
        }
        if x > x_last {
            return self.above;
        }
        if x == x_first {
            return self.ys[0];
        }

        // First knot with xs[hi] >= x; x > xs[0] here so hi >= 1 and xs[lo] < x.
        let hi = self.xs.partition_point(|&v| v < x).clamp(1, n - 1);
        let lo = hi - 1;
        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);

        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Knot x-range `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn knot_count(&self) -> usize {
        self.xs.len()
    }
}

/// Count distinct values in an already sorted sequence.
pub fn count_distinct_sorted(values: impl IntoIterator<Item = f64>) -> usize {
    let mut count = 0usize;
    let mut prev: Option<f64> = None;
    for v in values {
        if prev != Some(v) {
            count += 1;
        }
        prev = Some(v);
    }
    count
}

/// True when `values` never decreases in input order.
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> LinearInterpolant {
        LinearInterpolant::new(&[20_000.0, 50_000.0, 120_000.0], &[10.0, 50.0, 90.0], 1.0, 99.0).unwrap()
    }

    #[test]
    fn interpolates_between_knots() {
        let f = interp();
        assert!((f.eval(35_000.0) - 30.0).abs() < 1e-12);
        assert!((f.eval(85_000.0) - 70.0).abs() < 1e-12);
    }

    #[test]
    fn exact_on_knots_including_ends() {
        let f = interp();
        assert_eq!(f.eval(20_000.0), 10.0);
        assert_eq!(f.eval(50_000.0), 50.0);
        assert_eq!(f.eval(120_000.0), 90.0);
    }

    #[test]
    fn fills_outside_domain() {
        let f = interp();
        assert_eq!(f.eval(19_999.0), 1.0);
        assert_eq!(f.eval(0.0), 1.0);
        assert_eq!(f.eval(120_000.01), 99.0);
        assert_eq!(f.eval(1e12), 99.0);
        assert_eq!(f.domain(), (20_000.0, 120_000.0));
    }

    #[test]
    fn unsorted_knots_are_sorted_by_x() {
        let f = LinearInterpolant::new(&[120_000.0, 20_000.0, 50_000.0], &[90.0, 10.0, 50.0], 1.0, 99.0).unwrap();
        assert!((f.eval(35_000.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_x_resolves_to_first_then_continues_from_last() {
        // Two knots share x = 10.
        let f = LinearInterpolant::new(&[0.0, 10.0, 10.0, 20.0], &[0.0, 20.0, 40.0, 60.0], -1.0, -2.0).unwrap();
        assert_eq!(f.eval(10.0), 20.0);
        assert!((f.eval(15.0) - 50.0).abs() < 1e-12);
        assert!((f.eval(5.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_first_x_does_not_divide_by_zero() {
        let f = LinearInterpolant::new(&[5.0, 5.0, 10.0], &[1.0, 2.0, 3.0], 0.0, 9.0).unwrap();
        assert_eq!(f.eval(5.0), 1.0);
        assert!(f.eval(7.5).is_finite());
    }

    #[test]
    fn rejects_degenerate_knots() {
        assert_eq!(
            LinearInterpolant::new(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], 0.0, 0.0).unwrap_err(),
            InterpError::TooFewKnots { distinct: 1 }
        );
        assert_eq!(
            LinearInterpolant::new(&[1.0, 2.0], &[1.0], 0.0, 0.0).unwrap_err(),
            InterpError::LengthMismatch { xs: 2, ys: 1 }
        );
    }

    #[test]
    fn monotone_helpers() {
        assert!(is_non_decreasing(&[1.0, 1.0, 2.0]));
        assert!(!is_non_decreasing(&[1.0, 0.5]));
        assert_eq!(count_distinct_sorted([1.0, 1.0, 2.0, 3.0, 3.0]), 3);
    }
}
