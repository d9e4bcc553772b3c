//! Mathematical utilities for a-contrario interval analysis
//!
//! The detection rule compares the binary relative entropy of an interval
//! against a threshold derived from the number of tested intervals. Under the
//! uniform null hypothesis, `exp(-total * h)` bounds the binomial tail of an
//! interval holding a proportion `r` of the mass on a proportion `p` of the
//! bins, so `h > threshold` is equivalent to `NFA < eps`.

use num_traits::Float;

/// Number of intervals tested on a histogram with `size` bins: `size(size+1)/2`
pub fn test_count(size: usize) -> f64 {
    let n = size as f64;
    n * (n + 1.0) / 2.0
}

/// Entropy level an interval must exceed to be meaningful
///
/// `threshold = ln(size(size+1) / (2 eps)) / total`
pub fn detection_threshold(size: usize, total: f64, eps: f64) -> f64 {
    (1.0 / total) * (test_count(size) / eps).ln()
}

/// Binary relative entropy `r ln(r/p) + (1-r) ln((1-r)/(1-p))`
///
/// The degenerate proportions are special-cased so the result stays finite:
/// `r == 0` gives `-ln(1-p)` and `r == 1` gives `-ln(p)`.
///
/// # Examples
///
/// ```rust
/// use acontrario_core::math::relative_entropy;
///
/// assert_eq!(relative_entropy(0.5_f64, 0.5), 0.0);
/// assert!((relative_entropy(1.0_f64, 0.25) - 4.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn relative_entropy<F: Float>(r: F, p: F) -> F {
    let one = F::one();
    if r == F::zero() {
        -(one - p).ln()
    } else if r == one {
        -p.ln()
    } else {
        r * (r / p).ln() + (one - r) * ((one - r) / (one - p)).ln()
    }
}

/// Number of false alarms of an interval with entropy `h`: `N exp(-total h)`
pub fn number_of_false_alarms(size: usize, total: f64, h: f64) -> f64 {
    test_count(size) * (-total * h).exp()
}

/// Index arithmetic on a ring of bins
pub mod ring {
    /// Floored modulo: maps any signed index into `[0, size)`
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    ///
    /// ```rust
    /// use acontrario_core::math::ring::wrap_index;
    ///
    /// assert_eq!(wrap_index(-1, 6), 5);
    /// assert_eq!(wrap_index(6, 6), 0);
    /// assert_eq!(wrap_index(-13, 6), 5);
    /// ```
    pub fn wrap_index(a: isize, size: usize) -> usize {
        a.rem_euclid(size as isize) as usize
    }

    /// Bin after `a` on the ring
    pub fn next(a: usize, size: usize) -> usize {
        wrap_index(a as isize + 1, size)
    }

    /// Bin before `a` on the ring
    pub fn prev(a: usize, size: usize) -> usize {
        wrap_index(a as isize - 1, size)
    }

    /// Number of forward steps needed to walk from `from` to `to`
    pub fn distance(from: usize, to: usize, size: usize) -> usize {
        wrap_index(to as isize - from as isize, size)
    }
}
