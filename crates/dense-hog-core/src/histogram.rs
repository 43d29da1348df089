//! Fixed-length histograms and the norms used to normalize them.
//!
//! Every normalization guards against a zero norm: a vector whose norm is
//! exactly zero is left as the all-zero vector instead of being divided.
//! Divisions are applied component-wise (`v / norm`, never `v * (1 / norm)`)
//! so results stay bit-identical with other implementations of the same
//! descriptor.

use serde::{Deserialize, Serialize};

/// Sum of absolute values.
#[inline]
pub fn l1_norm(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v.abs())
}

/// Euclidean length, as a plain sum of squares.
///
/// No rescaling is done, so components above roughly `1e154` overflow the
/// sum to `inf`.
#[inline]
pub fn l2_norm(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v * v).sqrt()
}

/// Divide every component by `divisor`, skipping the division when it is zero.
#[inline]
pub fn divide_in_place(values: &mut [f64], divisor: f64) {
    if divisor == 0.0 {
        return;
    }
    for v in values.iter_mut() {
        *v /= divisor;
    }
}

/// L1-normalize `values` in place; a zero-sum vector stays zero.
#[inline]
pub fn normalize_l1_in_place(values: &mut [f64]) {
    let norm = l1_norm(values);
    divide_in_place(values, norm);
}

/// L2-normalize `values` in place; a zero vector stays zero.
///
/// Inputs large enough to overflow [`l2_norm`] come out as all zeros, since
/// every component is divided by `inf`. Weights from a gradient stage are
/// nowhere near that range.
#[inline]
pub fn normalize_l2_in_place(values: &mut [f64]) {
    let norm = l2_norm(values);
    divide_in_place(values, norm);
}

/// An ordered, fixed-length vector of non-negative bin values.
///
/// Histograms behave as values: the `normalized_*`, [`Histogram::clipped`],
/// [`Histogram::sqrt`] and [`Histogram::concat`] helpers all return a new
/// histogram. Only the `*_in_place` methods mutate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    values: Vec<f64>,
}

impl Histogram {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// All-zero histogram with `len` bins.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Concatenate `parts` in order; the result length is the sum of the parts'.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Histogram>,
    {
        let mut values = Vec::new();
        for part in parts {
            values.extend_from_slice(&part.values);
        }
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn l1_norm(&self) -> f64 {
        l1_norm(&self.values)
    }

    pub fn l2_norm(&self) -> f64 {
        l2_norm(&self.values)
    }

    /// In-place L1 normalization.
    pub fn normalize_l1_in_place(&mut self) {
        normalize_l1_in_place(&mut self.values);
    }

    /// In-place L2 normalization.
    pub fn normalize_l2_in_place(&mut self) {
        normalize_l2_in_place(&mut self.values);
    }

    pub fn normalized_l1(&self) -> Self {
        let mut out = self.clone();
        out.normalize_l1_in_place();
        out
    }

    pub fn normalized_l2(&self) -> Self {
        let mut out = self.clone();
        out.normalize_l2_in_place();
        out
    }

    /// Component-wise division; a zero divisor returns an unchanged copy.
    pub fn divided(&self, divisor: f64) -> Self {
        let mut out = self.clone();
        divide_in_place(&mut out.values, divisor);
        out
    }

    /// Cap every component at `max`.
    pub fn clipped(&self, max: f64) -> Self {
        Self {
            values: self.values.iter().map(|&v| v.min(max)).collect(),
        }
    }

    /// Component-wise square root.
    pub fn sqrt(&self) -> Self {
        Self {
            values: self.values.iter().map(|v| v.sqrt()).collect(),
        }
    }

    /// True if no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f64>> for Histogram {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for Histogram {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn l2_overflow_collapses_to_zero() {
        let mut huge = [1e200, 1e200];
        assert_eq!(l2_norm(&huge), f64::INFINITY);
        normalize_l2_in_place(&mut huge);
        assert_eq!(huge, [0.0, 0.0]);

        let mut large = [3e150, 4e150];
        normalize_l2_in_place(&mut large);
        assert_relative_eq!(large[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(large[1], 0.8, epsilon = 1e-12);
    }

    #[test]
    fn l2_normalization_yields_unit_length() {
        let h = Histogram::new(vec![3.0, 4.0, 0.0]);
        let n = h.normalized_l2();
        assert_eq!(n.values(), &[0.6, 0.8, 0.0]);
        assert_relative_eq!(n.l2_norm(), 1.0, epsilon = 1e-12);
        // Source untouched.
        assert_eq!(h.values(), &[3.0, 4.0, 0.0]);
    }

    #[test]
    fn zero_vectors_stay_zero() {
        let z = Histogram::zeros(5);
        assert_eq!(z.normalized_l1(), z);
        assert_eq!(z.normalized_l2(), z);
        assert_eq!(z.divided(0.0), z);
        assert!(z.normalized_l1().is_finite());
    }

    #[test]
    fn l1_normalization_is_idempotent() {
        let h = Histogram::new(vec![0.25, 7.0, 1.5, 0.0, 3.125]);
        let once = h.normalized_l1();
        let twice = once.normalized_l1();
        assert_relative_eq!(once.l1_norm(), 1.0, epsilon = 1e-12);
        for (a, b) in once.values().iter().zip(twice.values()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-15);
        }
    }

    #[test]
    fn concat_preserves_order_and_length() {
        let a = Histogram::new(vec![1.0, 2.0]);
        let b = Histogram::new(vec![3.0]);
        let c = Histogram::concat([&a, &b, &a]);
        assert_eq!(c.values(), &[1.0, 2.0, 3.0, 1.0, 2.0]);
        assert_eq!(c.len(), 2 * a.len() + b.len());
    }

    #[test]
    fn clip_and_sqrt_are_component_wise() {
        let h = Histogram::new(vec![0.04, 0.5, 0.2]);
        assert_eq!(h.clipped(0.2).values(), &[0.04, 0.2, 0.2]);
        assert_relative_eq!(h.sqrt().values()[0], 0.2, epsilon = 1e-15);
    }

    #[test]
    fn serializes_as_plain_array() {
        let h = Histogram::new(vec![1.0, 0.5]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "[1.0,0.5]");
        let back: Histogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
