use num::Complex;
use serde::{Deserialize, Serialize};

use crate::math::fft::get_fft;

use super::PolynomialFft;

/// A polynomial in `Z_q[X]/(X^N + 1)` stored by its coefficients, lowest
/// degree first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T> Polynomial<T>
where
    T: Clone,
{
    /// Create a polynomial from its coefficients.
    pub fn new(coeffs: &[T]) -> Self {
        Self {
            coeffs: coeffs.to_vec(),
        }
    }

    /// Returns the coefficients of the polynomial.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// Returns the mutable coefficients of the polynomial.
    pub fn coeffs_mut(&mut self) -> &mut [T] {
        &mut self.coeffs
    }

    /// Returns the number of coefficients in the polynomial.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns true if the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl<T> Polynomial<T>
where
    T: Clone + Default,
{
    /// The zero polynomial with `len` coefficients.
    pub fn zero(len: usize) -> Self {
        Self {
            coeffs: vec![T::default(); len],
        }
    }
}

impl Polynomial<u64> {
    /// Compute the FFT of this torus polynomial.
    pub fn fft(&self) -> PolynomialFft<Complex<f64>> {
        let mut output = PolynomialFft::zero(self.len() / 2);

        get_fft(self.len()).forward_torus(&self.coeffs, output.coeffs_mut());

        output
    }
}

impl<T> From<Vec<T>> for Polynomial<T> {
    fn from(coeffs: Vec<T>) -> Self {
        Self { coeffs }
    }
}
