use num::{Complex, Zero};

use crate::math::fft::{complex_mad, get_fft};

/// The FFT of a polynomial. See [`Polynomial`](crate::entities::Polynomial)
/// for the non-FFT variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFft<T> {
    coeffs: Vec<T>,
}

impl<T> PolynomialFft<T>
where
    T: Clone,
{
    /// Create a new polynomial with the given coefficients in the fourier domain.
    pub fn new(data: &[T]) -> Self {
        Self {
            coeffs: data.to_vec(),
        }
    }

    /// Returns the coefficients of the polynomial in the fourier domain.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// Returns the mutable coefficients of the polynomial in the fourier domain.
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

impl PolynomialFft<Complex<f64>> {
    /// A zero polynomial with `len` fourier coefficients.
    pub fn zero(len: usize) -> Self {
        Self {
            coeffs: vec![Complex::zero(); len],
        }
    }

    /// Compute the inverse FFT of the polynomial, reducing each coefficient
    /// onto the torus.
    pub fn ifft(&self, poly: &mut [u64]) {
        assert!(self.len().is_power_of_two());
        assert_eq!(self.len() * 2, poly.len());

        get_fft(poly.len()).reverse_torus(&self.coeffs, poly);
    }

    /// Computes the multiplication of two polynomials as `c += a * b`. This is
    /// more efficient than the naive method, and has a runtime of O(N). Note
    /// that performing the FFT and IFFT to get in and out of the fourier domain
    /// costs O(N log N).
    pub fn multiply_add(
        &mut self,
        a: &PolynomialFft<Complex<f64>>,
        b: &PolynomialFft<Complex<f64>>,
    ) {
        complex_mad(&mut self.coeffs, &a.coeffs, &b.coeffs);
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::Polynomial;

    use super::*;

    #[test]
    fn can_multiply_in_fourier_domain() {
        // (1 + 2X) * (3 - X) = 3 + 5X - 2X^2
        let mut a = Polynomial::<u64>::zero(16);
        a.coeffs_mut()[0] = 1;
        a.coeffs_mut()[1] = 2;

        let mut b = Polynomial::<u64>::zero(16);
        b.coeffs_mut()[0] = 3;
        b.coeffs_mut()[1] = u64::MAX;

        let mut c = PolynomialFft::zero(8);
        c.multiply_add(&a.fft(), &b.fft());

        let mut product = Polynomial::<u64>::zero(16);
        c.ifft(product.coeffs_mut());

        assert_eq!(product.coeffs()[0], 3);
        assert_eq!(product.coeffs()[1], 5);
        assert_eq!(product.coeffs()[2], 0u64.wrapping_sub(2));
        assert!(product.coeffs()[3..].iter().all(|c| *c == 0));
    }
}
