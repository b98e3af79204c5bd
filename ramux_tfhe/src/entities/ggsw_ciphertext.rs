use num::{Complex, Zero};
use serde::{Deserialize, Serialize};

use crate::{GlweDef, RadixDecomposition, Result, check_len, math::fft::get_fft};

/// A GGSW ciphertext of a message `m`.
///
/// # Remarks
/// A GGSW ciphertext is a `(k + 1) x l` matrix of GLWE ciphertexts. Row
/// `(i, j)` encrypts zero with `m * q / B^(j + 1)` added to its `i`-th
/// polynomial (the body when `i == k`). Rows are stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GgswCiphertext {
    data: Vec<u64>,
}

impl GgswCiphertext {
    /// Allocate a zero ciphertext.
    pub fn new(glwe: &GlweDef, radix: &RadixDecomposition) -> Self {
        Self {
            data: vec![0; Self::size(glwe, radix)],
        }
    }

    /// The number of `u64` elements in a ciphertext.
    pub fn size(glwe: &GlweDef, radix: &RadixDecomposition) -> usize {
        (glwe.dim.size.0 + 1) * radix.count.0 * glwe_len(glwe)
    }

    /// The GLWE rows of this ciphertext.
    pub fn rows(&self, glwe: &GlweDef) -> std::slice::Chunks<'_, u64> {
        self.data.chunks(glwe_len(glwe))
    }

    /// The mutable GLWE rows of this ciphertext.
    pub fn rows_mut(&mut self, glwe: &GlweDef) -> std::slice::ChunksMut<'_, u64> {
        self.data.chunks_mut(glwe_len(glwe))
    }

    /// Row `(i, j)`: the row encoding the message in polynomial `i` at
    /// decomposition level `j`.
    pub fn row(
        &self,
        i: usize,
        j: usize,
        glwe: &GlweDef,
        radix: &RadixDecomposition,
    ) -> &[u64] {
        let len = glwe_len(glwe);
        let r = i * radix.count.0 + j;

        &self.data[r * len..(r + 1) * len]
    }

    /// The mutable row `(i, j)`.
    pub fn row_mut(
        &mut self,
        i: usize,
        j: usize,
        glwe: &GlweDef,
        radix: &RadixDecomposition,
    ) -> &mut [u64] {
        let len = glwe_len(glwe);
        let r = i * radix.count.0 + j;

        &mut self.data[r * len..(r + 1) * len]
    }

    /// Compute the FFT of every polynomial in this ciphertext.
    pub fn fft(&self, glwe: &GlweDef, radix: &RadixDecomposition) -> GgswCiphertextFft {
        self.assert_is_valid(glwe, radix);

        let n = glwe.dim.polynomial_degree.0;
        let fft = get_fft(n);

        let mut output = GgswCiphertextFft::new(glwe, radix);

        for (c, f) in self.data.chunks(n).zip(output.data.chunks_mut(n / 2)) {
            fft.forward_torus(c, f);
        }

        output
    }

    /// Verify this ciphertext has the dimensions `glwe` and `radix` require.
    pub fn check_is_valid(&self, glwe: &GlweDef, radix: &RadixDecomposition) -> Result<()> {
        check_len(Self::size(glwe, radix), self.data.len())
    }

    /// Panics if this ciphertext does not match `glwe` and `radix`.
    pub fn assert_is_valid(&self, glwe: &GlweDef, radix: &RadixDecomposition) {
        assert_eq!(self.data.len(), Self::size(glwe, radix));
    }
}

/// A [`GgswCiphertext`] with every polynomial in the fourier domain. This is
/// the form consumed by the external product and CMUX.
#[derive(Debug, Clone, PartialEq)]
pub struct GgswCiphertextFft {
    data: Vec<Complex<f64>>,
}

impl GgswCiphertextFft {
    /// Allocate a zero ciphertext.
    pub fn new(glwe: &GlweDef, radix: &RadixDecomposition) -> Self {
        Self {
            data: vec![Complex::zero(); Self::size(glwe, radix)],
        }
    }

    /// The number of complex elements in a ciphertext.
    pub fn size(glwe: &GlweDef, radix: &RadixDecomposition) -> usize {
        GgswCiphertext::size(glwe, radix) / 2
    }

    /// Row `(i, j)` in the fourier domain.
    pub fn row(
        &self,
        i: usize,
        j: usize,
        glwe: &GlweDef,
        radix: &RadixDecomposition,
    ) -> &[Complex<f64>] {
        let len = glwe_len(glwe) / 2;
        let r = i * radix.count.0 + j;

        &self.data[r * len..(r + 1) * len]
    }

    /// All fourier coefficients.
    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.data
    }

    /// All mutable fourier coefficients.
    pub fn as_mut_slice(&mut self) -> &mut [Complex<f64>] {
        &mut self.data
    }

    /// Compute the inverse FFT of every polynomial in this ciphertext.
    pub fn ifft(&self, glwe: &GlweDef, radix: &RadixDecomposition) -> GgswCiphertext {
        self.assert_is_valid(glwe, radix);

        let n = glwe.dim.polynomial_degree.0;
        let fft = get_fft(n);

        let mut output = GgswCiphertext::new(glwe, radix);

        for (f, c) in self.data.chunks(n / 2).zip(output.data.chunks_mut(n)) {
            fft.reverse_torus(f, c);
        }

        output
    }

    /// Verify this ciphertext has the dimensions `glwe` and `radix` require.
    pub fn check_is_valid(&self, glwe: &GlweDef, radix: &RadixDecomposition) -> Result<()> {
        check_len(Self::size(glwe, radix), self.data.len())
    }

    /// Panics if this ciphertext does not match `glwe` and `radix`.
    pub fn assert_is_valid(&self, glwe: &GlweDef, radix: &RadixDecomposition) {
        assert_eq!(self.data.len(), Self::size(glwe, radix));
    }
}

fn glwe_len(glwe: &GlweDef) -> usize {
    (glwe.dim.size.0 + 1) * glwe.dim.polynomial_degree.0
}
