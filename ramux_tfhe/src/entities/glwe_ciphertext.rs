use serde::{Deserialize, Serialize};

use crate::{GlweDef, Result, check_len};

/// A GLWE ciphertext: `k` mask polynomials `a_i` followed by the body
/// `b = sum_i a_i * s_i + e + m`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlweCiphertext {
    data: Vec<u64>,
}

impl GlweCiphertext {
    /// Allocate a zero ciphertext for the given scheme.
    pub fn new(glwe: &GlweDef) -> Self {
        Self {
            data: vec![0; Self::size(glwe)],
        }
    }

    /// The number of `u64` elements in a ciphertext for the given scheme.
    pub fn size(glwe: &GlweDef) -> usize {
        (glwe.dim.size.0 + 1) * glwe.dim.polynomial_degree.0
    }

    /// The mask polynomials.
    pub fn a(&self, glwe: &GlweDef) -> std::slice::Chunks<'_, u64> {
        let n = glwe.dim.polynomial_degree.0;

        self.data[..glwe.dim.size.0 * n].chunks(n)
    }

    /// The body polynomial.
    pub fn b(&self, glwe: &GlweDef) -> &[u64] {
        let n = glwe.dim.polynomial_degree.0;

        &self.data[glwe.dim.size.0 * n..]
    }

    /// The mutable body polynomial.
    pub fn b_mut(&mut self, glwe: &GlweDef) -> &mut [u64] {
        let n = glwe.dim.polynomial_degree.0;

        &mut self.data[glwe.dim.size.0 * n..]
    }

    /// The mask polynomials followed by the body.
    pub fn polys(&self, glwe: &GlweDef) -> std::slice::Chunks<'_, u64> {
        self.data.chunks(glwe.dim.polynomial_degree.0)
    }

    /// The mutable mask polynomials followed by the body.
    pub fn polys_mut(&mut self, glwe: &GlweDef) -> std::slice::ChunksMut<'_, u64> {
        self.data.chunks_mut(glwe.dim.polynomial_degree.0)
    }

    /// All elements, mask first.
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    /// All mutable elements, mask first.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Set every element to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Verify this ciphertext has the dimension `glwe` requires.
    pub fn check_is_valid(&self, glwe: &GlweDef) -> Result<()> {
        check_len(Self::size(glwe), self.data.len())
    }

    /// Panics if this ciphertext does not match `glwe`.
    pub fn assert_is_valid(&self, glwe: &GlweDef) {
        assert_eq!(self.data.len(), Self::size(glwe));
    }
}
