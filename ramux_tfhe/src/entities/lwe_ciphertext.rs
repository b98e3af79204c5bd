use serde::{Deserialize, Serialize};

use crate::{LweDef, Result, check_len};

/// An LWE ciphertext `(a, b)` where `a` is a vector of `n` torus elements
/// and `b = <a, s> + e + m`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweCiphertext {
    data: Vec<u64>,
}

impl LweCiphertext {
    /// Allocate a zero ciphertext for the given scheme.
    pub fn new(lwe: &LweDef) -> Self {
        Self {
            data: vec![0; Self::size(lwe)],
        }
    }

    /// The number of `u64` elements in a ciphertext for the given scheme.
    pub fn size(lwe: &LweDef) -> usize {
        lwe.dim.0 + 1
    }

    /// The mask.
    pub fn a(&self) -> &[u64] {
        &self.data[..self.data.len() - 1]
    }

    /// The mutable mask.
    pub fn a_mut(&mut self) -> &mut [u64] {
        let n = self.data.len() - 1;

        &mut self.data[..n]
    }

    /// The body.
    pub fn b(&self) -> u64 {
        self.data[self.data.len() - 1]
    }

    /// The mutable body.
    pub fn b_mut(&mut self) -> &mut u64 {
        let n = self.data.len() - 1;

        &mut self.data[n]
    }

    /// The mask and body together.
    pub fn a_b_mut(&mut self) -> (&mut [u64], &mut u64) {
        let n = self.data.len() - 1;
        let (a, b) = self.data.split_at_mut(n);

        (a, &mut b[0])
    }

    /// All elements, mask first.
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    /// Verify this ciphertext has the dimension `lwe` requires.
    pub fn check_is_valid(&self, lwe: &LweDef) -> Result<()> {
        check_len(Self::size(lwe), self.data.len())
    }

    /// Panics if this ciphertext does not match `lwe`.
    pub fn assert_is_valid(&self, lwe: &LweDef) {
        assert_eq!(self.data.len(), Self::size(lwe));
    }
}
