use serde::{Deserialize, Serialize};

use crate::{Error, GlweDef, Result, check_len};

use super::LweSecretKey;

/// A binary GLWE secret key made of `k` polynomials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlweSecretKey {
    data: Vec<u64>,
}

impl GlweSecretKey {
    /// Wrap the concatenated binary polynomial coefficients as a secret key.
    pub fn new(data: Vec<u64>) -> Self {
        Self { data }
    }

    /// The key's polynomials.
    pub fn s(&self, glwe: &GlweDef) -> std::slice::Chunks<'_, u64> {
        self.data.chunks(glwe.dim.polynomial_degree.0)
    }

    /// The `i`-th polynomial of the key.
    pub fn s_poly(&self, i: usize, glwe: &GlweDef) -> &[u64] {
        let n = glwe.dim.polynomial_degree.0;

        &self.data[i * n..(i + 1) * n]
    }

    /// The LWE key used by ciphertexts sample extracted from this key's
    /// GLWE ciphertexts.
    pub fn to_lwe_secret_key(&self) -> LweSecretKey {
        LweSecretKey::new(self.data.clone())
    }

    /// The number of `u64` elements in a key for the given scheme.
    pub fn size(glwe: &GlweDef) -> usize {
        glwe.dim.size.0 * glwe.dim.polynomial_degree.0
    }

    /// Verify this key has the dimension `glwe` requires and is binary.
    pub fn check_is_valid(&self, glwe: &GlweDef) -> Result<()> {
        check_len(Self::size(glwe), self.data.len())?;

        if self.data.iter().any(|x| *x > 1) {
            return Err(Error::NotBinary);
        }

        Ok(())
    }

    /// Panics if this key does not match `glwe`.
    pub fn assert_is_valid(&self, glwe: &GlweDef) {
        assert_eq!(self.data.len(), Self::size(glwe));
    }
}
