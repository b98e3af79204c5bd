use serde::{Deserialize, Serialize};

use crate::{Error, LweDef, Result, check_len};

/// A binary LWE secret key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweSecretKey {
    data: Vec<u64>,
}

impl LweSecretKey {
    /// Wrap the given binary coefficients as a secret key.
    pub fn new(data: Vec<u64>) -> Self {
        Self { data }
    }

    /// The coefficients of the key.
    pub fn s(&self) -> &[u64] {
        &self.data
    }

    /// The number of `u64` elements in a key for the given scheme.
    pub fn size(lwe: &LweDef) -> usize {
        lwe.dim.0
    }

    /// Verify this key has the dimension `lwe` requires and is binary.
    pub fn check_is_valid(&self, lwe: &LweDef) -> Result<()> {
        check_len(Self::size(lwe), self.data.len())?;

        if self.data.iter().any(|x| *x > 1) {
            return Err(Error::NotBinary);
        }

        Ok(())
    }

    /// Panics if this key does not match `lwe`.
    pub fn assert_is_valid(&self, lwe: &LweDef) {
        assert_eq!(self.data.len(), Self::size(lwe));
    }
}
