use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{GlweDef, LweDef, RadixDecomposition, Result, check_len};

use super::{GgswCiphertext, GgswCiphertextFft};

/// A bootstrapping key: one GGSW encryption under a GLWE key of each
/// coefficient of an LWE secret key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapKey {
    ggsws: Vec<GgswCiphertext>,
}

impl BootstrapKey {
    /// Wrap the per-coefficient GGSW ciphertexts as a key.
    pub fn new(ggsws: Vec<GgswCiphertext>) -> Self {
        Self { ggsws }
    }

    /// The GGSW ciphertexts, one per LWE key coefficient.
    pub fn ggsws(&self) -> &[GgswCiphertext] {
        &self.ggsws
    }

    /// Compute the FFT of every GGSW ciphertext in the key.
    pub fn fft(&self, glwe: &GlweDef, radix: &RadixDecomposition) -> BootstrapKeyFft {
        BootstrapKeyFft {
            ggsws: self.ggsws.par_iter().map(|g| g.fft(glwe, radix)).collect(),
        }
    }

    /// Verify this key has the dimensions the parameters require.
    pub fn check_is_valid(
        &self,
        lwe: &LweDef,
        glwe: &GlweDef,
        radix: &RadixDecomposition,
    ) -> Result<()> {
        check_len(lwe.dim.0, self.ggsws.len())?;

        for g in &self.ggsws {
            g.check_is_valid(glwe, radix)?;
        }

        Ok(())
    }
}

/// A [`BootstrapKey`] in the fourier domain.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapKeyFft {
    ggsws: Vec<GgswCiphertextFft>,
}

impl BootstrapKeyFft {
    /// The GGSW ciphertexts, one per LWE key coefficient.
    pub fn ggsws(&self) -> &[GgswCiphertextFft] {
        &self.ggsws
    }

    /// Panics if this key does not match the parameters.
    pub fn assert_is_valid(&self, lwe: &LweDef, glwe: &GlweDef, radix: &RadixDecomposition) {
        assert_eq!(self.ggsws.len(), lwe.dim.0);

        for g in &self.ggsws {
            g.assert_is_valid(glwe, radix);
        }
    }
}
