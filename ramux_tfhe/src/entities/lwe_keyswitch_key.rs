use serde::{Deserialize, Serialize};

use crate::{LweDef, RadixDecomposition, Result, check_len};

/// A key for switching LWE ciphertexts from one secret key to another.
///
/// # Remarks
/// Entry `(z, j)` is an LWE encryption under the output key of
/// `s_in[z] * q / B^(j + 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweKeyswitchKey {
    data: Vec<u64>,
}

impl LweKeyswitchKey {
    /// Allocate a zero key.
    pub fn new(from: &LweDef, to: &LweDef, radix: &RadixDecomposition) -> Self {
        Self {
            data: vec![0; Self::size(from, to, radix)],
        }
    }

    /// The number of `u64` elements in a key.
    pub fn size(from: &LweDef, to: &LweDef, radix: &RadixDecomposition) -> usize {
        from.dim.0 * radix.count.0 * (to.dim.0 + 1)
    }

    /// The entries for input coefficient `z`, one LWE ciphertext per
    /// decomposition level.
    pub fn entries(
        &self,
        z: usize,
        to: &LweDef,
        radix: &RadixDecomposition,
    ) -> std::slice::Chunks<'_, u64> {
        let lwe_len = to.dim.0 + 1;
        let stride = radix.count.0 * lwe_len;

        self.data[z * stride..(z + 1) * stride].chunks(lwe_len)
    }

    /// All mutable elements. Entries are stored in `(z, j)` order.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Verify this key has the dimensions the parameters require.
    pub fn check_is_valid(
        &self,
        from: &LweDef,
        to: &LweDef,
        radix: &RadixDecomposition,
    ) -> Result<()> {
        check_len(Self::size(from, to, radix), self.data.len())
    }

    /// Panics if this key does not match the parameters.
    pub fn assert_is_valid(&self, from: &LweDef, to: &LweDef, radix: &RadixDecomposition) {
        assert_eq!(self.data.len(), Self::size(from, to, radix));
    }
}
