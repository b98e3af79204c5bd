use serde::{Deserialize, Serialize};

use crate::{GlweDef, LweDef, RadixDecomposition, Result, check_len};

/// Private functional keyswitch keys that turn LWE ciphertexts produced by the
/// bootstrap step of circuit bootstrapping into the rows of a GGSW ciphertext.
///
/// # Remarks
/// There is one key per GLWE polynomial `f` in `0..=k`. Key `f` multiplies
/// its input by the polynomial `P_f`, where `P_f = -s_f` (the `f`-th
/// polynomial of the output secret key) for `f < k` and `P_k = 1`.
///
/// Entry `(f, z, t)` is a GLWE encryption of `P_f * s'_z * q / B^(t + 1)`
/// where `s'_z = -s_in[z]` for `z < n` and `s'_n = 1`, so the input body is
/// keyswitched along with its mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBootstrappingKeyswitchKeys {
    data: Vec<u64>,
}

impl CircuitBootstrappingKeyswitchKeys {
    /// Allocate a zero key set.
    pub fn new(from: &LweDef, to: &GlweDef, radix: &RadixDecomposition) -> Self {
        Self {
            data: vec![0; Self::size(from, to, radix)],
        }
    }

    /// The number of `u64` elements in a key set.
    pub fn size(from: &LweDef, to: &GlweDef, radix: &RadixDecomposition) -> usize {
        (to.dim.size.0 + 1) * Self::key_len(from, to, radix)
    }

    fn key_len(from: &LweDef, to: &GlweDef, radix: &RadixDecomposition) -> usize {
        (from.dim.0 + 1) * radix.count.0 * glwe_len(to)
    }

    /// The key for polynomial `f`.
    pub fn key(
        &self,
        f: usize,
        from: &LweDef,
        to: &GlweDef,
        radix: &RadixDecomposition,
    ) -> &[u64] {
        let len = Self::key_len(from, to, radix);

        &self.data[f * len..(f + 1) * len]
    }

    /// The GLWE entries of key `f` for input coefficient `z`, one per
    /// decomposition level.
    pub fn entries(
        &self,
        f: usize,
        z: usize,
        from: &LweDef,
        to: &GlweDef,
        radix: &RadixDecomposition,
    ) -> std::slice::Chunks<'_, u64> {
        let glwe_len = glwe_len(to);
        let stride = radix.count.0 * glwe_len;

        self.key(f, from, to, radix)[z * stride..(z + 1) * stride].chunks(glwe_len)
    }

    /// All mutable elements. Entries are stored in `(f, z, t)` order.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Verify this key set has the dimensions the parameters require.
    pub fn check_is_valid(
        &self,
        from: &LweDef,
        to: &GlweDef,
        radix: &RadixDecomposition,
    ) -> Result<()> {
        check_len(Self::size(from, to, radix), self.data.len())
    }

    /// Panics if this key set does not match the parameters.
    pub fn assert_is_valid(&self, from: &LweDef, to: &GlweDef, radix: &RadixDecomposition) {
        assert_eq!(self.data.len(), Self::size(from, to, radix));
    }
}

fn glwe_len(glwe: &GlweDef) -> usize {
    (glwe.dim.size.0 + 1) * glwe.dim.polynomial_degree.0
}
