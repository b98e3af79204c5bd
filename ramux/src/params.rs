use ramux_tfhe::{
    GLWE_1_1024_80, GLWE_1_2048_128, GlweDef, LWE_512_80, LWE_637_128, LweDef, PolynomialDegree,
    RadixCount, RadixDecomposition, RadixLog,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The set of parameters for a homomorphic memory.
///
/// # Remarks
/// A memory moves every bit through a cycle of ciphertext types encrypted
/// under different keys and parameters:
/// ```ignore
/// l0 LWE -> l1 GGSW -> l1 GLWE -> l1 LWE -> l0 LWE -> l1 GLWE
/// ```
///
/// where l0 parameters are high noise and encrypt LWE ciphertexts, l1
/// parameters carry a medium amount of noise and encrypt LWE, GLWE and GGSW
/// ciphertexts, and l2 parameters are low noise and are an implementation
/// detail of circuit bootstrapping. Each ciphertext encrypts a single bit.
///
/// * l0 LWE -> l1 GGSW
///   Circuit bootstrapping turns each encrypted address bit into a selector.
///   Internally it bootstraps to several l2 LWE ciphertexts, then applies
///   private functional keyswitching to assemble the l1 GGSW ciphertext.
/// * l1 GGSW -> l1 GLWE
///   Memory cells are l1 GLWE ciphertexts. Reads and writes are trees and
///   chains of CMUX operations driven by the selectors.
/// * l1 GLWE -> l1 LWE -> l0 LWE
///   Sample extraction followed by keyswitching produces the read result.
/// * l0 LWE -> l1 GLWE
///   Gate bootstrapping refreshes values on their way back into memory.
///
/// # Radix decomposition
/// Many operations decompose polynomials into sums of polynomials with small
/// coefficients. Runtime scales linearly with the radix count, but too small a
/// count exceeds the noise budget and produces wrong results.
pub struct Params {
    /// The high noise l0 LWE parameters.
    pub l0_params: LweDef,

    /// The medium noise l1 GLWE parameters. Memory cells live here.
    pub l1_params: GlweDef,

    /// The low noise l2 GLWE parameters.
    pub l2_params: GlweDef,

    /// The radix decomposition defining the shape of l1 GGSW ciphertexts (the
    /// result of circuit bootstrapping).
    pub cbs_radix: RadixDecomposition,

    /// The radix decomposition used by the bootstrapping keys, both inside
    /// circuit bootstrapping and when gate bootstrapping to l1.
    pub pbs_radix: RadixDecomposition,

    /// The decomposition used when keyswitching from l1 LWE to l0 LWE.
    pub ks_radix: RadixDecomposition,

    /// The decomposition used during the private functional keyswitch step of
    /// circuit bootstrapping.
    pub pfks_radix: RadixDecomposition,
}

impl Params {
    /// The polynomial degree of L1 ciphertexts and their messages.
    pub fn l1_poly_degree(&self) -> PolynomialDegree {
        self.l1_params.dim.polynomial_degree
    }

    /// The LWE parameters of ciphertexts sample extracted from l1 GLWE
    /// ciphertexts.
    pub fn l1_lwe_params(&self) -> LweDef {
        self.l1_params.as_lwe_def()
    }

    /// The LWE parameters of ciphertexts sample extracted from l2 GLWE
    /// ciphertexts.
    pub fn l2_lwe_params(&self) -> LweDef {
        self.l2_params.as_lwe_def()
    }
}

impl Default for Params {
    fn default() -> Self {
        DEFAULT_128
    }
}

/// A < 80-bit secure parameter set. Keys and operations are several times
/// faster than [`DEFAULT_128`], which makes it suitable for tests.
pub const DEFAULT_80: Params = Params {
    l0_params: LWE_512_80,
    l1_params: GLWE_1_1024_80,
    l2_params: GLWE_1_1024_80,
    cbs_radix: RadixDecomposition {
        radix_log: RadixLog(5),
        count: RadixCount(3),
    },
    pbs_radix: RadixDecomposition {
        radix_log: RadixLog(10),
        count: RadixCount(3),
    },
    ks_radix: RadixDecomposition {
        radix_log: RadixLog(2),
        count: RadixCount(8),
    },
    pfks_radix: RadixDecomposition {
        radix_log: RadixLog(14),
        count: RadixCount(2),
    },
};

/// The standard 128-bit secure parameter set.
///
/// # Remarks
/// The noise after a read of a `2^20` cell memory that has undergone a write
/// stays far below the decryption threshold; every write refreshes all cells,
/// so noise does not accumulate across writes.
pub const DEFAULT_128: Params = Params {
    l0_params: LWE_637_128,
    l1_params: GLWE_1_2048_128,
    l2_params: GLWE_1_2048_128,
    cbs_radix: RadixDecomposition {
        radix_log: RadixLog(7),
        count: RadixCount(2),
    },
    pbs_radix: RadixDecomposition {
        radix_log: RadixLog(16),
        count: RadixCount(2),
    },
    ks_radix: RadixDecomposition {
        radix_log: RadixLog(2),
        count: RadixCount(6),
    },
    pfks_radix: RadixDecomposition {
        radix_log: RadixLog(17),
        count: RadixCount(2),
    },
};
