use serde::{Deserialize, Serialize};

/// The number of coefficients in an LWE secret key or ciphertext mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweDimension(pub usize);

/// The number of coefficients in each polynomial of a GLWE entity. Must be a
/// power of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialDegree(pub usize);

/// The number of mask polynomials in a GLWE ciphertext (usually written `k`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlweSize(pub usize);

/// The shape of a GLWE entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlweDimension {
    /// The number of mask polynomials.
    pub size: GlweSize,

    /// The degree of each polynomial.
    pub polynomial_degree: PolynomialDegree,
}

/// The log2 of the decomposition base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadixLog(pub usize);

/// The number of digits kept by a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadixCount(pub usize);

/// Parameters for a gadget (radix) decomposition. A decomposition keeps the
/// `count * radix_log` most significant bits of a torus element as `count`
/// signed digits in base `2^radix_log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadixDecomposition {
    /// The number of digits.
    pub count: RadixCount,

    /// The log2 of the base.
    pub radix_log: RadixLog,
}

impl RadixDecomposition {
    /// Panics if this decomposition keeps no digits or would keep 64 or more
    /// bits.
    pub fn assert_valid(&self) {
        assert!(self.count.0 > 0);
        assert!(self.radix_log.0 > 0);
        assert!(self.count.0 * self.radix_log.0 < u64::BITS as usize);
    }
}

/// The number of message bits encoded in the top of a torus element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaintextBits(pub u32);

/// Parameters for an LWE scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LweDef {
    /// The dimension of the secret key.
    pub dim: LweDimension,

    /// The standard deviation of encryption noise as a fraction of the torus.
    pub std: f64,
}

impl LweDef {
    /// Panics if the dimension is zero or the noise is not a finite,
    /// non-negative number.
    pub fn assert_valid(&self) {
        assert!(self.dim.0 > 0);
        assert!(self.std.is_finite() && self.std >= 0.0);
    }
}

/// Parameters for a GLWE scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlweDef {
    /// The shape of ciphertexts and secret keys.
    pub dim: GlweDimension,

    /// The standard deviation of encryption noise as a fraction of the torus.
    pub std: f64,
}

impl GlweDef {
    /// The LWE scheme whose secret key is this scheme's key with its
    /// polynomials concatenated. Sample extraction produces ciphertexts
    /// under this scheme.
    pub fn as_lwe_def(&self) -> LweDef {
        LweDef {
            dim: LweDimension(self.dim.size.0 * self.dim.polynomial_degree.0),
            std: self.std,
        }
    }

    /// Panics if the polynomial degree is not a power of 2 of at least 2, if
    /// there are no mask polynomials, or if the noise is invalid.
    pub fn assert_valid(&self) {
        assert!(self.dim.polynomial_degree.0.is_power_of_two());
        assert!(self.dim.polynomial_degree.0 >= 2);
        assert!(self.dim.size.0 > 0);
        assert!(self.std.is_finite() && self.std >= 0.0);
    }
}

/// An LWE scheme with a 512-dimensional key. Less than 80-bit secure.
pub const LWE_512_80: LweDef = LweDef {
    dim: LweDimension(512),
    std: 1.52587890625e-5,
};

/// An LWE scheme with a 637-dimensional key. Roughly 128-bit secure.
pub const LWE_637_128: LweDef = LweDef {
    dim: LweDimension(637),
    std: 6.27510880527384e-5,
};

/// A GLWE scheme with one mask polynomial of degree 1024. Less than 80-bit
/// secure.
pub const GLWE_1_1024_80: GlweDef = GlweDef {
    dim: GlweDimension {
        size: GlweSize(1),
        polynomial_degree: PolynomialDegree(1024),
    },
    std: 9.094947017729282e-13,
};

/// A GLWE scheme with one mask polynomial of degree 2048. Roughly 128-bit
/// secure.
pub const GLWE_1_2048_128: GlweDef = GlweDef {
    dim: GlweDimension {
        size: GlweSize(1),
        polynomial_degree: PolynomialDegree(2048),
    },
    std: 3.472576015484159e-16,
};

#[doc(hidden)]
/// Insecure. Small enough for fast unit tests.
pub const TEST_LWE_DEF_1: LweDef = LweDef {
    dim: LweDimension(128),
    std: 9.313225746154785e-10,
};

#[doc(hidden)]
/// Insecure. Small enough for fast unit tests.
pub const TEST_GLWE_DEF_1: GlweDef = GlweDef {
    dim: GlweDimension {
        size: GlweSize(1),
        polynomial_degree: PolynomialDegree(512),
    },
    std: 8.881784197001252e-16,
};

#[doc(hidden)]
/// Insecure. Has more than one mask polynomial.
pub const TEST_GLWE_DEF_2: GlweDef = GlweDef {
    dim: GlweDimension {
        size: GlweSize(2),
        polynomial_degree: PolynomialDegree(256),
    },
    std: 8.881784197001252e-16,
};

#[doc(hidden)]
pub const TEST_RADIX: RadixDecomposition = RadixDecomposition {
    count: RadixCount(3),
    radix_log: RadixLog(8),
};

#[doc(hidden)]
pub const TEST_CBS_RADIX: RadixDecomposition = RadixDecomposition {
    count: RadixCount(3),
    radix_log: RadixLog(5),
};

#[doc(hidden)]
pub const TEST_KS_RADIX: RadixDecomposition = RadixDecomposition {
    count: RadixCount(8),
    radix_log: RadixLog(2),
};

#[doc(hidden)]
pub const TEST_PFKS_RADIX: RadixDecomposition = RadixDecomposition {
    count: RadixCount(2),
    radix_log: RadixLog(14),
};
