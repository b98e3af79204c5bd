//! Torus FHE primitives used by the `ramux` homomorphic RAM.
//!
//! All ciphertexts live on the 64-bit discretized torus `Z_{2^64}`. Messages
//! are encoded in the top [`PlaintextBits`] of each torus element, leaving
//! the lower bits to absorb noise.
//!
//! The crate is organized as
//! * [`entities`]: keys, ciphertexts and polynomials (plain and FFT domain).
//! * [`ops`]: encryption, the external product and CMUX, keyswitching and
//!   bootstrapping.
//! * [`keygen`]: generation of secret, bootstrapping and keyswitching keys.
//!
//! # Example
//! ```
//! use ramux_tfhe::{PlaintextBits, keygen, ops::encryption, params::TEST_LWE_DEF_1};
//!
//! let sk = keygen::generate_binary_lwe_sk(&TEST_LWE_DEF_1);
//! let ct = encryption::encrypt_lwe(1, &sk, &TEST_LWE_DEF_1, PlaintextBits(1));
//!
//! assert_eq!(encryption::decrypt_lwe(&ct, &sk, &TEST_LWE_DEF_1, PlaintextBits(1)), 1);
//! ```

mod error;
pub use error::*;

/// Keys, ciphertexts and polynomials.
pub mod entities;

/// Key generation.
pub mod keygen;

/// Numeric building blocks: FFT, radix decomposition and sampling.
pub mod math;

/// Homomorphic operations.
pub mod ops;

/// Scheme parameters.
pub mod params;
pub use params::*;

/// Encoding messages onto the torus.
pub mod torus;
