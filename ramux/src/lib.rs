#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! A homomorphic random-access memory. A [`Memory`] holds `2^k` encrypted
//! bits and supports reads and conditional writes at encrypted addresses,
//! without the evaluating party learning the address, the data or whether
//! a write took effect.
//!
//! Reads run a tree of CMUX operations over every cell, driven by selectors
//! derived from the address bits with circuit bootstrapping. Writes rewrite
//! every cell through a chain of CMUXes and then refresh each one with a
//! gate bootstrap, so noise never accumulates across writes.
//!
//! # Example
//!
//! ```rust,no_run
//! use ramux::{DEFAULT_128, EncryptedAddress, Encryption, Evaluation, Memory, generate_keys};
//! use std::sync::Arc;
//!
//! // Generate our keys.
//! let (sk, ek) = generate_keys(&DEFAULT_128);
//!
//! let enc = Encryption::new(&DEFAULT_128);
//! let eval = Evaluation::new(Arc::new(ek), &DEFAULT_128);
//!
//! // Encrypt a 4 cell memory.
//! let mut memory = Memory::setup(&[false, true, false, false], 2, &enc, &sk).unwrap();
//!
//! // Read cell 1.
//! let address = EncryptedAddress::encrypt(1, 2, &enc, &sk).unwrap();
//! let value = memory.read(&address, &eval).unwrap();
//! assert!(enc.decrypt_lwe_l0(&value, &sk));
//!
//! // Write 1 to cell 3 only if the flag is set.
//! let address = EncryptedAddress::encrypt(3, 2, &enc, &sk).unwrap();
//! let flag = enc.encrypt_lwe_l0_secret(true, &sk);
//! let value = enc.encrypt_lwe_l0_secret(true, &sk);
//! memory.write(&address, &flag, &value, &eval).unwrap();
//!
//! assert_eq!(memory.decrypt(&enc, &sk), vec![false, true, false, true]);
//! ```
mod crypto;
mod error;
pub use error::*;
mod memory;
mod params;
#[doc(hidden)]
pub mod test_utils;

pub use crypto::{
    Encryption, Evaluation, EvaluationKey, EvaluationKeyNonFft, KeylessEvaluation,
    L0LweCiphertext, L1GgswCiphertext, L1GlweCiphertext, L1LweCiphertext, PLAINTEXT_BITS,
    SecretKey, TrivialOne, TrivialZero, generate_keys,
};
pub use memory::{EncryptedAddress, Memory, SelectorPair, Selectors, WriteTransaction};
pub use params::*;

/// A safe wrapper around [`bincode`] deserialization to limit input sizes and prevent malicious or
/// improperly serialized data from causing panics.
pub mod safe_bincode;
