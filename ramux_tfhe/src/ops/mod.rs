/// Blind rotation, gate bootstrapping and circuit bootstrapping.
pub mod bootstrapping;

/// Linear operations on LWE and GLWE ciphertexts and sample extraction.
pub mod ciphertext;

/// Secret key encryption, decryption and trivial encryption.
pub mod encryption;

/// The GGSW external product and CMUX.
pub mod fft_ops;

/// LWE keyswitching and private functional keyswitching.
pub mod keyswitch;

/// Polynomial encoding and arithmetic.
pub mod polynomial;
