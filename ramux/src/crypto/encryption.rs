use std::mem::size_of;

use ramux_tfhe::{
    PlaintextBits,
    entities::{GgswCiphertext, GgswCiphertextFft, GlweCiphertext, LweCiphertext, Polynomial},
    ops::encryption::{
        decrypt_ggsw, decrypt_glwe, decrypt_lwe, encrypt_ggsw, encrypt_glwe, encrypt_lwe,
        trivial_glwe, trivial_lwe,
    },
};
use serde::{Deserialize, Serialize};

use crate::{error::Result, params::Params, safe_bincode::GetSize};

use super::{SecretKey, TrivialOne, TrivialZero};

/// A level-0 LWE encryption of a bit. Addresses, flags and read results take
/// this form.
#[repr(transparent)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L0LweCiphertext(pub LweCiphertext);

impl L0LweCiphertext {
    /// Allocate a zero ciphertext under `params`.
    pub fn allocate(params: &Params) -> Self {
        LweCiphertext::new(&params.l0_params).into()
    }
}

impl From<LweCiphertext> for L0LweCiphertext {
    fn from(value: LweCiphertext) -> Self {
        Self(value)
    }
}

impl TrivialZero for L0LweCiphertext {
    fn trivial_zero(enc: &Encryption) -> Self {
        enc.trivial_lwe_l0_zero()
    }
}

impl TrivialOne for L0LweCiphertext {
    fn trivial_one(enc: &Encryption) -> Self {
        enc.trivial_lwe_l0_one()
    }
}

/// A level-1 LWE encryption of a bit, produced by sample extracting an
/// [`L1GlweCiphertext`].
#[repr(transparent)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1LweCiphertext(pub LweCiphertext);

impl L1LweCiphertext {
    /// Allocate a zero ciphertext under `params`.
    pub fn allocate(params: &Params) -> Self {
        LweCiphertext::new(&params.l1_lwe_params()).into()
    }
}

impl From<LweCiphertext> for L1LweCiphertext {
    fn from(value: LweCiphertext) -> Self {
        Self(value)
    }
}

impl TrivialZero for L1LweCiphertext {
    fn trivial_zero(enc: &Encryption) -> Self {
        enc.trivial_lwe_l1_zero()
    }
}

impl TrivialOne for L1LweCiphertext {
    fn trivial_one(enc: &Encryption) -> Self {
        enc.trivial_lwe_l1_one()
    }
}

/// A level-1 GLWE ciphertext. Memory cells take this form, with the cell's
/// bit in coefficient 0.
#[repr(transparent)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1GlweCiphertext(pub GlweCiphertext);

impl L1GlweCiphertext {
    /// Allocate a zero ciphertext under `params`.
    pub fn allocate(params: &Params) -> Self {
        GlweCiphertext::new(&params.l1_params).into()
    }
}

impl From<GlweCiphertext> for L1GlweCiphertext {
    fn from(value: GlweCiphertext) -> Self {
        Self(value)
    }
}

impl TrivialZero for L1GlweCiphertext {
    fn trivial_zero(enc: &Encryption) -> Self {
        enc.trivial_glwe_l1_zero()
    }
}

impl TrivialOne for L1GlweCiphertext {
    fn trivial_one(enc: &Encryption) -> Self {
        enc.trivial_glwe_l1_one()
    }
}

/// A level-1 GGSW ciphertext in the fourier domain, used as a CMUX selector.
#[repr(transparent)]
#[derive(Clone)]
pub struct L1GgswCiphertext(pub GgswCiphertextFft);

impl L1GgswCiphertext {
    /// Allocate a zero ciphertext under `params`.
    pub fn allocate(params: &Params) -> Self {
        GgswCiphertextFft::new(&params.l1_params, &params.cbs_radix).into()
    }
}

impl From<GgswCiphertextFft> for L1GgswCiphertext {
    fn from(value: GgswCiphertextFft) -> Self {
        Self(value)
    }
}

/// Secret key encryption, decryption and trivial encryption under a fixed
/// parameter set.
#[derive(Debug, Clone, Default)]
pub struct Encryption {
    /// The parameters ciphertexts are created under.
    pub params: Params,
}

/// Every ciphertext carries one bit.
pub const PLAINTEXT_BITS: PlaintextBits = PlaintextBits(1);

impl Encryption {
    /// Create an [`Encryption`] for the given parameters.
    pub fn new(params: &Params) -> Self {
        Self {
            params: params.clone(),
        }
    }

    /// Allocate a zero [`L0LweCiphertext`].
    pub fn allocate_lwe_l0(&self) -> L0LweCiphertext {
        L0LweCiphertext::allocate(&self.params)
    }

    /// Allocate a zero [`L1LweCiphertext`].
    pub fn allocate_lwe_l1(&self) -> L1LweCiphertext {
        L1LweCiphertext::allocate(&self.params)
    }

    /// Allocate a zero [`L1GgswCiphertext`].
    pub fn allocate_ggsw_l1(&self) -> L1GgswCiphertext {
        L1GgswCiphertext::allocate(&self.params)
    }

    /// Allocate a zero [`L1GlweCiphertext`].
    pub fn allocate_glwe_l1(&self) -> L1GlweCiphertext {
        L1GlweCiphertext::allocate(&self.params)
    }

    /// Encrypt a bit under the level-0 LWE secret key.
    pub fn encrypt_lwe_l0_secret(&self, value: bool, sk: &SecretKey) -> L0LweCiphertext {
        encrypt_lwe(
            value as u64,
            &sk.lwe_0,
            &self.params.l0_params,
            PLAINTEXT_BITS,
        )
        .into()
    }

    /// Encrypt a bit under the level-1 GLWE secret key viewed as an LWE key.
    pub fn encrypt_lwe_l1_secret(&self, value: bool, sk: &SecretKey) -> L1LweCiphertext {
        encrypt_lwe(
            value as u64,
            &sk.glwe_1.to_lwe_secret_key(),
            &self.params.l1_lwe_params(),
            PLAINTEXT_BITS,
        )
        .into()
    }

    /// Encrypt a polynomial of bits. Only coefficient 0 is meaningful to a
    /// memory cell.
    pub fn encrypt_glwe_l1_secret(
        &self,
        poly: &Polynomial<u64>,
        sk: &SecretKey,
    ) -> L1GlweCiphertext {
        encrypt_glwe(poly, &sk.glwe_1, &self.params.l1_params, PLAINTEXT_BITS).into()
    }

    /// Encrypt `value` in coefficient 0 of an l1 GLWE ciphertext, the form of
    /// a memory cell.
    pub fn encrypt_cell_secret(&self, value: bool, sk: &SecretKey) -> L1GlweCiphertext {
        let mut poly = Polynomial::zero(self.params.l1_poly_degree().0);
        poly.coeffs_mut()[0] = value as u64;

        self.encrypt_glwe_l1_secret(&poly, sk)
    }

    /// Encrypt a bit as a GGSW ciphertext in the fourier domain, suitable as a
    /// CMUX selector.
    pub fn encrypt_ggsw_l1_secret(&self, msg: bool, sk: &SecretKey) -> L1GgswCiphertext {
        encrypt_ggsw(
            msg as u64,
            &sk.glwe_1,
            &self.params.l1_params,
            &self.params.cbs_radix,
        )
        .fft(&self.params.l1_params, &self.params.cbs_radix)
        .into()
    }

    /// Decrypt an [`L0LweCiphertext`].
    pub fn decrypt_lwe_l0(&self, input: &L0LweCiphertext, sk: &SecretKey) -> bool {
        decrypt_lwe(&input.0, &sk.lwe_0, &self.params.l0_params, PLAINTEXT_BITS) == 1
    }

    /// Decrypt an [`L1LweCiphertext`].
    pub fn decrypt_lwe_l1(&self, input: &L1LweCiphertext, sk: &SecretKey) -> bool {
        decrypt_lwe(
            &input.0,
            &sk.glwe_1.to_lwe_secret_key(),
            &self.params.l1_lwe_params(),
            PLAINTEXT_BITS,
        ) == 1
    }

    /// Decrypt the bit in an [`L1GgswCiphertext`].
    pub fn decrypt_ggsw_l1(&self, input: &L1GgswCiphertext, sk: &SecretKey) -> bool {
        let ggsw: GgswCiphertext = input.0.ifft(&self.params.l1_params, &self.params.cbs_radix);

        decrypt_ggsw(
            &ggsw,
            &sk.glwe_1,
            &self.params.l1_params,
            &self.params.cbs_radix,
        ) == 1
    }

    /// Decrypt every coefficient of an [`L1GlweCiphertext`].
    pub fn decrypt_glwe_l1(&self, ct: &L1GlweCiphertext, sk: &SecretKey) -> Polynomial<u64> {
        decrypt_glwe(&ct.0, &sk.glwe_1, &self.params.l1_params, PLAINTEXT_BITS)
    }

    /// Decrypt the bit held in coefficient 0 of a memory cell.
    pub fn decrypt_cell(&self, ct: &L1GlweCiphertext, sk: &SecretKey) -> bool {
        self.decrypt_glwe_l1(ct, sk).coeffs()[0] == 1
    }

    /// A noiseless l1 GLWE encryption of the zero polynomial.
    pub fn trivial_glwe_l1_zero(&self) -> L1GlweCiphertext {
        let zero = Polynomial::zero(self.params.l1_poly_degree().0);

        self.trivial_glwe_l1(&zero)
    }

    /// A noiseless l1 GLWE encryption of a one in coefficient 0.
    pub fn trivial_glwe_l1_one(&self) -> L1GlweCiphertext {
        let mut one = Polynomial::zero(self.params.l1_poly_degree().0);
        one.coeffs_mut()[0] = 1;

        self.trivial_glwe_l1(&one)
    }

    /// A noiseless l1 GLWE encryption of `pt`.
    pub fn trivial_glwe_l1(&self, pt: &Polynomial<u64>) -> L1GlweCiphertext {
        trivial_glwe(pt, &self.params.l1_params, PLAINTEXT_BITS).into()
    }

    /// A noiseless l0 LWE encryption of zero.
    pub fn trivial_lwe_l0_zero(&self) -> L0LweCiphertext {
        trivial_lwe(0, &self.params.l0_params, PLAINTEXT_BITS).into()
    }

    /// A noiseless l0 LWE encryption of one.
    pub fn trivial_lwe_l0_one(&self) -> L0LweCiphertext {
        trivial_lwe(1, &self.params.l0_params, PLAINTEXT_BITS).into()
    }

    /// A noiseless l1 LWE encryption of zero.
    pub fn trivial_lwe_l1_zero(&self) -> L1LweCiphertext {
        trivial_lwe(0, &self.params.l1_lwe_params(), PLAINTEXT_BITS).into()
    }

    /// A noiseless l1 LWE encryption of one.
    pub fn trivial_lwe_l1_one(&self) -> L1LweCiphertext {
        trivial_lwe(1, &self.params.l1_lwe_params(), PLAINTEXT_BITS).into()
    }
}

impl GetSize for L0LweCiphertext {
    fn get_size(params: &Params) -> usize {
        (LweCiphertext::size(&params.l0_params) + 1) * size_of::<u64>()
    }

    fn check_is_valid(&self, params: &Params) -> Result<()> {
        Ok(self.0.check_is_valid(&params.l0_params)?)
    }
}

impl GetSize for L1LweCiphertext {
    fn get_size(params: &Params) -> usize {
        (LweCiphertext::size(&params.l1_lwe_params()) + 1) * size_of::<u64>()
    }

    fn check_is_valid(&self, params: &Params) -> Result<()> {
        Ok(self.0.check_is_valid(&params.l1_lwe_params())?)
    }
}

impl GetSize for L1GlweCiphertext {
    fn get_size(params: &Params) -> usize {
        (GlweCiphertext::size(&params.l1_params) + 1) * size_of::<u64>()
    }

    fn check_is_valid(&self, params: &Params) -> Result<()> {
        Ok(self.0.check_is_valid(&params.l1_params)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{params::DEFAULT_80, test_utils::get_secret_keys_80};

    use super::*;

    #[test]
    fn can_roundtrip_l0_lwe() {
        let sk = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);

        let lwe = enc.encrypt_lwe_l0_secret(false, &sk);
        assert!(!enc.decrypt_lwe_l0(&lwe, &sk));

        let lwe = enc.encrypt_lwe_l0_secret(true, &sk);
        assert!(enc.decrypt_lwe_l0(&lwe, &sk));
    }

    #[test]
    fn can_roundtrip_l1_lwe() {
        let sk = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);

        let lwe = enc.encrypt_lwe_l1_secret(false, &sk);
        assert!(!enc.decrypt_lwe_l1(&lwe, &sk));

        let lwe = enc.encrypt_lwe_l1_secret(true, &sk);
        assert!(enc.decrypt_lwe_l1(&lwe, &sk));
    }

    #[test]
    fn can_roundtrip_l1_glwe() {
        let sk = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);

        let poly = Polynomial::new(
            &(0..DEFAULT_80.l1_poly_degree().0 as u64)
                .map(|x| (x * 7 + 1) % 3 % 2)
                .collect::<Vec<_>>(),
        );

        let ct = enc.encrypt_glwe_l1_secret(&poly, &sk);
        assert_eq!(enc.decrypt_glwe_l1(&ct, &sk), poly);

        for bit in [false, true] {
            let cell = enc.encrypt_cell_secret(bit, &sk);
            assert_eq!(enc.decrypt_cell(&cell, &sk), bit);
        }
    }

    #[test]
    fn can_roundtrip_l1_ggsw() {
        let sk = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);

        let ggsw = enc.encrypt_ggsw_l1_secret(false, &sk);
        assert!(!enc.decrypt_ggsw_l1(&ggsw, &sk));

        let ggsw = enc.encrypt_ggsw_l1_secret(true, &sk);
        assert!(enc.decrypt_ggsw_l1(&ggsw, &sk));
    }

    #[test]
    fn trivial_encryptions_decrypt() {
        let sk = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);

        assert!(!enc.decrypt_lwe_l0(&L0LweCiphertext::trivial_zero(&enc), &sk));
        assert!(enc.decrypt_lwe_l0(&L0LweCiphertext::trivial_one(&enc), &sk));
        assert!(!enc.decrypt_lwe_l1(&L1LweCiphertext::trivial_zero(&enc), &sk));
        assert!(enc.decrypt_lwe_l1(&L1LweCiphertext::trivial_one(&enc), &sk));
        assert!(!enc.decrypt_cell(&L1GlweCiphertext::trivial_zero(&enc), &sk));
        assert!(enc.decrypt_cell(&L1GlweCiphertext::trivial_one(&enc), &sk));
    }
}
