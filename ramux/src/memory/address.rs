use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Encryption, Evaluation, L0LweCiphertext, L1GgswCiphertext, Params, SecretKey,
    error::{ConfigurationError, Result},
    safe_bincode::GetSize,
};

/// An encrypted memory address: one [`L0LweCiphertext`] per address bit,
/// least significant bit first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedAddress {
    bits: Vec<L0LweCiphertext>,
}

impl EncryptedAddress {
    /// Wrap already encrypted address bits, least significant bit first.
    pub fn new(bits: Vec<L0LweCiphertext>) -> Self {
        Self { bits }
    }

    /// Encrypt `address` as `width` bits under `sk`.
    ///
    /// # Errors
    /// * [`ConfigurationError::AddressWidthTooLarge`] if `width` doesn't fit a
    ///   `usize` address.
    /// * [`ConfigurationError::AddressOutOfRange`] if `address >= 2^width`.
    /// * [`crate::Error::Primitive`] if `sk` doesn't match `enc`'s parameters.
    pub fn encrypt(address: usize, width: usize, enc: &Encryption, sk: &SecretKey) -> Result<Self> {
        check_address(address, width)?;
        sk.check_is_valid(&enc.params)?;

        let bits = (0..width)
            .map(|i| enc.encrypt_lwe_l0_secret((address >> i) & 0x1 == 1, sk))
            .collect();

        Ok(Self { bits })
    }

    /// The number of address bits.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// The encrypted bits, least significant first.
    pub fn bits(&self) -> &[L0LweCiphertext] {
        &self.bits
    }

    /// Decrypt the address.
    pub fn decrypt(&self, enc: &Encryption, sk: &SecretKey) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, bit)| acc | ((enc.decrypt_lwe_l0(bit, sk) as usize) << i))
    }

    pub(crate) fn check_is_valid(&self, params: &Params) -> Result<()> {
        for bit in &self.bits {
            bit.check_is_valid(params)?;
        }

        Ok(())
    }
}

pub(crate) fn check_address_width(width: usize) -> Result<()> {
    if width >= usize::BITS as usize {
        return Err(ConfigurationError::AddressWidthTooLarge(width).into());
    }

    Ok(())
}

fn check_address(address: usize, width: usize) -> Result<()> {
    check_address_width(width)?;

    if address >> width != 0 {
        return Err(ConfigurationError::AddressOutOfRange {
            address,
            address_width: width,
        }
        .into());
    }

    Ok(())
}

/// The selectors derived from one address bit.
#[derive(Clone)]
pub struct SelectorPair {
    /// Encrypts the address bit.
    pub positive: L1GgswCiphertext,

    /// Encrypts the complement of the address bit.
    pub negative: L1GgswCiphertext,
}

impl SelectorPair {
    /// Circuit bootstrap `bit` and derive its complement.
    pub fn derive(bit: &L0LweCiphertext, eval: &Evaluation) -> Self {
        let mut positive = L1GgswCiphertext::allocate(&eval.params);
        let mut negative = L1GgswCiphertext::allocate(&eval.params);

        eval.circuit_bootstrap(&mut positive, bit);
        eval.not_ggsw(&mut negative, &positive);

        Self { positive, negative }
    }

    /// The selector that encrypts 1 exactly when the address bit equals
    /// `bit`.
    pub fn select(&self, bit: bool) -> &L1GgswCiphertext {
        if bit { &self.positive } else { &self.negative }
    }
}

/// One [`SelectorPair`] per address bit, least significant first.
#[derive(Clone)]
pub struct Selectors(Vec<SelectorPair>);

impl Selectors {
    /// Derive every address bit's selectors. Bits are bootstrapped in
    /// parallel.
    pub fn derive(address: &EncryptedAddress, eval: &Evaluation) -> Self {
        Self(
            address
                .bits()
                .par_iter()
                .map(|bit| SelectorPair::derive(bit, eval))
                .collect(),
        )
    }

    /// The selector pairs, least significant bit first.
    pub fn pairs(&self) -> &[SelectorPair] {
        &self.0
    }

    /// The number of address bits.
    pub fn width(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        Error,
        test_utils::{
            get_encryption_80, get_evaluation_80, get_secret_keys_80, get_secret_keys_128,
        },
    };

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn address_roundtrips(width in 0usize..12, raw in any::<usize>()) {
            let enc = get_encryption_80();
            let sk = get_secret_keys_80();
            let address = raw & ((1 << width) - 1);

            let encrypted = EncryptedAddress::encrypt(address, width, &enc, &sk).unwrap();

            prop_assert_eq!(encrypted.width(), width);
            prop_assert_eq!(encrypted.decrypt(&enc, &sk), address);
        }
    }

    #[test]
    fn rejects_out_of_range_address() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();

        assert!(matches!(
            EncryptedAddress::encrypt(8, 3, &enc, &sk),
            Err(Error::Configuration(ConfigurationError::AddressOutOfRange {
                address: 8,
                address_width: 3
            }))
        ));

        assert!(matches!(
            EncryptedAddress::encrypt(0, usize::BITS as usize, &enc, &sk),
            Err(Error::Configuration(
                ConfigurationError::AddressWidthTooLarge(_)
            ))
        ));
    }

    #[test]
    fn rejects_key_for_other_params() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_128();

        assert!(matches!(
            EncryptedAddress::encrypt(1, 2, &enc, &sk),
            Err(Error::Primitive(_))
        ));
    }

    #[test]
    fn selectors_encrypt_bit_and_complement() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();
        let eval = get_evaluation_80();

        let address = EncryptedAddress::encrypt(0b10, 2, &enc, &sk).unwrap();
        let selectors = Selectors::derive(&address, &eval);

        assert_eq!(selectors.width(), 2);

        for (i, pair) in selectors.pairs().iter().enumerate() {
            let bit = (0b10 >> i) & 0x1 == 1;

            assert_eq!(enc.decrypt_ggsw_l1(&pair.positive, &sk), bit);
            assert_eq!(enc.decrypt_ggsw_l1(&pair.negative, &sk), !bit);
            assert!(enc.decrypt_ggsw_l1(pair.select(bit), &sk));
            assert!(!enc.decrypt_ggsw_l1(pair.select(!bit), &sk));
        }
    }
}
