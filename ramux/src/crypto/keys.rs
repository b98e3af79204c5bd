use std::mem::size_of;

use log::debug;
use ramux_tfhe::{
    GlweDef, LweDef, RadixDecomposition,
    entities::{
        BootstrapKey, BootstrapKeyFft, CircuitBootstrappingKeyswitchKeys, GgswCiphertext,
        GlweSecretKey, LweKeyswitchKey, LweSecretKey,
    },
    keygen,
};
use serde::{Deserialize, Serialize};

use crate::{params::Params, safe_bincode::GetSize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A secret key.
///
/// # Security
/// You should never share the [`SecretKey`] with the party evaluating a
/// memory, as they'll be able to decrypt every cell and address.
///
/// # Remarks
/// Secret keys are 10s of kB and you should serialize them using APIs that
/// provide compact arrays, such as [`bincode`]. JSON is not recommended.
/// Furthermore, you must treat serialized secret keys with the same care as
/// deserialized ones.
pub struct SecretKey {
    /// The internal [`LweSecretKey`] under level-0 parameters.
    pub lwe_0: LweSecretKey,
    /// The internal [`GlweSecretKey`] under level-1 parameters.
    pub glwe_1: GlweSecretKey,
    /// The internal [`GlweSecretKey`] under level-2 parameters. Only used to
    /// generate the circuit bootstrapping keys.
    pub glwe_2: GlweSecretKey,
}

impl GetSize for SecretKey {
    fn get_size(params: &Params) -> usize {
        // The magic 3 is the length fields of the 3 serialized sequences.
        (LweSecretKey::size(&params.l0_params)
            + GlweSecretKey::size(&params.l1_params)
            + GlweSecretKey::size(&params.l2_params)
            + 3)
            * size_of::<u64>()
    }

    fn check_is_valid(&self, params: &Params) -> crate::Result<()> {
        self.lwe_0.check_is_valid(&params.l0_params)?;
        self.glwe_1.check_is_valid(&params.l1_params)?;
        self.glwe_2.check_is_valid(&params.l2_params)?;

        Ok(())
    }
}

impl SecretKey {
    /// Generate a [`SecretKey`] under the given parameter set.
    pub fn generate(params: &Params) -> Self {
        let lwe_0 = keygen::generate_binary_lwe_sk(&params.l0_params);
        let glwe_1 = keygen::generate_binary_glwe_sk(&params.l1_params);
        let glwe_2 = keygen::generate_binary_glwe_sk(&params.l2_params);

        Self {
            lwe_0,
            glwe_1,
            glwe_2,
        }
    }

    /// Generate a [`SecretKey`] with the default parameter set
    /// ([`crate::DEFAULT_128`]).
    pub fn generate_with_default_params() -> Self {
        Self::generate(&Params::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The evaluation key in serializable form. Call [`EvaluationKeyNonFft::fft`]
/// to get the [`EvaluationKey`] used during evaluation.
///
/// # Remarks
/// The evaluation key lets a party run reads and writes on a memory but
/// cannot decrypt anything. It is large (100s of MB under
/// [`crate::DEFAULT_128`]), so you should serialize it with a protocol that
/// can efficiently store arrays and avoid sharing it often.
pub struct EvaluationKeyNonFft {
    /// The bootstrapping key from l0 to l2 used internally in circuit
    /// bootstrapping.
    pub cbs_key: BootstrapKey,

    /// The private functional keyswitch keys used internally during circuit
    /// bootstrapping.
    pub pfks_key: CircuitBootstrappingKeyswitchKeys,

    /// The keyswitch key for converting L1 LWE ciphertexts to L0 LWE
    /// ciphertexts.
    pub ks_key: LweKeyswitchKey,

    /// The bootstrapping key from l0 to l1 used to refresh values before
    /// they're written to memory.
    pub gate_key: BootstrapKey,
}

fn bootstrap_key_size(lwe: &LweDef, glwe: &GlweDef, radix: &RadixDecomposition) -> usize {
    // One length field for the outer sequence and one per GGSW.
    (lwe.dim.0 * (GgswCiphertext::size(glwe, radix) + 1) + 1) * size_of::<u64>()
}

impl GetSize for EvaluationKeyNonFft {
    fn get_size(params: &Params) -> usize {
        let cbs_key = bootstrap_key_size(&params.l0_params, &params.l2_params, &params.pbs_radix);
        let gate_key = bootstrap_key_size(&params.l0_params, &params.l1_params, &params.pbs_radix);

        // The magic 2 is the lengths of the 2 keyswitch key sequences.
        let keyswitch_keys = (CircuitBootstrappingKeyswitchKeys::size(
            &params.l2_lwe_params(),
            &params.l1_params,
            &params.pfks_radix,
        ) + LweKeyswitchKey::size(
            &params.l1_lwe_params(),
            &params.l0_params,
            &params.ks_radix,
        ) + 2)
            * size_of::<u64>();

        cbs_key + gate_key + keyswitch_keys
    }

    fn check_is_valid(&self, params: &Params) -> crate::Result<()> {
        self.cbs_key
            .check_is_valid(&params.l0_params, &params.l2_params, &params.pbs_radix)?;
        self.pfks_key.check_is_valid(
            &params.l2_lwe_params(),
            &params.l1_params,
            &params.pfks_radix,
        )?;
        self.ks_key.check_is_valid(
            &params.l1_lwe_params(),
            &params.l0_params,
            &params.ks_radix,
        )?;
        self.gate_key
            .check_is_valid(&params.l0_params, &params.l1_params, &params.pbs_radix)?;

        Ok(())
    }
}

impl EvaluationKeyNonFft {
    /// Generate the evaluation keys in non-fft form from the given secret keys.
    ///
    /// # Remarks
    /// The params passed must be the same as those used during secret key generation.
    pub fn generate(secret_key: &SecretKey, params: &Params) -> Self {
        debug!(
            "Generating evaluation key (l0 n={}, l1 N={})",
            params.l0_params.dim.0,
            params.l1_poly_degree().0
        );

        let cbs_key = keygen::generate_bootstrapping_key(
            &secret_key.lwe_0,
            &secret_key.glwe_2,
            &params.l0_params,
            &params.l2_params,
            &params.pbs_radix,
        );

        let gate_key = keygen::generate_bootstrapping_key(
            &secret_key.lwe_0,
            &secret_key.glwe_1,
            &params.l0_params,
            &params.l1_params,
            &params.pbs_radix,
        );

        let ks_key = keygen::generate_ksk(
            &secret_key.glwe_1.to_lwe_secret_key(),
            &secret_key.lwe_0,
            &params.l1_lwe_params(),
            &params.l0_params,
            &params.ks_radix,
        );

        let pfks_key = keygen::generate_cbs_ksk(
            &secret_key.glwe_2.to_lwe_secret_key(),
            &secret_key.glwe_1,
            &params.l2_lwe_params(),
            &params.l1_params,
            &params.pfks_radix,
        );

        Self {
            cbs_key,
            pfks_key,
            ks_key,
            gate_key,
        }
    }

    /// Takes the fast-fourier transform of the bootstrapping keys, which is
    /// used during evaluation.
    pub fn fft(&self, params: &Params) -> EvaluationKey {
        EvaluationKey {
            cbs_key: keygen::fft_bootstrap_key(&self.cbs_key, &params.l2_params, &params.pbs_radix),
            pfks_key: self.pfks_key.clone(),
            ks_key: self.ks_key.clone(),
            gate_key: keygen::fft_bootstrap_key(
                &self.gate_key,
                &params.l1_params,
                &params.pbs_radix,
            ),
        }
    }
}

#[derive(Clone)]
/// The evaluation key in the form used during evaluation, with bootstrapping
/// keys in the fourier domain. See [`EvaluationKeyNonFft`].
pub struct EvaluationKey {
    /// The bootstrapping key from l0 to l2 used internally in circuit
    /// bootstrapping.
    pub cbs_key: BootstrapKeyFft,

    /// The private functional keyswitch keys used internally during circuit
    /// bootstrapping.
    pub pfks_key: CircuitBootstrappingKeyswitchKeys,

    /// The keyswitch key for converting L1 LWE ciphertexts to L0 LWE
    /// ciphertexts.
    pub ks_key: LweKeyswitchKey,

    /// The bootstrapping key from l0 to l1 used by gate bootstrapping.
    pub gate_key: BootstrapKeyFft,
}

impl EvaluationKey {
    /// Generate the evaluation keys from the given secret keys in FFT form.
    pub fn generate(secret_key: &SecretKey, params: &Params) -> Self {
        EvaluationKeyNonFft::generate(secret_key, params).fft(params)
    }

    /// Generate the evaluation keys from the given secret keys using the
    /// default parameters.
    pub fn generate_with_default_params(secret_key: &SecretKey) -> Self {
        Self::generate(secret_key, &Params::default())
    }
}

/// Generate a fresh [`SecretKey`] and the matching [`EvaluationKey`].
pub fn generate_keys(params: &Params) -> (SecretKey, EvaluationKey) {
    let sk = SecretKey::generate(params);
    let ek = EvaluationKey::generate(&sk, params);

    (sk, ek)
}
