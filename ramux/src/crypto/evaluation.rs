use std::{ops::Deref, sync::Arc};

use ramux_tfhe::{
    entities::GgswCiphertext,
    ops::{
        bootstrapping::{circuit_bootstrap, gate_bootstrap},
        ciphertext::sample_extract,
        encryption::trivial_ggsw,
        fft_ops::{cmux, ggsw_sub_fft},
        keyswitch::keyswitch_lwe_to_lwe,
    },
};

use crate::params::Params;

use super::{
    EvaluationKey,
    encryption::{L0LweCiphertext, L1GgswCiphertext, L1GlweCiphertext, L1LweCiphertext},
};

#[derive(Clone)]
/// Performs FHE operations that don't require the evaluation key.
pub struct KeylessEvaluation {
    /// The parameters ciphertexts are expected to be under.
    pub params: Params,
    l1ggsw_one: L1GgswCiphertext,
}

impl KeylessEvaluation {
    /// Create a new [`KeylessEvaluation`].
    pub fn new(params: &Params) -> Self {
        let l1ggsw_one = trivial_ggsw(1, &params.l1_params, &params.cbs_radix)
            .fft(&params.l1_params, &params.cbs_radix)
            .into();

        Self {
            params: params.clone(),
            l1ggsw_one,
        }
    }

    /// Select `a` when `sel` encrypts 0 and `b` when it encrypts 1.
    pub fn cmux(
        &self,
        output: &mut L1GlweCiphertext,
        sel: &L1GgswCiphertext,
        a: &L1GlweCiphertext,
        b: &L1GlweCiphertext,
    ) {
        cmux(
            &mut output.0,
            &a.0,
            &b.0,
            &sel.0,
            &self.params.l1_params,
            &self.params.cbs_radix,
        );
    }

    /// Extract coefficient `idx` of `input` as an [`L1LweCiphertext`].
    pub fn sample_extract_l1(
        &self,
        output: &mut L1LweCiphertext,
        input: &L1GlweCiphertext,
        idx: usize,
    ) {
        sample_extract(&mut output.0, &input.0, idx, &self.params.l1_params);
    }

    /// Given a GGSW encryption of `m` in `{0, 1}`, compute an encryption of
    /// `1 - m` with the same noise.
    pub fn not_ggsw(&self, output: &mut L1GgswCiphertext, input: &L1GgswCiphertext) {
        ggsw_sub_fft(
            &mut output.0,
            &self.l1ggsw_one.0,
            &input.0,
            &self.params.l1_params,
            &self.params.cbs_radix,
        );
    }

    /// Returns a precomputed trivial GGSW encryption of one.
    pub fn l1ggsw_one(&self) -> &L1GgswCiphertext {
        &self.l1ggsw_one
    }
}

#[derive(Clone)]
/// Performs FHE operations, including those that require the evaluation key.
///
/// # Remarks
/// Every operation runs on the calling thread, except circuit bootstrapping
/// which spreads its decomposition levels over the rayon pool.
pub struct Evaluation {
    keyless_eval: KeylessEvaluation,
    evaluation_key: Arc<EvaluationKey>,
}

impl Deref for Evaluation {
    type Target = KeylessEvaluation;

    fn deref(&self) -> &Self::Target {
        &self.keyless_eval
    }
}

impl Evaluation {
    /// Create a new [`Evaluation`].
    pub fn new(evaluation_key: Arc<EvaluationKey>, params: &Params) -> Self {
        Self {
            keyless_eval: KeylessEvaluation::new(params),
            evaluation_key,
        }
    }

    /// Perform a circuit bootstrap, converting an [`L0LweCiphertext`] into an
    /// [`L1GgswCiphertext`] that can drive [`KeylessEvaluation::cmux`].
    ///
    /// # See also
    /// [`circuit_bootstrap`]
    pub fn circuit_bootstrap(&self, output: &mut L1GgswCiphertext, input: &L0LweCiphertext) {
        let mut tmp = GgswCiphertext::new(&self.params.l1_params, &self.params.cbs_radix);

        circuit_bootstrap(
            &mut tmp,
            &input.0,
            &self.evaluation_key.cbs_key,
            &self.evaluation_key.pfks_key,
            &self.params.l0_params,
            &self.params.l1_params,
            &self.params.l2_params,
            &self.params.pbs_radix,
            &self.params.cbs_radix,
            &self.params.pfks_radix,
        );

        output.0 = tmp.fft(&self.params.l1_params, &self.params.cbs_radix);
    }

    /// Convert an [`L1LweCiphertext`] to an [`L0LweCiphertext`].
    ///
    /// # See also
    /// [`keyswitch_lwe_to_lwe`]
    pub fn keyswitch_lwe_l1_lwe_l0(&self, output: &mut L0LweCiphertext, input: &L1LweCiphertext) {
        keyswitch_lwe_to_lwe(
            &mut output.0,
            &input.0,
            &self.evaluation_key.ks_key,
            &self.params.l1_lwe_params(),
            &self.params.l0_params,
            &self.params.ks_radix,
        );
    }

    /// Bootstrap an [`L0LweCiphertext`] into an [`L1GlweCiphertext`] holding
    /// the same bit in coefficient 0 with fresh noise.
    ///
    /// # See also
    /// [`gate_bootstrap`]
    pub fn gate_bootstrap(&self, output: &mut L1GlweCiphertext, input: &L0LweCiphertext) {
        gate_bootstrap(
            &mut output.0,
            &input.0,
            &self.evaluation_key.gate_key,
            &self.params.l0_params,
            &self.params.l1_params,
            &self.params.pbs_radix,
        );
    }

    /// Reset the noise of a memory cell. The bit in coefficient 0 is sample
    /// extracted, keyswitched to l0 and gate bootstrapped back into l1.
    pub fn refresh(&self, output: &mut L1GlweCiphertext, input: &L1GlweCiphertext) {
        let mut lwe_1 = L1LweCiphertext::allocate(&self.params);
        let mut lwe_0 = L0LweCiphertext::allocate(&self.params);

        self.sample_extract_l1(&mut lwe_1, input, 0);
        self.keyswitch_lwe_l1_lwe_l0(&mut lwe_0, &lwe_1);
        self.gate_bootstrap(output, &lwe_0);
    }
}

#[cfg(test)]
mod tests {
    use ramux_tfhe::entities::Polynomial;

    use crate::{
        L1GlweCiphertext, TrivialOne, TrivialZero,
        crypto::encryption::Encryption,
        params::DEFAULT_80,
        test_utils::{get_evaluation_80, get_secret_keys_80},
    };

    #[test]
    fn can_circuit_bootstrap() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut ggsw = enc.allocate_ggsw_l1();

        let lwe = enc.encrypt_lwe_l0_secret(false, &secret);
        eval.circuit_bootstrap(&mut ggsw, &lwe);
        assert!(!enc.decrypt_ggsw_l1(&ggsw, &secret));

        let lwe = enc.encrypt_lwe_l0_secret(true, &secret);
        eval.circuit_bootstrap(&mut ggsw, &lwe);
        assert!(enc.decrypt_ggsw_l1(&ggsw, &secret));
    }

    #[test]
    fn can_lwe_keyswitch() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut lwe_0 = enc.allocate_lwe_l0();

        for bit in [false, true] {
            let lwe_1 = enc.encrypt_lwe_l1_secret(bit, &secret);
            eval.keyswitch_lwe_l1_lwe_l0(&mut lwe_0, &lwe_1);

            assert_eq!(enc.decrypt_lwe_l0(&lwe_0, &secret), bit);
        }
    }

    #[test]
    fn can_cmux() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut ggsw = enc.allocate_ggsw_l1();
        let mut result = enc.allocate_glwe_l1();

        let zero = L1GlweCiphertext::trivial_zero(&enc);
        let one = L1GlweCiphertext::trivial_one(&enc);

        let sel = enc.encrypt_lwe_l0_secret(false, &secret);
        eval.circuit_bootstrap(&mut ggsw, &sel);
        eval.cmux(&mut result, &ggsw, &zero, &one);
        assert!(!enc.decrypt_cell(&result, &secret));

        let sel = enc.encrypt_lwe_l0_secret(true, &secret);
        eval.circuit_bootstrap(&mut ggsw, &sel);
        eval.cmux(&mut result, &ggsw, &zero, &one);
        assert!(enc.decrypt_cell(&result, &secret));
    }

    #[test]
    fn can_not_ggsw() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut ggsw = enc.allocate_ggsw_l1();
        let mut negated = enc.allocate_ggsw_l1();

        for bit in [false, true] {
            let lwe = enc.encrypt_lwe_l0_secret(bit, &secret);
            eval.circuit_bootstrap(&mut ggsw, &lwe);
            eval.not_ggsw(&mut negated, &ggsw);

            assert_eq!(enc.decrypt_ggsw_l1(&negated, &secret), !bit);
        }

        assert!(enc.decrypt_ggsw_l1(eval.l1ggsw_one(), &secret));
    }

    #[test]
    fn can_sample_extract() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut poly = vec![0; DEFAULT_80.l1_poly_degree().0];
        poly[1] = 1;
        let poly = Polynomial::new(&poly);

        let ct = enc.encrypt_glwe_l1_secret(&poly, &secret);
        let mut lwe = enc.allocate_lwe_l1();

        eval.sample_extract_l1(&mut lwe, &ct, 1);
        assert!(enc.decrypt_lwe_l1(&lwe, &secret));

        eval.sample_extract_l1(&mut lwe, &ct, 0);
        assert!(!enc.decrypt_lwe_l1(&lwe, &secret));
    }

    #[test]
    fn can_gate_bootstrap() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut glwe = enc.allocate_glwe_l1();

        for bit in [false, true] {
            let lwe = enc.encrypt_lwe_l0_secret(bit, &secret);
            eval.gate_bootstrap(&mut glwe, &lwe);

            assert_eq!(enc.decrypt_cell(&glwe, &secret), bit);
        }
    }

    #[test]
    fn refresh_keeps_bit() {
        let secret = get_secret_keys_80();
        let enc = Encryption::new(&DEFAULT_80);
        let eval = get_evaluation_80();

        let mut refreshed = enc.allocate_glwe_l1();

        for bit in [false, true] {
            let cell = enc.encrypt_cell_secret(bit, &secret);
            eval.refresh(&mut refreshed, &cell);

            assert_eq!(enc.decrypt_cell(&refreshed, &secret), bit);
            assert_ne!(refreshed.0, cell.0);
        }
    }
}
