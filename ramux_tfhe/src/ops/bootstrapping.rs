use rayon::prelude::*;

use crate::{
    GlweDef, LweDef, PlaintextBits, RadixDecomposition,
    entities::{
        BootstrapKeyFft, CircuitBootstrappingKeyswitchKeys, GgswCiphertext, GlweCiphertext,
        LweCiphertext,
    },
    math::decomposition::gadget_weight,
    ops::{
        ciphertext::{glwe_mul_monomial, lwe_rotate, sample_extract},
        fft_ops::cmux,
        keyswitch::private_functional_keyswitch,
        polynomial::polynomial_mul_monomial,
    },
    torus,
};

/// Round a torus element to the nearest multiple of `q / 2N`, returning the
/// multiple in `[0, 2N)`.
fn mod_switch(x: u64, two_n: usize) -> usize {
    let log_2n = two_n.ilog2();

    // Keep one extra bit so we can round rather than truncate.
    let rounded = ((x >> (u64::BITS - log_2n - 1)) + 1) >> 1;

    rounded as usize % two_n
}

/// Blind rotate `test_vector` by the phase of `input`, producing a GLWE
/// ciphertext under the key `bsk` was generated for that encrypts
/// `X^(-phase) * test_vector`.
///
/// # Remarks
/// Every element of `input` is first switched to the modulus `2N`. Starting
/// from the trivial ciphertext `X^(-b) * v`, each mask element `a_i`
/// contributes one CMUX selecting between the accumulator and the
/// accumulator times `X^(a_i)`, driven by the GGSW encryption of `s_i` in
/// `bsk`. Mask elements that round to zero are skipped.
///
/// When the rounded phase `p` is less than `N`, coefficient 0 of the output
/// encrypts `v_p`. Otherwise it encrypts `-v_(p - N)`.
///
/// # Panics
/// * If `input` is not valid under `lwe`.
/// * If `output` is not valid under `glwe`.
/// * If `test_vector` does not have `N` coefficients.
/// * If `bsk` is not a valid bootstrap key from `lwe` to `glwe` with
///   decomposition `radix`.
pub fn blind_rotate(
    output: &mut GlweCiphertext,
    input: &LweCiphertext,
    test_vector: &[u64],
    bsk: &BootstrapKeyFft,
    lwe: &LweDef,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) {
    input.assert_is_valid(lwe);
    output.assert_is_valid(glwe);
    bsk.assert_is_valid(lwe, glwe, radix);

    let n = glwe.dim.polynomial_degree.0;
    let two_n = 2 * n;

    assert_eq!(test_vector.len(), n);

    output.clear();

    let b = mod_switch(input.b(), two_n);
    polynomial_mul_monomial(output.b_mut(glwe), test_vector, two_n - b);

    let mut rotated = GlweCiphertext::new(glwe);
    let mut next = GlweCiphertext::new(glwe);

    for (a, ggsw) in input.a().iter().zip(bsk.ggsws()) {
        let a = mod_switch(*a, two_n);

        if a == 0 {
            continue;
        }

        glwe_mul_monomial(&mut rotated, output, a, glwe);
        cmux(&mut next, output, &rotated, ggsw, glwe, radix);

        std::mem::swap(output, &mut next);
    }
}

/// Bootstrap an LWE encryption of a bit into a fresh GLWE ciphertext whose
/// constant coefficient encrypts the same bit.
///
/// # Remarks
/// `input` encrypts a bit `m` as `0` or `q/2`. We rotate it by `q/4` so the
/// two messages land in opposite halves of the torus, then blind rotate the
/// constant test vector `-q/4`. For `m = 0` coefficient 0 comes out as `-q/4`
/// and for `m = 1` it comes out as `q/4`. Adding `q/4` to the body restores
/// the `0` or `q/2` encoding.
///
/// The output's noise depends only on `bsk`, not on the noise in `input`, so
/// long as the latter is less than `q/8`.
///
/// Only coefficient 0 of the output is meaningful.
///
/// # Panics
/// See [`blind_rotate`].
pub fn gate_bootstrap(
    output: &mut GlweCiphertext,
    input: &LweCiphertext,
    bsk: &BootstrapKeyFft,
    lwe: &LweDef,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) {
    let quarter = torus::encode(1, PlaintextBits(2));

    let mut rotated = LweCiphertext::new(lwe);
    lwe_rotate(&mut rotated, input, quarter, lwe);

    let test_vector = vec![quarter.wrapping_neg(); glwe.dim.polynomial_degree.0];

    blind_rotate(output, &rotated, &test_vector, bsk, lwe, glwe, radix);

    let b = output.b_mut(glwe);
    b[0] = b[0].wrapping_add(quarter);
}

#[allow(clippy::too_many_arguments)]
/// Bootstraps an LWE encryption of a bit under `lwe_0` into a GGSW ciphertext
/// of the same bit under `glwe_1` with decomposition `cbs_radix`. This resets
/// the noise in the process.
///
/// The output can drive [`cmux`] after converting it with
/// [`GgswCiphertext::fft`].
///
/// # Remarks
/// For each decomposition level `j` in `1..=cbs_radix.count`, we run a
/// programmable bootstrap using `bsk` (which encrypts the `lwe_0` secret key
/// under the `glwe_2` secret key) that maps the input bit to
/// `m * q / B^j` under `glwe_2` reinterpreted as an LWE key. The test vector
/// is the constant `-q / 2B^j`, which produces `-q / 2B^j` or `q / 2B^j`, and
/// we shift the result up by `q / 2B^j`.
///
/// Each level's LWE ciphertext then goes through `glwe_1.dim.size + 1`
/// private functional keyswitches, one per GGSW row. Keyswitch `f` multiplies
/// the message by `-s_f` for mask rows and by 1 for the body row, which
/// produces exactly the rows of a GGSW encryption of `m`.
///
/// Levels are independent and run in parallel.
///
/// # Panics
/// * If `bsk` is not a valid bootstrap key from `lwe_0` to `glwe_2` with
///   decomposition `pbs_radix`.
/// * If `cbsksk` is not valid for switching from `glwe_2` (as LWE) to
///   `glwe_1` with decomposition `pfks_radix`.
/// * If `output` is not a GGSW ciphertext under `glwe_1` with `cbs_radix`.
/// * If `input` is not valid under `lwe_0`.
pub fn circuit_bootstrap(
    output: &mut GgswCiphertext,
    input: &LweCiphertext,
    bsk: &BootstrapKeyFft,
    cbsksk: &CircuitBootstrappingKeyswitchKeys,
    lwe_0: &LweDef,
    glwe_1: &GlweDef,
    glwe_2: &GlweDef,
    pbs_radix: &RadixDecomposition,
    cbs_radix: &RadixDecomposition,
    pfks_radix: &RadixDecomposition,
) {
    lwe_0.assert_valid();
    glwe_1.assert_valid();
    glwe_2.assert_valid();
    pbs_radix.assert_valid();
    cbs_radix.assert_valid();
    pfks_radix.assert_valid();

    let lwe_2 = glwe_2.as_lwe_def();

    input.assert_is_valid(lwe_0);
    output.assert_is_valid(glwe_1, cbs_radix);
    bsk.assert_is_valid(lwe_0, glwe_2, pbs_radix);
    cbsksk.assert_is_valid(&lwe_2, glwe_1, pfks_radix);

    let mut rotated = LweCiphertext::new(lwe_0);
    lwe_rotate(&mut rotated, input, torus::encode(1, PlaintextBits(2)), lwe_0);

    let rows = (0..cbs_radix.count.0)
        .into_par_iter()
        .map(|j| {
            let level = bootstrap_level(&rotated, bsk, lwe_0, glwe_2, pbs_radix, cbs_radix, j);

            (0..=glwe_1.dim.size.0)
                .map(|f| {
                    let mut row = GlweCiphertext::new(glwe_1);

                    private_functional_keyswitch(
                        &mut row,
                        &level,
                        cbsksk,
                        f,
                        &lwe_2,
                        glwe_1,
                        pfks_radix,
                    );

                    row
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    for (j, level_rows) in rows.iter().enumerate() {
        for (f, row) in level_rows.iter().enumerate() {
            output
                .row_mut(f, j, glwe_1, cbs_radix)
                .clone_from_slice(row.as_slice());
        }
    }
}

/// Bootstrap the rotated input bit into an LWE encryption of
/// `m * q / B^(j + 1)` under `glwe_2` as an LWE key.
fn bootstrap_level(
    rotated: &LweCiphertext,
    bsk: &BootstrapKeyFft,
    lwe_0: &LweDef,
    glwe_2: &GlweDef,
    pbs_radix: &RadixDecomposition,
    cbs_radix: &RadixDecomposition,
    j: usize,
) -> LweCiphertext {
    let half_weight = gadget_weight(cbs_radix, j) >> 1;
    let test_vector = vec![half_weight.wrapping_neg(); glwe_2.dim.polynomial_degree.0];

    let mut acc = GlweCiphertext::new(glwe_2);
    blind_rotate(&mut acc, rotated, &test_vector, bsk, lwe_0, glwe_2, pbs_radix);

    let mut extracted = LweCiphertext::new(&glwe_2.as_lwe_def());
    sample_extract(&mut extracted, &acc, 0, glwe_2);

    let b = extracted.b_mut();
    *b = b.wrapping_add(half_weight);

    extracted
}

#[cfg(test)]
mod tests {
    use crate::{
        TEST_CBS_RADIX, TEST_GLWE_DEF_1, TEST_GLWE_DEF_2, TEST_LWE_DEF_1, TEST_PFKS_RADIX,
        TEST_RADIX,
        entities::Polynomial,
        keygen,
        ops::encryption::{
            decrypt_ggsw, decrypt_glwe, encrypt_glwe, encrypt_lwe, encrypt_lwe_torus, glwe_phase,
        },
    };

    use super::*;

    #[test]
    fn mod_switch_rounds_to_nearest() {
        let two_n = 1024;
        let step = 1u64 << 54;

        assert_eq!(mod_switch(0, two_n), 0);
        assert_eq!(mod_switch(step, two_n), 1);
        assert_eq!(mod_switch(step + step / 2 - 1, two_n), 1);
        assert_eq!(mod_switch(step + step / 2, two_n), 2);
        assert_eq!(mod_switch(u64::MAX, two_n), 0);
        assert_eq!(mod_switch(1u64 << 63, two_n), 512);
    }

    #[test]
    fn can_blind_rotate() {
        let lwe = TEST_LWE_DEF_1;
        let glwe = TEST_GLWE_DEF_1;
        let n = glwe.dim.polynomial_degree.0;

        let lwe_sk = keygen::generate_binary_lwe_sk(&lwe);
        let glwe_sk = keygen::generate_binary_glwe_sk(&glwe);
        let bsk = keygen::generate_bootstrapping_key(&lwe_sk, &glwe_sk, &lwe, &glwe, &TEST_RADIX)
            .fft(&glwe, &TEST_RADIX);

        // Identity lookup table on 2 bits of message with padding.
        let bits = PlaintextBits(3);
        let test_vector = (0..n as u64)
            .map(|i| torus::encode(4 * i / n as u64, bits))
            .collect::<Vec<_>>();

        for msg in 0..4 {
            // Center the message in its window of the test vector.
            let offset = torus::encode(1, PlaintextBits(4));
            let encoded = torus::encode(msg, bits).wrapping_add(offset);
            let ct = encrypt_lwe_torus(encoded, &lwe_sk, &lwe);

            let mut out = GlweCiphertext::new(&glwe);
            blind_rotate(&mut out, &ct, &test_vector, &bsk, &lwe, &glwe, &TEST_RADIX);

            let phase = glwe_phase(&out, &glwe_sk, &glwe);

            assert_eq!(torus::decode(phase.coeffs()[0], bits), msg);
        }
    }

    #[test]
    fn can_gate_bootstrap() {
        let lwe = TEST_LWE_DEF_1;
        let glwe = TEST_GLWE_DEF_1;
        let n = glwe.dim.polynomial_degree.0;

        let lwe_sk = keygen::generate_binary_lwe_sk(&lwe);
        let glwe_sk = keygen::generate_binary_glwe_sk(&glwe);
        let bsk = keygen::generate_bootstrapping_key(&lwe_sk, &glwe_sk, &lwe, &glwe, &TEST_RADIX)
            .fft(&glwe, &TEST_RADIX);

        for _ in 0..4 {
            for msg in [0, 1] {
                let ct = encrypt_lwe(msg, &lwe_sk, &lwe, PlaintextBits(1));
                let mut out = GlweCiphertext::new(&glwe);

                gate_bootstrap(&mut out, &ct, &bsk, &lwe, &glwe, &TEST_RADIX);

                let decrypted = decrypt_glwe(&out, &glwe_sk, &glwe, PlaintextBits(1));

                assert_eq!(decrypted.coeffs()[0], msg);
                assert_eq!(decrypted.len(), n);
            }
        }
    }

    #[test]
    fn can_circuit_bootstrap() {
        let lwe_0 = TEST_LWE_DEF_1;
        let glwe_1 = TEST_GLWE_DEF_2;
        let glwe_2 = TEST_GLWE_DEF_1;
        let lwe_2 = glwe_2.as_lwe_def();

        let lwe_0_sk = keygen::generate_binary_lwe_sk(&lwe_0);
        let glwe_1_sk = keygen::generate_binary_glwe_sk(&glwe_1);
        let glwe_2_sk = keygen::generate_binary_glwe_sk(&glwe_2);

        let bsk =
            keygen::generate_bootstrapping_key(&lwe_0_sk, &glwe_2_sk, &lwe_0, &glwe_2, &TEST_RADIX)
                .fft(&glwe_2, &TEST_RADIX);
        let cbsksk = keygen::generate_cbs_ksk(
            &glwe_2_sk.to_lwe_secret_key(),
            &glwe_1_sk,
            &lwe_2,
            &glwe_1,
            &TEST_PFKS_RADIX,
        );

        let n = glwe_1.dim.polynomial_degree.0;
        let bits = PlaintextBits(2);
        let a_msg = Polynomial::new(&(0..n as u64).map(|x| x % 4).collect::<Vec<_>>());
        let b_msg = Polynomial::new(&(0..n as u64).map(|x| (x + 1) % 4).collect::<Vec<_>>());
        let a = encrypt_glwe(&a_msg, &glwe_1_sk, &glwe_1, bits);
        let b = encrypt_glwe(&b_msg, &glwe_1_sk, &glwe_1, bits);

        for msg in [0, 1] {
            let ct = encrypt_lwe(msg, &lwe_0_sk, &lwe_0, PlaintextBits(1));
            let mut ggsw = GgswCiphertext::new(&glwe_1, &TEST_CBS_RADIX);

            circuit_bootstrap(
                &mut ggsw,
                &ct,
                &bsk,
                &cbsksk,
                &lwe_0,
                &glwe_1,
                &glwe_2,
                &TEST_RADIX,
                &TEST_CBS_RADIX,
                &TEST_PFKS_RADIX,
            );

            assert_eq!(decrypt_ggsw(&ggsw, &glwe_1_sk, &glwe_1, &TEST_CBS_RADIX), msg);

            // The bootstrapped GGSW must work as a CMUX selector.
            let sel = ggsw.fft(&glwe_1, &TEST_CBS_RADIX);
            let mut out = GlweCiphertext::new(&glwe_1);

            cmux(&mut out, &a, &b, &sel, &glwe_1, &TEST_CBS_RADIX);

            let expected = if msg == 0 { &a_msg } else { &b_msg };

            assert_eq!(&decrypt_glwe(&out, &glwe_1_sk, &glwe_1, bits), expected);
        }
    }
}
