use rayon::prelude::*;

use crate::{
    GlweDef, LweDef, RadixDecomposition,
    entities::{
        BootstrapKey, BootstrapKeyFft, CircuitBootstrappingKeyswitchKeys, GlweCiphertext,
        GlweSecretKey, LweKeyswitchKey, LweSecretKey,
    },
    math::{decomposition::gadget_weight, rand::uniform_binary},
    ops::encryption::{encrypt_ggsw, encrypt_glwe_into, encrypt_lwe_into},
};

/// Generate a uniformly random binary LWE secret key.
pub fn generate_binary_lwe_sk(lwe: &LweDef) -> LweSecretKey {
    lwe.assert_valid();

    let mut data = vec![0; LweSecretKey::size(lwe)];
    uniform_binary(&mut data);

    LweSecretKey::new(data)
}

/// Generate a uniformly random binary GLWE secret key.
pub fn generate_binary_glwe_sk(glwe: &GlweDef) -> GlweSecretKey {
    glwe.assert_valid();

    let mut data = vec![0; GlweSecretKey::size(glwe)];
    uniform_binary(&mut data);

    GlweSecretKey::new(data)
}

/// Generate a key for bootstrapping ciphertexts under `lwe_sk` into GLWE
/// ciphertexts under `glwe_sk`: a GGSW encryption of each bit of `lwe_sk`.
///
/// # Panics
/// If either secret key does not match its parameters.
pub fn generate_bootstrapping_key(
    lwe_sk: &LweSecretKey,
    glwe_sk: &GlweSecretKey,
    lwe: &LweDef,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) -> BootstrapKey {
    lwe_sk.assert_is_valid(lwe);
    glwe_sk.assert_is_valid(glwe);
    radix.assert_valid();

    let ggsws = lwe_sk
        .s()
        .par_iter()
        .map(|s| encrypt_ggsw(*s, glwe_sk, glwe, radix))
        .collect();

    BootstrapKey::new(ggsws)
}

/// Convert a bootstrapping key to the fourier domain form bootstrapping
/// consumes.
pub fn fft_bootstrap_key(
    bsk: &BootstrapKey,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) -> BootstrapKeyFft {
    bsk.fft(glwe, radix)
}

/// Generate a key for switching LWE ciphertexts under `from_sk` to
/// ciphertexts under `to_sk`.
///
/// # Panics
/// If either secret key does not match its parameters.
pub fn generate_ksk(
    from_sk: &LweSecretKey,
    to_sk: &LweSecretKey,
    from: &LweDef,
    to: &LweDef,
    radix: &RadixDecomposition,
) -> LweKeyswitchKey {
    from_sk.assert_is_valid(from);
    to_sk.assert_is_valid(to);
    radix.assert_valid();

    let mut ksk = LweKeyswitchKey::new(from, to, radix);
    let count = radix.count.0;

    ksk.as_mut_slice()
        .par_chunks_mut(to.dim.0 + 1)
        .enumerate()
        .for_each(|(idx, entry)| {
            let (z, j) = (idx / count, idx % count);
            let (a, b) = entry.split_at_mut(to.dim.0);

            let encoded = from_sk.s()[z].wrapping_mul(gadget_weight(radix, j));

            encrypt_lwe_into(a, &mut b[0], encoded, to_sk, to);
        });

    ksk
}

/// Generate the private functional keyswitch keys circuit bootstrapping uses
/// to turn LWE ciphertexts under `from_sk` into GGSW rows under `to_sk`.
///
/// # Remarks
/// See [`CircuitBootstrappingKeyswitchKeys`] for what each entry encrypts.
///
/// # Panics
/// If either secret key does not match its parameters.
pub fn generate_cbs_ksk(
    from_sk: &LweSecretKey,
    to_sk: &GlweSecretKey,
    from: &LweDef,
    to: &GlweDef,
    radix: &RadixDecomposition,
) -> CircuitBootstrappingKeyswitchKeys {
    from_sk.assert_is_valid(from);
    to_sk.assert_is_valid(to);
    radix.assert_valid();

    let n = to.dim.polynomial_degree.0;
    let k = to.dim.size.0;
    let count = radix.count.0;
    let inputs = from.dim.0 + 1;

    let mut keys = CircuitBootstrappingKeyswitchKeys::new(from, to, radix);

    keys.as_mut_slice()
        .par_chunks_mut(GlweCiphertext::size(to))
        .enumerate()
        .for_each(|(idx, entry)| {
            let t = idx % count;
            let z = (idx / count) % inputs;
            let f = idx / (count * inputs);

            // s'_z, the input key extended with 1 for the body, negated so
            // the mask terms cancel.
            let s_z = if z < from.dim.0 {
                from_sk.s()[z].wrapping_neg()
            } else {
                1
            };

            let scale = s_z.wrapping_mul(gadget_weight(radix, t));

            let msg = if f < k {
                to_sk
                    .s_poly(f, to)
                    .iter()
                    .map(|s| s.wrapping_neg().wrapping_mul(scale))
                    .collect::<Vec<_>>()
            } else {
                let mut msg = vec![0; n];
                msg[0] = scale;

                msg
            };

            encrypt_glwe_into(entry, &msg, to_sk, to);
        });

    keys
}

#[cfg(test)]
mod tests {
    use crate::{
        PlaintextBits, TEST_GLWE_DEF_1, TEST_KS_RADIX, TEST_LWE_DEF_1, TEST_RADIX,
        ops::encryption::decrypt_ggsw,
        torus,
    };

    use super::*;

    #[test]
    fn secret_keys_are_binary() {
        let lwe_sk = generate_binary_lwe_sk(&TEST_LWE_DEF_1);
        let glwe_sk = generate_binary_glwe_sk(&TEST_GLWE_DEF_1);

        lwe_sk.check_is_valid(&TEST_LWE_DEF_1).unwrap();
        glwe_sk.check_is_valid(&TEST_GLWE_DEF_1).unwrap();

        // A 512 bit key of all zeros or all ones is vanishingly unlikely.
        let ones = glwe_sk.s(&TEST_GLWE_DEF_1).flatten().sum::<u64>();
        assert!(ones > 0 && ones < 512);
    }

    #[test]
    fn bootstrap_key_encrypts_lwe_key() {
        let lwe_sk = generate_binary_lwe_sk(&TEST_LWE_DEF_1);
        let glwe_sk = generate_binary_glwe_sk(&TEST_GLWE_DEF_1);

        let bsk = generate_bootstrapping_key(
            &lwe_sk,
            &glwe_sk,
            &TEST_LWE_DEF_1,
            &TEST_GLWE_DEF_1,
            &TEST_RADIX,
        );

        bsk.check_is_valid(&TEST_LWE_DEF_1, &TEST_GLWE_DEF_1, &TEST_RADIX)
            .unwrap();

        for (ggsw, s) in bsk.ggsws().iter().zip(lwe_sk.s()) {
            assert_eq!(
                decrypt_ggsw(ggsw, &glwe_sk, &TEST_GLWE_DEF_1, &TEST_RADIX),
                *s
            );
        }
    }

    #[test]
    fn ksk_entries_encrypt_scaled_key() {
        let from_sk = generate_binary_lwe_sk(&TEST_LWE_DEF_1);
        let to_sk = generate_binary_lwe_sk(&TEST_LWE_DEF_1);

        let ksk = generate_ksk(
            &from_sk,
            &to_sk,
            &TEST_LWE_DEF_1,
            &TEST_LWE_DEF_1,
            &TEST_KS_RADIX,
        );

        for z in [0, 17, 127] {
            let first = ksk.entries(z, &TEST_LWE_DEF_1, &TEST_KS_RADIX).next().unwrap();
            let (a, b) = first.split_at(TEST_LWE_DEF_1.dim.0);

            let a_s = a
                .iter()
                .zip(to_sk.s())
                .fold(0u64, |acc, (a, s)| acc.wrapping_add(a.wrapping_mul(*s)));

            // Level 0 carries s_z * q / 4, which decodes with 2 bits.
            assert_eq!(
                torus::decode(b[0].wrapping_sub(a_s), PlaintextBits(2)),
                from_sk.s()[z]
            );
        }
    }
}
