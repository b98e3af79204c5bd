use crate::{
    GlweDef, LweDef, PlaintextBits, RadixDecomposition,
    entities::{
        GgswCiphertext, GlweCiphertext, GlweSecretKey, LweCiphertext, LweSecretKey, Polynomial,
    },
    math::{decomposition::gadget_weight, fft::polynomial_mad_exact, rand},
    ops::polynomial::{as_signed, decode_polynomial, polynomial_sub_assign},
    torus,
};

/// Encrypt `msg` (encoded in the top `plain_bits` bits) under an LWE secret
/// key.
pub fn encrypt_lwe(
    msg: u64,
    sk: &LweSecretKey,
    lwe: &LweDef,
    plain_bits: PlaintextBits,
) -> LweCiphertext {
    encrypt_lwe_torus(torus::encode(msg, plain_bits), sk, lwe)
}

/// Encrypt an already encoded torus element under an LWE secret key.
pub fn encrypt_lwe_torus(encoded: u64, sk: &LweSecretKey, lwe: &LweDef) -> LweCiphertext {
    let mut ct = LweCiphertext::new(lwe);

    let (a, b) = ct.a_b_mut();
    encrypt_lwe_into(a, b, encoded, sk, lwe);

    ct
}

pub(crate) fn encrypt_lwe_into(
    a: &mut [u64],
    b: &mut u64,
    encoded: u64,
    sk: &LweSecretKey,
    lwe: &LweDef,
) {
    sk.assert_is_valid(lwe);
    assert_eq!(a.len(), lwe.dim.0);

    rand::uniform_torus(a);

    *b = dot(a, sk.s())
        .wrapping_add(rand::normal_torus(lwe.std))
        .wrapping_add(encoded);
}

/// Compute `b - <a, s>`, the message plus noise.
pub fn lwe_phase(ct: &LweCiphertext, sk: &LweSecretKey, lwe: &LweDef) -> u64 {
    ct.assert_is_valid(lwe);
    sk.assert_is_valid(lwe);

    ct.b().wrapping_sub(dot(ct.a(), sk.s()))
}

/// Decrypt an LWE ciphertext and decode the top `plain_bits` bits.
pub fn decrypt_lwe(
    ct: &LweCiphertext,
    sk: &LweSecretKey,
    lwe: &LweDef,
    plain_bits: PlaintextBits,
) -> u64 {
    torus::decode(lwe_phase(ct, sk, lwe), plain_bits)
}

/// A noiseless LWE ciphertext of `msg` with a zero mask. Decrypts under
/// any key.
pub fn trivial_lwe(msg: u64, lwe: &LweDef, plain_bits: PlaintextBits) -> LweCiphertext {
    let mut ct = LweCiphertext::new(lwe);
    *ct.b_mut() = torus::encode(msg, plain_bits);

    ct
}

/// Encrypt a polynomial message, encoding each coefficient in its top
/// `plain_bits` bits.
pub fn encrypt_glwe(
    msg: &Polynomial<u64>,
    sk: &GlweSecretKey,
    glwe: &GlweDef,
    plain_bits: PlaintextBits,
) -> GlweCiphertext {
    encrypt_glwe_torus(msg.encode(plain_bits).coeffs(), sk, glwe)
}

/// Encrypt an already encoded torus polynomial.
pub fn encrypt_glwe_torus(encoded: &[u64], sk: &GlweSecretKey, glwe: &GlweDef) -> GlweCiphertext {
    let mut ct = GlweCiphertext::new(glwe);
    encrypt_glwe_into(ct.as_mut_slice(), encoded, sk, glwe);

    ct
}

pub(crate) fn encrypt_glwe_into(
    output: &mut [u64],
    encoded: &[u64],
    sk: &GlweSecretKey,
    glwe: &GlweDef,
) {
    sk.assert_is_valid(glwe);

    let n = glwe.dim.polynomial_degree.0;
    assert_eq!(output.len(), GlweCiphertext::size(glwe));
    assert_eq!(encoded.len(), n);

    let (a, b) = output.split_at_mut(glwe.dim.size.0 * n);

    rand::uniform_torus(a);
    rand::normal_torus_slice(b, glwe.std);

    for (b, m) in b.iter_mut().zip(encoded.iter()) {
        *b = b.wrapping_add(*m);
    }

    for (a, s) in a.chunks(n).zip(sk.s(glwe)) {
        polynomial_mad_exact(b, a, &as_signed(s));
    }
}

/// Compute `b - sum_i a_i * s_i`, the message plus noise.
pub fn glwe_phase(ct: &GlweCiphertext, sk: &GlweSecretKey, glwe: &GlweDef) -> Polynomial<u64> {
    ct.assert_is_valid(glwe);

    Polynomial::new(&glwe_phase_slice(ct.as_slice(), sk, glwe))
}

fn glwe_phase_slice(ct: &[u64], sk: &GlweSecretKey, glwe: &GlweDef) -> Vec<u64> {
    sk.assert_is_valid(glwe);

    let n = glwe.dim.polynomial_degree.0;
    let (a, b) = ct.split_at(glwe.dim.size.0 * n);

    let mut a_s = vec![0; n];

    for (a, s) in a.chunks(n).zip(sk.s(glwe)) {
        polynomial_mad_exact(&mut a_s, a, &as_signed(s));
    }

    let mut phase = b.to_vec();
    polynomial_sub_assign(&mut phase, &a_s);

    phase
}

/// Decrypt a GLWE ciphertext and decode each coefficient.
pub fn decrypt_glwe(
    ct: &GlweCiphertext,
    sk: &GlweSecretKey,
    glwe: &GlweDef,
    plain_bits: PlaintextBits,
) -> Polynomial<u64> {
    let phase = glwe_phase(ct, sk, glwe);
    let mut msg = Polynomial::zero(phase.len());

    decode_polynomial(msg.coeffs_mut(), phase.coeffs(), plain_bits);

    msg
}

/// A noiseless GLWE ciphertext of `msg` with zero masks.
pub fn trivial_glwe(
    msg: &Polynomial<u64>,
    glwe: &GlweDef,
    plain_bits: PlaintextBits,
) -> GlweCiphertext {
    assert_eq!(msg.len(), glwe.dim.polynomial_degree.0);

    let mut ct = GlweCiphertext::new(glwe);
    ct.b_mut(glwe)
        .clone_from_slice(msg.encode(plain_bits).coeffs());

    ct
}

/// Encrypt the scalar `msg` as a GGSW ciphertext.
///
/// # Remarks
/// `msg` is an integer, not a torus element: row `(i, j)` contains
/// `msg * q / B^(j + 1)` in the constant coefficient of polynomial `i`. For key
/// material `msg` is a secret key bit; for selectors it is 0 or 1.
pub fn encrypt_ggsw(
    msg: u64,
    sk: &GlweSecretKey,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) -> GgswCiphertext {
    radix.assert_valid();

    let n = glwe.dim.polynomial_degree.0;
    let zero = vec![0; n];

    let mut ct = GgswCiphertext::new(glwe, radix);

    for (r, row) in ct.rows_mut(glwe).enumerate() {
        let (i, j) = (r / radix.count.0, r % radix.count.0);

        encrypt_glwe_into(row, &zero, sk, glwe);

        row[i * n] = row[i * n].wrapping_add(msg.wrapping_mul(gadget_weight(radix, j)));
    }

    ct
}

/// Decrypt a GGSW ciphertext of a message less than `B = 2^radix_log`.
///
/// # Remarks
/// Row `(k, 0)` is a GLWE encryption of `msg * q / B`, so decoding its
/// constant coefficient with `radix_log` bits recovers `msg`.
pub fn decrypt_ggsw(
    ct: &GgswCiphertext,
    sk: &GlweSecretKey,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) -> u64 {
    ct.assert_is_valid(glwe, radix);

    let row = ct.row(glwe.dim.size.0, 0, glwe, radix);
    let phase = glwe_phase_slice(row, sk, glwe);

    torus::decode(phase[0], PlaintextBits(radix.radix_log.0 as u32))
}

/// A noiseless GGSW ciphertext of the scalar `msg`.
pub fn trivial_ggsw(msg: u64, glwe: &GlweDef, radix: &RadixDecomposition) -> GgswCiphertext {
    radix.assert_valid();

    let n = glwe.dim.polynomial_degree.0;
    let mut ct = GgswCiphertext::new(glwe, radix);

    for (r, row) in ct.rows_mut(glwe).enumerate() {
        let (i, j) = (r / radix.count.0, r % radix.count.0);

        row[i * n] = msg.wrapping_mul(gadget_weight(radix, j));
    }

    ct
}

fn dot(a: &[u64], s: &[u64]) -> u64 {
    a.iter()
        .zip(s.iter())
        .fold(0u64, |acc, (a, s)| acc.wrapping_add(a.wrapping_mul(*s)))
}

#[cfg(test)]
mod tests {
    use crate::{TEST_GLWE_DEF_1, TEST_GLWE_DEF_2, TEST_LWE_DEF_1, TEST_RADIX, keygen};

    use super::*;

    #[test]
    fn can_roundtrip_lwe() {
        let sk = keygen::generate_binary_lwe_sk(&TEST_LWE_DEF_1);

        for bits in [1, 4] {
            for msg in 0..(0x1 << bits) {
                let ct = encrypt_lwe(msg, &sk, &TEST_LWE_DEF_1, PlaintextBits(bits));

                assert_eq!(decrypt_lwe(&ct, &sk, &TEST_LWE_DEF_1, PlaintextBits(bits)), msg);
            }
        }
    }

    #[test]
    fn trivial_lwe_decrypts_under_any_key() {
        let sk = keygen::generate_binary_lwe_sk(&TEST_LWE_DEF_1);
        let ct = trivial_lwe(1, &TEST_LWE_DEF_1, PlaintextBits(1));

        assert_eq!(decrypt_lwe(&ct, &sk, &TEST_LWE_DEF_1, PlaintextBits(1)), 1);
    }

    #[test]
    fn can_roundtrip_glwe() {
        for glwe in [TEST_GLWE_DEF_1, TEST_GLWE_DEF_2] {
            let sk = keygen::generate_binary_glwe_sk(&glwe);
            let n = glwe.dim.polynomial_degree.0 as u64;

            let msg = Polynomial::new(&(0..n).map(|x| (x * 7) % 16).collect::<Vec<_>>());
            let ct = encrypt_glwe(&msg, &sk, &glwe, PlaintextBits(4));

            assert_eq!(decrypt_glwe(&ct, &sk, &glwe, PlaintextBits(4)), msg);

            let ct = trivial_glwe(&msg, &glwe, PlaintextBits(4));

            assert_eq!(decrypt_glwe(&ct, &sk, &glwe, PlaintextBits(4)), msg);
        }
    }

    #[test]
    fn glwe_noise_matches_parameters() {
        let glwe = TEST_GLWE_DEF_1;
        let sk = keygen::generate_binary_glwe_sk(&glwe);
        let zero = Polynomial::zero(glwe.dim.polynomial_degree.0);

        let ct = encrypt_glwe(&zero, &sk, &glwe, PlaintextBits(1));
        let phase = glwe_phase(&ct, &sk, &glwe);

        // Exact multiplication means the phase is exactly the sampled noise.
        for c in phase.coeffs() {
            assert!(torus::to_f64(*c).abs() < 8.0 * glwe.std);
        }
    }

    #[test]
    fn can_roundtrip_ggsw() {
        for glwe in [TEST_GLWE_DEF_1, TEST_GLWE_DEF_2] {
            let sk = keygen::generate_binary_glwe_sk(&glwe);

            for msg in [0, 1] {
                let ct = encrypt_ggsw(msg, &sk, &glwe, &TEST_RADIX);

                assert_eq!(decrypt_ggsw(&ct, &sk, &glwe, &TEST_RADIX), msg);

                let ct = trivial_ggsw(msg, &glwe, &TEST_RADIX);

                assert_eq!(decrypt_ggsw(&ct, &sk, &glwe, &TEST_RADIX), msg);

                let roundtrip = ct.fft(&glwe, &TEST_RADIX).ifft(&glwe, &TEST_RADIX);

                assert_eq!(decrypt_ggsw(&roundtrip, &sk, &glwe, &TEST_RADIX), msg);
            }
        }
    }
}
