use num::{Complex, Zero};

use crate::{
    GlweDef, RadixDecomposition,
    entities::{GgswCiphertextFft, GlweCiphertext},
    math::{
        decomposition::decompose_polynomial,
        fft::{complex_mad, get_fft},
    },
    ops::ciphertext::{glwe_add, glwe_sub},
};

/// Compute the external product of a GGSW ciphertext of `m` and a GLWE
/// ciphertext of `mu`, producing a GLWE ciphertext of `m * mu`.
///
/// # Remarks
/// Each polynomial of `glwe_in` is radix decomposed. Digit `j` of polynomial
/// `i` multiplies GGSW row `(i, j)` and the products are summed in the
/// fourier domain. Since `sum_j digit_j * q / B^(j + 1)` recovers each
/// input polynomial, the sum decrypts to `m` times the input's phase.
///
/// # Panics
/// If any argument does not match `glwe` and `radix`.
pub fn glwe_ggsw_external_product(
    output: &mut GlweCiphertext,
    ggsw: &GgswCiphertextFft,
    glwe_in: &GlweCiphertext,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) {
    output.assert_is_valid(glwe);
    glwe_in.assert_is_valid(glwe);
    ggsw.assert_is_valid(glwe, radix);

    let n = glwe.dim.polynomial_degree.0;
    let half = n / 2;
    let fft = get_fft(n);

    let mut acc = vec![Complex::zero(); (glwe.dim.size.0 + 1) * half];
    let mut digits = vec![vec![0i64; n]; radix.count.0];
    let mut digit_fft = vec![Complex::zero(); half];

    for (i, poly) in glwe_in.polys(glwe).enumerate() {
        decompose_polynomial(poly, radix, &mut digits);

        for (j, digit) in digits.iter().enumerate() {
            fft.forward_signed(digit, &mut digit_fft);

            let row = ggsw.row(i, j, glwe, radix);

            for (acc, row) in acc.chunks_mut(half).zip(row.chunks(half)) {
                complex_mad(acc, &digit_fft, row);
            }
        }
    }

    for (o, acc) in output.polys_mut(glwe).zip(acc.chunks(half)) {
        fft.reverse_torus(acc, o);
    }
}

/// Homomorphically select `a` when `sel` encrypts 0 and `b` when it
/// encrypts 1.
///
/// # Remarks
/// Computes `a + sel * (b - a)` with a single external product. The output
/// noise is the noise of `a` plus the external product noise, so chains of
/// CMUXes grow noise additively.
///
/// # Panics
/// If any argument does not match `glwe` and `radix`.
pub fn cmux(
    output: &mut GlweCiphertext,
    a: &GlweCiphertext,
    b: &GlweCiphertext,
    sel: &GgswCiphertextFft,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) {
    let mut diff = GlweCiphertext::new(glwe);
    let mut prod = GlweCiphertext::new(glwe);

    glwe_sub(&mut diff, b, a, glwe);
    glwe_ggsw_external_product(&mut prod, sel, &diff, glwe, radix);
    glwe_add(output, a, &prod, glwe);
}

/// Compute `output = a - b` for GGSW ciphertexts in the fourier domain.
///
/// # Remarks
/// With `a` a trivial encryption of 1, this computes an encryption of
/// `1 - m` with the same noise as `b`.
pub fn ggsw_sub_fft(
    output: &mut GgswCiphertextFft,
    a: &GgswCiphertextFft,
    b: &GgswCiphertextFft,
    glwe: &GlweDef,
    radix: &RadixDecomposition,
) {
    output.assert_is_valid(glwe, radix);
    a.assert_is_valid(glwe, radix);
    b.assert_is_valid(glwe, radix);

    for ((o, a), b) in output
        .as_mut_slice()
        .iter_mut()
        .zip(a.as_slice().iter())
        .zip(b.as_slice().iter())
    {
        *o = a - b;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        PlaintextBits, TEST_GLWE_DEF_1, TEST_GLWE_DEF_2, TEST_RADIX,
        entities::Polynomial,
        keygen,
        ops::encryption::{decrypt_ggsw, decrypt_glwe, encrypt_ggsw, encrypt_glwe, trivial_ggsw},
    };

    use super::*;

    fn msg_poly(n: usize, seed: u64) -> Polynomial<u64> {
        Polynomial::new(&(0..n as u64).map(|x| (x * seed + 3) % 4).collect::<Vec<_>>())
    }

    #[test]
    fn can_external_product() {
        for glwe in [TEST_GLWE_DEF_1, TEST_GLWE_DEF_2] {
            let sk = keygen::generate_binary_glwe_sk(&glwe);
            let bits = PlaintextBits(2);
            let n = glwe.dim.polynomial_degree.0;

            let msg = msg_poly(n, 5);
            let ct = encrypt_glwe(&msg, &sk, &glwe, bits);

            for m in [0, 1] {
                let ggsw = encrypt_ggsw(m, &sk, &glwe, &TEST_RADIX).fft(&glwe, &TEST_RADIX);
                let mut out = GlweCiphertext::new(&glwe);

                glwe_ggsw_external_product(&mut out, &ggsw, &ct, &glwe, &TEST_RADIX);

                let expected = if m == 1 {
                    msg.clone()
                } else {
                    Polynomial::zero(n)
                };

                assert_eq!(decrypt_glwe(&out, &sk, &glwe, bits), expected);
            }
        }
    }

    #[test]
    fn can_cmux() {
        for glwe in [TEST_GLWE_DEF_1, TEST_GLWE_DEF_2] {
            let sk = keygen::generate_binary_glwe_sk(&glwe);
            let bits = PlaintextBits(2);
            let n = glwe.dim.polynomial_degree.0;

            let a_msg = msg_poly(n, 3);
            let b_msg = msg_poly(n, 11);

            let a = encrypt_glwe(&a_msg, &sk, &glwe, bits);
            let b = encrypt_glwe(&b_msg, &sk, &glwe, bits);

            for (sel, expected) in [(0, &a_msg), (1, &b_msg)] {
                let sel = encrypt_ggsw(sel, &sk, &glwe, &TEST_RADIX).fft(&glwe, &TEST_RADIX);
                let mut out = GlweCiphertext::new(&glwe);

                cmux(&mut out, &a, &b, &sel, &glwe, &TEST_RADIX);

                assert_eq!(&decrypt_glwe(&out, &sk, &glwe, bits), expected);
            }
        }
    }

    #[test]
    fn can_complement_ggsw() {
        let glwe = TEST_GLWE_DEF_1;
        let sk = keygen::generate_binary_glwe_sk(&glwe);
        let one = trivial_ggsw(1, &glwe, &TEST_RADIX).fft(&glwe, &TEST_RADIX);

        for m in [0, 1] {
            let ggsw = encrypt_ggsw(m, &sk, &glwe, &TEST_RADIX).fft(&glwe, &TEST_RADIX);
            let mut not = GgswCiphertextFft::new(&glwe, &TEST_RADIX);

            ggsw_sub_fft(&mut not, &one, &ggsw, &glwe, &TEST_RADIX);

            assert_eq!(
                decrypt_ggsw(&not.ifft(&glwe, &TEST_RADIX), &sk, &glwe, &TEST_RADIX),
                1 - m
            );
        }
    }
}
