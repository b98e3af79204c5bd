use crate::{
    GlweDef, LweDef,
    entities::{GlweCiphertext, LweCiphertext},
    ops::polynomial::{polynomial_add_assign, polynomial_mul_monomial, polynomial_sub_assign},
};

/// Add `amount` to the body of the ciphertext (mod q).
/// This shifts where messages lie on the torus and adds no noise.
///
/// # Remark
/// Suppose we have plaintexts 0 and 1 that lie centered at 0 and q/2 respectively.
/// If we rotate by q/4, then the 0 lies centered at q/4 and 1 lies at 3q/4 == -q/4.
pub fn lwe_rotate(output: &mut LweCiphertext, input: &LweCiphertext, amount: u64, lwe: &LweDef) {
    output.assert_is_valid(lwe);
    input.assert_is_valid(lwe);

    output.a_mut().clone_from_slice(input.a());
    *output.b_mut() = input.b().wrapping_add(amount);
}

/// Compute `output = a + b`.
pub fn glwe_add(
    output: &mut GlweCiphertext,
    a: &GlweCiphertext,
    b: &GlweCiphertext,
    glwe: &GlweDef,
) {
    output.assert_is_valid(glwe);
    a.assert_is_valid(glwe);
    b.assert_is_valid(glwe);

    output.as_mut_slice().clone_from_slice(a.as_slice());
    polynomial_add_assign(output.as_mut_slice(), b.as_slice());
}

/// Compute `output = a - b`.
pub fn glwe_sub(
    output: &mut GlweCiphertext,
    a: &GlweCiphertext,
    b: &GlweCiphertext,
    glwe: &GlweDef,
) {
    output.assert_is_valid(glwe);
    a.assert_is_valid(glwe);
    b.assert_is_valid(glwe);

    output.as_mut_slice().clone_from_slice(a.as_slice());
    polynomial_sub_assign(output.as_mut_slice(), b.as_slice());
}

/// Multiply every polynomial of a GLWE ciphertext by `X^k`. The result
/// encrypts the input message times `X^k`.
pub fn glwe_mul_monomial(
    output: &mut GlweCiphertext,
    input: &GlweCiphertext,
    k: usize,
    glwe: &GlweDef,
) {
    output.assert_is_valid(glwe);
    input.assert_is_valid(glwe);

    for (o, i) in output.polys_mut(glwe).zip(input.polys(glwe)) {
        polynomial_mul_monomial(o, i, k);
    }
}

/// Extract coefficient `idx` of a GLWE ciphertext's message as an LWE
/// ciphertext under the GLWE secret key viewed as an LWE key (see
/// [`GlweDef::as_lwe_def`]). Adds no noise.
///
/// # Panics
/// If `idx` is not less than the polynomial degree, or if the ciphertexts
/// do not match `glwe`.
pub fn sample_extract(
    output: &mut LweCiphertext,
    input: &GlweCiphertext,
    idx: usize,
    glwe: &GlweDef,
) {
    let n = glwe.dim.polynomial_degree.0;

    assert!(idx < n);
    output.assert_is_valid(&glwe.as_lwe_def());
    input.assert_is_valid(glwe);

    let (a_out, b_out) = output.a_b_mut();

    for (a_out, a_in) in a_out.chunks_mut(n).zip(input.a(glwe)) {
        for (j, a) in a_out.iter_mut().enumerate() {
            // Coefficient idx of a * s picks up a[idx - j] * s[j], negated
            // when the index wraps past X^N.
            *a = if j <= idx {
                a_in[idx - j]
            } else {
                a_in[n + idx - j].wrapping_neg()
            };
        }
    }

    *b_out = input.b(glwe)[idx];
}
