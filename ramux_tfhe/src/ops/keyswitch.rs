use crate::{
    GlweDef, LweDef, RadixDecomposition,
    entities::{CircuitBootstrappingKeyswitchKeys, GlweCiphertext, LweCiphertext, LweKeyswitchKey},
    math::decomposition::decompose_torus,
    ops::polynomial::polynomial_scalar_mad,
};

/// Switch an LWE ciphertext under the key `from` was generated for into one
/// under the key `to` was generated for. The message is unchanged.
///
/// # Remarks
/// Starting from the trivial ciphertext `(0, b)`, subtracts
/// `digit_j(a_z) * KSK[z][j]` for every input mask element `a_z` and
/// decomposition level `j`. Since `KSK[z][j]` encrypts `s_z * q / B^(j + 1)`,
/// the result's phase is `b - <a, s>` up to rounding and keyswitch key noise.
///
/// # Panics
/// If any argument does not match the given parameters.
pub fn keyswitch_lwe_to_lwe(
    output: &mut LweCiphertext,
    input: &LweCiphertext,
    ksk: &LweKeyswitchKey,
    from: &LweDef,
    to: &LweDef,
    radix: &RadixDecomposition,
) {
    input.assert_is_valid(from);
    output.assert_is_valid(to);
    ksk.assert_is_valid(from, to, radix);

    let mut acc = vec![0u64; to.dim.0 + 1];
    acc[to.dim.0] = input.b();

    let mut digits = vec![0i64; radix.count.0];

    for (z, a) in input.a().iter().enumerate() {
        decompose_torus(*a, radix, &mut digits);

        for (d, entry) in digits.iter().zip(ksk.entries(z, to, radix)) {
            polynomial_scalar_mad(&mut acc, entry, d.wrapping_neg());
        }
    }

    output.a_mut().clone_from_slice(&acc[..to.dim.0]);
    *output.b_mut() = acc[to.dim.0];
}

/// Apply private functional keyswitch key `f` to `input`, producing a GLWE
/// ciphertext of `P_f` times the input's message (see
/// [`CircuitBootstrappingKeyswitchKeys`] for `P_f`).
///
/// # Remarks
/// Treats the input as the vector `(a_0, ..., a_{n-1}, b)` against the key
/// `(-s_0, ..., -s_{n-1}, 1)` and sums `digit_t(c_z) * K_f[z][t]` over every
/// element `c_z` and level `t`.
///
/// # Panics
/// If any argument does not match the given parameters or `f > k`.
pub fn private_functional_keyswitch(
    output: &mut GlweCiphertext,
    input: &LweCiphertext,
    pfks: &CircuitBootstrappingKeyswitchKeys,
    f: usize,
    from: &LweDef,
    to: &GlweDef,
    radix: &RadixDecomposition,
) {
    assert!(f <= to.dim.size.0);
    input.assert_is_valid(from);
    output.assert_is_valid(to);
    pfks.assert_is_valid(from, to, radix);

    output.clear();

    let mut digits = vec![0i64; radix.count.0];

    for (z, c) in input.as_slice().iter().enumerate() {
        decompose_torus(*c, radix, &mut digits);

        for (d, entry) in digits.iter().zip(pfks.entries(f, z, from, to, radix)) {
            if *d != 0 {
                polynomial_scalar_mad(output.as_mut_slice(), entry, *d);
            }
        }
    }
}
