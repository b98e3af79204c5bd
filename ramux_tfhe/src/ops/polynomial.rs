use crate::{PlaintextBits, entities::Polynomial, torus};

/// Encode a polynomial for encryption.
///
/// # Remarks
/// This amounts to left shifting each coefficient by `64 - plain_bits`.
/// We encode messages because noise grows in the lower bits
/// (scheme parameters willing) as homomorphic computation unfolds.
///
/// # Panics
/// If `result.len() != msg.len()`
pub fn encode_polynomial(result: &mut [u64], msg: &[u64], plain_bits: PlaintextBits) {
    assert_eq!(result.len(), msg.len());

    result
        .iter_mut()
        .zip(msg.iter())
        .for_each(|(e, m)| *e = torus::encode(*m, plain_bits));
}

/// Decode a polynomial, rounding each coefficient to the nearest message.
///
/// # Panics
/// If `result.len() != msg.len()`
pub fn decode_polynomial(result: &mut [u64], msg: &[u64], plain_bits: PlaintextBits) {
    assert_eq!(result.len(), msg.len());

    result
        .iter_mut()
        .zip(msg.iter())
        .for_each(|(e, m)| *e = torus::decode(*m, plain_bits));
}

/// Compute `output = X^k * input` in `Z_q[X]/(X^N + 1)` for `k` in `[0, 2N)`.
/// Larger `k` wrap around, as `X^(2N) = 1`.
///
/// # Panics
/// If `output` and `input` are not the same length.
pub fn polynomial_mul_monomial(output: &mut [u64], input: &[u64], k: usize) {
    assert_eq!(output.len(), input.len());

    let degree = input.len();
    let k = k % (2 * degree);

    for (i, c) in input.iter().enumerate() {
        let idx = i + k;

        // Landing in an odd multiple of the degree wraps negacyclically.
        output[idx % degree] = if (idx / degree) % 2 == 0 {
            *c
        } else {
            c.wrapping_neg()
        };
    }
}

/// Compute `c += a` coefficientwise.
pub fn polynomial_add_assign(c: &mut [u64], a: &[u64]) {
    for (c, a) in c.iter_mut().zip(a.iter()) {
        *c = c.wrapping_add(*a);
    }
}

/// Compute `c -= a` coefficientwise.
pub fn polynomial_sub_assign(c: &mut [u64], a: &[u64]) {
    for (c, a) in c.iter_mut().zip(a.iter()) {
        *c = c.wrapping_sub(*a);
    }
}

/// Compute `c += a * scalar` coefficientwise, where `scalar` is a signed
/// integer.
pub fn polynomial_scalar_mad(c: &mut [u64], a: &[u64], scalar: i64) {
    let scalar = scalar as u64;

    for (c, a) in c.iter_mut().zip(a.iter()) {
        *c = c.wrapping_add(a.wrapping_mul(scalar));
    }
}

/// Interpret a binary secret key polynomial as signed integers.
pub(crate) fn as_signed(poly: &[u64]) -> Vec<i64> {
    poly.iter().map(|x| *x as i64).collect()
}

impl Polynomial<u64> {
    /// Encode each coefficient as a message of `plain_bits` bits.
    pub fn encode(&self, plain_bits: PlaintextBits) -> Polynomial<u64> {
        let mut result = Polynomial::zero(self.len());
        encode_polynomial(result.coeffs_mut(), self.coeffs(), plain_bits);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_encode_polynomial() {
        let len = 1024u64;
        let plain_bits = PlaintextBits(4);

        let polynomial = Polynomial::new(&(0..len).map(|x| x % 8).collect::<Vec<_>>());
        let encoded = polynomial.encode(plain_bits);

        for (i, c) in encoded.coeffs().iter().enumerate() {
            assert_eq!(*c, torus::encode(i as u64 % 8, plain_bits));
        }

        let mut decoded = Polynomial::zero(len as usize);
        decode_polynomial(decoded.coeffs_mut(), encoded.coeffs(), plain_bits);

        assert_eq!(decoded, polynomial);
    }

    #[test]
    fn monomial_multiplication_is_negacyclic() {
        let input = vec![1, 2, 3, 4];
        let mut output = vec![0; 4];

        polynomial_mul_monomial(&mut output, &input, 1);
        assert_eq!(output, vec![4u64.wrapping_neg(), 1, 2, 3]);

        polynomial_mul_monomial(&mut output, &input, 4);
        assert_eq!(
            output,
            input.iter().map(|x: &u64| x.wrapping_neg()).collect::<Vec<_>>()
        );

        polynomial_mul_monomial(&mut output, &input, 7);
        assert_eq!(output, vec![2, 3, 4, 1u64.wrapping_neg()]);

        polynomial_mul_monomial(&mut output, &input, 8);
        assert_eq!(output, input);
    }
}
