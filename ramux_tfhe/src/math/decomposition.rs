use crate::RadixDecomposition;

/// Decompose a torus element into `radix.count` balanced digits in base
/// `B = 2^radix.radix_log`, most significant first.
///
/// # Remarks
/// The value is first rounded to its `count * radix_log` most significant
/// bits. Digit `j` has weight `q / B^(j + 1)` and lies in `[-B/2, B/2)`, so
/// `sum_j digits[j] * q / B^(j + 1)` equals the rounded value modulo `q`.
///
/// # Panics
/// If `digits.len() != radix.count.0` or the decomposition is invalid.
pub fn decompose_torus(value: u64, radix: &RadixDecomposition, digits: &mut [i64]) {
    radix.assert_valid();
    assert_eq!(digits.len(), radix.count.0);

    let radix_log = radix.radix_log.0;
    let total_bits = radix.count.0 * radix_log;
    let shift = u64::BITS as usize - total_bits;

    let mut rounded = ((value >> (shift - 1)).wrapping_add(1)) >> 1;
    rounded &= (0x1 << total_bits) - 1;

    let base = 0x1i64 << radix_log;
    let half_base = base >> 1;
    let mask = (0x1u64 << radix_log) - 1;

    for digit in digits.iter_mut().rev() {
        let mut d = (rounded & mask) as i64;
        rounded >>= radix_log;

        if d >= half_base {
            d -= base;
            rounded += 1;
        }

        *digit = d;
    }
}

/// Decompose every coefficient of a torus polynomial. `digits[j]` receives
/// the polynomial of `j`-th digits.
///
/// # Panics
/// If `digits` does not contain `radix.count.0` polynomials of the input's
/// length.
pub fn decompose_polynomial(poly: &[u64], radix: &RadixDecomposition, digits: &mut [Vec<i64>]) {
    assert_eq!(digits.len(), radix.count.0);
    assert!(digits.iter().all(|d| d.len() == poly.len()));

    let mut coeff_digits = vec![0; radix.count.0];

    for (i, c) in poly.iter().enumerate() {
        decompose_torus(*c, radix, &mut coeff_digits);

        for (d, c) in digits.iter_mut().zip(coeff_digits.iter()) {
            d[i] = *c;
        }
    }
}

/// The torus element `q / B^(level + 1)`, i.e. the weight of digit `level`.
pub fn gadget_weight(radix: &RadixDecomposition, level: usize) -> u64 {
    0x1 << (u64::BITS as usize - radix.radix_log.0 * (level + 1))
}
