use std::{f64::consts::PI, sync::Arc, sync::OnceLock};

use num::{Complex, Zero};
use rustfft::{Fft, FftPlanner};

/// 2^64 as a double.
const Q: f64 = 18446744073709551616.0;
const Q_DIV_2: f64 = 9223372036854775808.0;

const LIMB_BITS: usize = 16;
const LIMB_MASK: u64 = (0x1 << LIMB_BITS) - 1;

static FFTS: [OnceLock<NegacyclicFft>; usize::BITS as usize] =
    [const { OnceLock::new() }; usize::BITS as usize];

/// Returns the cached negacyclic FFT plan for polynomials of the given degree.
///
/// # Panics
/// If `degree` is not a power of 2 or is less than 2.
pub fn get_fft(degree: usize) -> &'static NegacyclicFft {
    assert!(degree.is_power_of_two() && degree >= 2);

    FFTS[degree.ilog2() as usize].get_or_init(|| NegacyclicFft::new(degree))
}

/// A negacyclic FFT of `N` real coefficients.
///
/// # Remarks
/// Multiplication in `R[X]/(X^N + 1)` maps to multiplication in
/// `C[X]/(X^(N/2) - i)` by folding coefficient `j + N/2` into the imaginary
/// part of coefficient `j`. Substituting `X = wY` for `w = e^(i pi / N)` turns
/// the latter into a cyclic convolution of length `N/2`, which a standard
/// complex FFT diagonalizes. The forward transform thus "twists" the folded
/// coefficients by `w^j` before an `N/2`-point FFT and the reverse transform
/// undoes both steps.
pub struct NegacyclicFft {
    degree: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    twist: Vec<Complex<f64>>,
    untwist: Vec<Complex<f64>>,
}

impl NegacyclicFft {
    /// Plan a transform for polynomials of the given degree.
    pub fn new(degree: usize) -> Self {
        assert!(degree.is_power_of_two() && degree >= 2);

        let half = degree / 2;
        let mut planner = FftPlanner::new();

        let twist = (0..half)
            .map(|j| Complex::from_polar(1.0, PI * j as f64 / degree as f64))
            .collect();

        // Fold the 1/(N/2) normalization of the inverse FFT into the untwist.
        let untwist = (0..half)
            .map(|j| Complex::from_polar(1.0 / half as f64, -PI * j as f64 / degree as f64))
            .collect();

        Self {
            degree,
            forward: planner.plan_fft_forward(half),
            inverse: planner.plan_fft_inverse(half),
            twist,
            untwist,
        }
    }

    /// The degree of the polynomials this transform operates on.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Transform `N` real coefficients into `N/2` fourier coefficients.
    pub fn forward(&self, input: &[f64], output: &mut [Complex<f64>]) {
        assert_eq!(input.len(), self.degree);
        assert_eq!(output.len(), self.degree / 2);

        let (re, im) = input.split_at(self.degree / 2);

        complex_twist(output, re, im, &self.twist);
        self.forward.process(output);
    }

    /// Transform a torus polynomial, interpreting each coefficient as a signed
    /// integer.
    pub fn forward_torus(&self, input: &[u64], output: &mut [Complex<f64>]) {
        let input = input.iter().map(|x| *x as i64 as f64).collect::<Vec<_>>();

        self.forward(&input, output);
    }

    /// Transform a polynomial with signed integer coefficients.
    pub fn forward_signed(&self, input: &[i64], output: &mut [Complex<f64>]) {
        let input = input.iter().map(|x| *x as f64).collect::<Vec<_>>();

        self.forward(&input, output);
    }

    /// Transform `N/2` fourier coefficients back into `N` real coefficients.
    pub fn reverse(&self, input: &[Complex<f64>], output: &mut [f64]) {
        assert_eq!(input.len(), self.degree / 2);
        assert_eq!(output.len(), self.degree);

        let mut buffer = input.to_vec();
        self.inverse.process(&mut buffer);

        let (re, im) = output.split_at_mut(self.degree / 2);

        for (((c, t), re), im) in buffer
            .iter()
            .zip(self.untwist.iter())
            .zip(re.iter_mut())
            .zip(im.iter_mut())
        {
            let c = c * t;

            *re = c.re;
            *im = c.im;
        }
    }

    /// Transform back into the coefficient domain and reduce each coefficient
    /// onto the torus.
    pub fn reverse_torus(&self, input: &[Complex<f64>], output: &mut [u64]) {
        let mut coeffs = vec![0.0; self.degree];

        self.reverse(input, &mut coeffs);
        vector_mod_pow2_64_f64(output, &coeffs);
    }

    /// Transform back into the coefficient domain and add the result, reduced
    /// onto the torus, to `output`.
    pub fn reverse_torus_add(&self, input: &[Complex<f64>], output: &mut [u64]) {
        let mut coeffs = vec![0.0; self.degree];

        self.reverse(input, &mut coeffs);

        for (o, c) in output.iter_mut().zip(coeffs.iter()) {
            *o = o.wrapping_add(mod_pow2_64_f64(*c));
        }
    }
}

/// Compute `c += a * b` elementwise.
pub fn complex_mad(c: &mut [Complex<f64>], a: &[Complex<f64>], b: &[Complex<f64>]) {
    for ((c, a), b) in c.iter_mut().zip(a.iter()).zip(b.iter()) {
        *c += a * b;
    }
}

fn complex_twist(c: &mut [Complex<f64>], re: &[f64], im: &[f64], twist: &[Complex<f64>]) {
    for ((c, (re, im)), t) in c.iter_mut().zip(re.iter().zip(im.iter())).zip(twist.iter()) {
        *c = Complex::new(*re, *im) * t;
    }
}

/// Reduce an integer-valued double modulo 2^64.
#[inline(always)]
pub fn mod_pow2_64_f64(val: f64) -> u64 {
    // q is a power of 2, so the division and truncation are exact.
    let mut val = f64::mul_add(-(val / Q).trunc(), Q, val);

    if val >= Q_DIV_2 {
        val -= Q;
    } else if val < -Q_DIV_2 {
        val += Q;
    }

    val.round() as i64 as u64
}

/// Reduce each integer-valued double in `a` modulo 2^64.
pub fn vector_mod_pow2_64_f64(c: &mut [u64], a: &[f64]) {
    for (c, a) in c.iter_mut().zip(a.iter()) {
        *c = mod_pow2_64_f64(*a);
    }
}

/// Compute `c += a * b` exactly in `Z_{2^64}[X]/(X^N + 1)`, where `b` has
/// small integer coefficients (e.g. a binary secret key).
///
/// # Remarks
/// A double cannot hold the product of a 64-bit torus element with anything,
/// so `a` is split into 16-bit limbs. Each limb's product with `b` stays well
/// inside the 53-bit mantissa and rounds back to the exact integer.
///
/// # Panics
/// If the three polynomials do not have the same length, or if a coefficient
/// of `b` exceeds `2^8` in magnitude.
pub fn polynomial_mad_exact(c: &mut [u64], a: &[u64], b: &[i64]) {
    assert_eq!(a.len(), b.len());
    assert_eq!(c.len(), a.len());
    assert!(b.iter().all(|x| x.unsigned_abs() <= 0x1 << 8));

    let degree = a.len();
    let fft = get_fft(degree);

    let mut b_fft = vec![Complex::zero(); degree / 2];
    fft.forward_signed(b, &mut b_fft);

    let mut limb = vec![0.0; degree];
    let mut limb_fft = vec![Complex::zero(); degree / 2];
    let mut prod_fft = vec![Complex::zero(); degree / 2];
    let mut prod = vec![0.0; degree];

    for l in 0..(u64::BITS as usize / LIMB_BITS) {
        let shift = l * LIMB_BITS;

        for (x, a) in limb.iter_mut().zip(a.iter()) {
            *x = ((a >> shift) & LIMB_MASK) as f64;
        }

        fft.forward(&limb, &mut limb_fft);

        prod_fft.fill(Complex::zero());
        complex_mad(&mut prod_fft, &limb_fft, &b_fft);

        fft.reverse(&prod_fft, &mut prod);

        for (c, p) in c.iter_mut().zip(prod.iter()) {
            let p = p.round() as i64 as u64;

            *c = c.wrapping_add(p << shift);
        }
    }
}
