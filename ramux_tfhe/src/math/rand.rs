use rand::{Rng, RngCore, thread_rng};
use rand_distr::{Distribution, StandardNormal};

use crate::torus;

/// Fill `data` with uniformly random torus elements.
pub fn uniform_torus(data: &mut [u64]) {
    let mut rng = thread_rng();

    data.iter_mut().for_each(|x| *x = rng.next_u64());
}

/// Fill `data` with uniformly random bits.
pub fn uniform_binary(data: &mut [u64]) {
    let mut rng = thread_rng();

    data.iter_mut().for_each(|x| *x = rng.gen_range(0..=1));
}

/// Sample a torus element from a discretized Gaussian centered at 0 with
/// standard deviation `std` (a fraction of the torus).
pub fn normal_torus(std: f64) -> u64 {
    let x: f64 = StandardNormal.sample(&mut thread_rng());

    torus::from_f64(x * std)
}

/// Fill `data` with Gaussian torus elements.
pub fn normal_torus_slice(data: &mut [u64], std: f64) {
    let mut rng = thread_rng();

    data.iter_mut().for_each(|x| {
        let e: f64 = StandardNormal.sample(&mut rng);

        *x = torus::from_f64(e * std);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_is_binary() {
        let mut data = vec![0; 1024];
        uniform_binary(&mut data);

        assert!(data.iter().all(|x| *x <= 1));
        assert!(data.iter().any(|x| *x == 1));
        assert!(data.contains(&0));
    }

    #[test]
    fn normal_has_expected_spread() {
        let std = 2f64.powi(-20);
        let mut data = vec![0; 4096];

        normal_torus_slice(&mut data, std);

        let var = data
            .iter()
            .map(|x| torus::to_f64(*x).powi(2))
            .sum::<f64>()
            / data.len() as f64;

        assert!(var.sqrt() > 0.8 * std && var.sqrt() < 1.2 * std);
    }
}
