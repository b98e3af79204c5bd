use rayon::prelude::*;

use crate::{Evaluation, L1GlweCiphertext};

use super::SelectorPair;

/// Obliviously select `cells[address]`, where `selectors` hold the address
/// bits least significant first.
///
/// # Remarks
/// Round `r` pairs adjacent results of the previous round and keeps the odd
/// one when bit `r` is set. After `selectors.len()` rounds a single
/// ciphertext remains. This costs `cells.len() - 1` CMUXes with depth
/// `selectors.len()`, and the CMUXes of a round run in parallel.
///
/// # Panics
/// If `cells.len() != 2^selectors.len()`.
pub(crate) fn select(
    cells: &[L1GlweCiphertext],
    selectors: &[SelectorPair],
    eval: &Evaluation,
) -> L1GlweCiphertext {
    assert_eq!(cells.len(), 1 << selectors.len());

    let Some((sel, rest)) = selectors.split_first() else {
        return cells[0].clone();
    };

    let round = cells
        .par_chunks(2)
        .map(|pair| {
            let mut output = L1GlweCiphertext::allocate(&eval.params);
            eval.cmux(&mut output, &sel.positive, &pair[0], &pair[1]);

            output
        })
        .collect::<Vec<_>>();

    select(&round, rest, eval)
}

#[cfg(test)]
mod tests {
    use crate::{
        TrivialOne, TrivialZero,
        memory::{EncryptedAddress, Selectors},
        test_utils::{get_encryption_80, get_evaluation_80, get_secret_keys_80},
    };

    use super::*;

    #[test]
    fn selects_every_index() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();
        let eval = get_evaluation_80();

        // Trivial cells isolate the tree from encryption noise.
        let plain = [true, false, false, true, true, true, false, false];
        let cells = plain
            .iter()
            .map(|&b| {
                if b {
                    L1GlweCiphertext::trivial_one(&enc)
                } else {
                    L1GlweCiphertext::trivial_zero(&enc)
                }
            })
            .collect::<Vec<_>>();

        for (address, expected) in plain.iter().enumerate() {
            let address = EncryptedAddress::encrypt(address, 3, &enc, &sk).unwrap();
            let selectors = Selectors::derive(&address, &eval);

            let result = select(&cells, selectors.pairs(), &eval);

            assert_eq!(enc.decrypt_cell(&result, &sk), *expected);
        }
    }

    #[test]
    fn zero_width_returns_only_cell() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();
        let eval = get_evaluation_80();

        let cells = vec![enc.encrypt_cell_secret(true, &sk)];
        let result = select(&cells, &[], &eval);

        assert_eq!(result.0, cells[0].0);
    }
}
