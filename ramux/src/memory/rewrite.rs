use rayon::prelude::*;

use crate::{Evaluation, L0LweCiphertext, L1GgswCiphertext, L1GlweCiphertext};

use super::SelectorPair;

/// Compute the value the addressed cell should hold after a write: `value`
/// when `flag` encrypts 1, `old` otherwise. Both inputs are gate bootstrapped
/// into l1 first, which also resets their noise.
pub(crate) fn candidate(
    flag: &L0LweCiphertext,
    old: &L0LweCiphertext,
    value: &L0LweCiphertext,
    eval: &Evaluation,
) -> L1GlweCiphertext {
    let bootstrap = |input: &L0LweCiphertext| {
        let mut output = L1GlweCiphertext::allocate(&eval.params);
        eval.gate_bootstrap(&mut output, input);

        output
    };

    let (flag, (old, value)) = rayon::join(
        || {
            let mut sel = L1GgswCiphertext::allocate(&eval.params);
            eval.circuit_bootstrap(&mut sel, flag);

            sel
        },
        || rayon::join(|| bootstrap(old), || bootstrap(value)),
    );

    let mut output = L1GlweCiphertext::allocate(&eval.params);
    eval.cmux(&mut output, &flag, &old, &value);

    output
}

/// Produce the rewritten array. Cell `i` becomes `candidate` when `i` equals
/// the address `selectors` encrypt and keeps its value otherwise.
///
/// # Remarks
/// Every cell runs a chain of one CMUX per address bit, starting from
/// `candidate`. Step `j` keeps the chain when bit `j` of the encrypted
/// address matches bit `j` of `i` and falls back to the cell otherwise. All
/// cells are rewritten, whatever the address.
pub(crate) fn rewrite(
    cells: &[L1GlweCiphertext],
    candidate: &L1GlweCiphertext,
    selectors: &[SelectorPair],
    eval: &Evaluation,
) -> Vec<L1GlweCiphertext> {
    cells
        .par_iter()
        .enumerate()
        .map(|(i, cell)| {
            let mut chain = candidate.clone();
            let mut next = L1GlweCiphertext::allocate(&eval.params);

            for (j, pair) in selectors.iter().enumerate() {
                let sel = pair.select((i >> j) & 0x1 == 1);

                eval.cmux(&mut next, sel, cell, &chain);
                std::mem::swap(&mut chain, &mut next);
            }

            chain
        })
        .collect()
}

/// Refresh every cell, resetting the noise the rewrite chains added.
pub(crate) fn refresh(cells: &[L1GlweCiphertext], eval: &Evaluation) -> Vec<L1GlweCiphertext> {
    cells
        .par_iter()
        .map(|cell| {
            let mut output = L1GlweCiphertext::allocate(&eval.params);
            eval.refresh(&mut output, cell);

            output
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        memory::{EncryptedAddress, Selectors},
        test_utils::{get_encryption_80, get_evaluation_80, get_secret_keys_80},
    };

    use super::*;

    #[test]
    fn candidate_is_gated_by_flag() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();
        let eval = get_evaluation_80();

        for flag in [false, true] {
            for old in [false, true] {
                for value in [false, true] {
                    let result = candidate(
                        &enc.encrypt_lwe_l0_secret(flag, &sk),
                        &enc.encrypt_lwe_l0_secret(old, &sk),
                        &enc.encrypt_lwe_l0_secret(value, &sk),
                        &eval,
                    );

                    let expected = if flag { value } else { old };

                    assert_eq!(enc.decrypt_cell(&result, &sk), expected);
                }
            }
        }
    }

    #[test]
    fn rewrite_only_touches_addressed_cell() {
        let enc = get_encryption_80();
        let sk = get_secret_keys_80();
        let eval = get_evaluation_80();

        let cells = (0..4)
            .map(|_| enc.encrypt_cell_secret(false, &sk))
            .collect::<Vec<_>>();
        let candidate = enc.encrypt_cell_secret(true, &sk);

        for address in 0..4 {
            let encrypted = EncryptedAddress::encrypt(address, 2, &enc, &sk).unwrap();
            let selectors = Selectors::derive(&encrypted, &eval);

            let rewritten = rewrite(&cells, &candidate, selectors.pairs(), &eval);
            let refreshed = refresh(&rewritten, &eval);

            assert_eq!(refreshed.len(), cells.len());

            for (i, cell) in refreshed.iter().enumerate() {
                assert_eq!(enc.decrypt_cell(cell, &sk), i == address);
            }
        }
    }
}
