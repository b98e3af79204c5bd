use std::time::Instant;

use log::{debug, error, trace};
use rayon::prelude::*;

use crate::{
    Encryption, Evaluation, L0LweCiphertext, L1GlweCiphertext, L1LweCiphertext, Params, SecretKey,
    error::{ConfigurationError, Result},
    safe_bincode::GetSize,
};

mod address;
mod rewrite;
mod select_tree;

pub use address::{EncryptedAddress, SelectorPair, Selectors};

/// A homomorphic random-access memory of `2^address_width` encrypted bits.
///
/// # Remarks
/// Reads and writes never learn which cell they touch. A read runs a CMUX
/// tree over every cell and a write rewrites and refreshes every cell, so
/// their cost only depends on the memory's size.
///
/// Reads take `&self` and writes take `&mut self`, so concurrent readers
/// and a single writer are enforced at compile time.
#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<L1GlweCiphertext>,
    address_width: usize,
    params: Params,
}

impl Memory {
    /// Encrypt `bits` into a memory with `2^address_width` cells.
    ///
    /// # Errors
    /// * [`ConfigurationError::MemorySizeMismatch`] if `bits.len()` isn't
    ///   `2^address_width`.
    /// * [`crate::Error::Primitive`] if `sk` doesn't match `enc`'s parameters.
    pub fn setup(
        bits: &[bool],
        address_width: usize,
        enc: &Encryption,
        sk: &SecretKey,
    ) -> Result<Self> {
        check_shape(bits.len(), address_width)?;
        sk.check_is_valid(&enc.params)?;

        debug!(
            "Setting up memory (address_width={address_width}, cells={})",
            bits.len()
        );

        let cells = bits
            .par_iter()
            .map(|&b| enc.encrypt_cell_secret(b, sk))
            .collect();

        Ok(Self {
            cells,
            address_width,
            params: enc.params.clone(),
        })
    }

    /// Create a memory from already encrypted cells.
    ///
    /// # Errors
    /// * [`ConfigurationError::MemoryNotPowerOfTwo`] if the cell count isn't a
    ///   power of two.
    /// * [`ConfigurationError::MemorySizeMismatch`] if it isn't
    ///   `2^address_width`.
    /// * [`crate::Error::Primitive`] if a cell isn't valid under `params`.
    pub fn new(
        cells: Vec<L1GlweCiphertext>,
        address_width: usize,
        params: &Params,
    ) -> Result<Self> {
        if !cells.len().is_power_of_two() {
            return Err(ConfigurationError::MemoryNotPowerOfTwo { len: cells.len() }.into());
        }

        check_shape(cells.len(), address_width)?;

        for cell in &cells {
            cell.check_is_valid(params)?;
        }

        Ok(Self {
            cells,
            address_width,
            params: params.clone(),
        })
    }

    /// The number of bits in an address.
    pub fn address_width(&self) -> usize {
        self.address_width
    }

    /// The number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a memory has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The parameters the cells are encrypted under.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The encrypted cells, in address order.
    pub fn cells(&self) -> &[L1GlweCiphertext] {
        &self.cells
    }

    /// Consume the memory and return its cells.
    pub fn into_cells(self) -> Vec<L1GlweCiphertext> {
        self.cells
    }

    /// Decrypt every cell.
    pub fn decrypt(&self, enc: &Encryption, sk: &SecretKey) -> Vec<bool> {
        self.cells
            .par_iter()
            .map(|cell| enc.decrypt_cell(cell, sk))
            .collect()
    }

    /// Obliviously read the cell at `address`.
    ///
    /// # Errors
    /// * [`ConfigurationError::AddressWidthMismatch`] if `address` has the
    ///   wrong number of bits.
    /// * [`crate::Error::Primitive`] if an address bit isn't valid under this
    ///   memory's parameters.
    pub fn read(&self, address: &EncryptedAddress, eval: &Evaluation) -> Result<L0LweCiphertext> {
        self.check_address(address)?;

        debug!(
            "Reading memory (address_width={}, cells={})",
            self.address_width,
            self.len()
        );

        let now = Instant::now();
        let selectors = Selectors::derive(address, eval);
        trace!("Derived selectors in {:?}", now.elapsed());

        let result = self.read_with(&selectors, eval);

        debug!("Read complete");

        Ok(result)
    }

    fn read_with(&self, selectors: &Selectors, eval: &Evaluation) -> L0LweCiphertext {
        let now = Instant::now();
        let selected = select_tree::select(&self.cells, selectors.pairs(), eval);
        trace!("Select tree in {:?}", now.elapsed());

        let mut lwe_1 = L1LweCiphertext::allocate(&self.params);
        let mut result = L0LweCiphertext::allocate(&self.params);

        eval.sample_extract_l1(&mut lwe_1, &selected, 0);
        eval.keyswitch_lwe_l1_lwe_l0(&mut result, &lwe_1);

        result
    }

    /// Begin a write to `address`. This derives the address selectors once
    /// and reads the current value, both of which [`WriteTransaction::commit`]
    /// reuses.
    ///
    /// # Errors
    /// See [`Memory::read`].
    pub fn begin_write<'a>(
        &'a mut self,
        address: &EncryptedAddress,
        eval: &'a Evaluation,
    ) -> Result<WriteTransaction<'a>> {
        self.check_address(address)?;

        debug!(
            "Beginning write (address_width={}, cells={})",
            self.address_width,
            self.len()
        );

        let now = Instant::now();
        let selectors = Selectors::derive(address, eval);
        trace!("Derived selectors in {:?}", now.elapsed());

        let old = self.read_with(&selectors, eval);

        Ok(WriteTransaction {
            memory: self,
            selectors,
            eval,
            old,
        })
    }

    /// Obliviously write `value` to `address` when `flag` encrypts 1. When
    /// `flag` encrypts 0, every cell keeps its value. Either way, every cell
    /// is re-encrypted.
    ///
    /// # Errors
    /// See [`Memory::begin_write`] and [`WriteTransaction::commit`].
    pub fn write(
        &mut self,
        address: &EncryptedAddress,
        flag: &L0LweCiphertext,
        value: &L0LweCiphertext,
        eval: &Evaluation,
    ) -> Result<()> {
        self.begin_write(address, eval)?.commit(flag, value)
    }

    fn check_address(&self, address: &EncryptedAddress) -> Result<()> {
        if address.width() != self.address_width {
            return Err(ConfigurationError::AddressWidthMismatch {
                expected: self.address_width,
                actual: address.width(),
            }
            .into());
        }

        address.check_is_valid(&self.params)
    }
}

/// An in-progress write that holds exclusive access to a [`Memory`].
///
/// # Remarks
/// Dropping the transaction without calling [`WriteTransaction::commit`]
/// leaves the memory untouched.
pub struct WriteTransaction<'a> {
    memory: &'a mut Memory,
    selectors: Selectors,
    eval: &'a Evaluation,
    old: L0LweCiphertext,
}

impl WriteTransaction<'_> {
    /// The value at the address before this write.
    pub fn read(&self) -> &L0LweCiphertext {
        &self.old
    }

    /// Write `value` when `flag` encrypts 1 and keep the old value
    /// otherwise. The new cells are fully computed before they replace the
    /// memory's cells.
    ///
    /// # Errors
    /// [`crate::Error::Primitive`] if `flag` or `value` isn't valid under the
    /// memory's parameters. The memory is unchanged in that case.
    pub fn commit(self, flag: &L0LweCiphertext, value: &L0LweCiphertext) -> Result<()> {
        let params = &self.memory.params;

        if let Err(e) = flag
            .check_is_valid(params)
            .and_then(|_| value.check_is_valid(params))
        {
            error!("Aborting write: {e}");
            return Err(e);
        }

        let eval = self.eval;

        let now = Instant::now();
        let candidate = rewrite::candidate(flag, &self.old, value, eval);
        trace!("Computed candidate in {:?}", now.elapsed());

        let now = Instant::now();
        let rewritten = rewrite::rewrite(
            &self.memory.cells,
            &candidate,
            self.selectors.pairs(),
            eval,
        );
        trace!("Rewrote cells in {:?}", now.elapsed());

        let now = Instant::now();
        let refreshed = rewrite::refresh(&rewritten, eval);
        trace!("Refreshed cells in {:?}", now.elapsed());

        self.memory.cells = refreshed;

        debug!("Write complete");

        Ok(())
    }
}

fn check_shape(len: usize, address_width: usize) -> Result<()> {
    address::check_address_width(address_width)?;

    if len != 1 << address_width {
        return Err(ConfigurationError::MemorySizeMismatch { len, address_width }.into());
    }

    Ok(())
}
