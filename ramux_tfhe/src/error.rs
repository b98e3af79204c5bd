/// Errors that can occur when validating TFHE entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The entity did not have the length its parameters require.
    #[error("Invalid size: expected {expected} elements, found {actual}.")]
    InvalidSize {
        /// The length implied by the parameters.
        expected: usize,

        /// The length actually found.
        actual: usize,
    },

    /// A secret key contained a coefficient other than 0 or 1.
    #[error("Secret key is not binary.")]
    NotBinary,
}

/// A result type for TFHE operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::InvalidSize { expected, actual })
    }
}
