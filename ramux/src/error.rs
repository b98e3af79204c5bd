/// Errors in the shape of a memory or an address. These are detected before
/// any homomorphic work begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The number of cells is not a power of two.
    #[error("Memory has {len} cells, which is not a power of two.")]
    MemoryNotPowerOfTwo {
        /// The number of cells given.
        len: usize,
    },

    /// The number of cells doesn't match the address width.
    #[error(
        "Memory has {len} cells but an address width of {address_width} requires 2^{address_width}."
    )]
    MemorySizeMismatch {
        /// The number of cells given.
        len: usize,

        /// The requested address width.
        address_width: usize,
    },

    /// An address's width doesn't match the memory it's used with.
    #[error("Address has {actual} bits but the memory expects {expected}.")]
    AddressWidthMismatch {
        /// The memory's address width.
        expected: usize,

        /// The number of bits in the address.
        actual: usize,
    },

    /// A plaintext address doesn't fit in the requested width.
    #[error("Address {address} does not fit in {address_width} bits.")]
    AddressOutOfRange {
        /// The plaintext address.
        address: usize,

        /// The address width it was encoded with.
        address_width: usize,
    },

    /// The address width is at least the width of a `usize`.
    #[error("Address width {0} is too large.")]
    AddressWidthTooLarge(usize),
}

#[derive(Debug, thiserror::Error)]
/// Errors that can occur in this crate.
pub enum Error {
    /// A memory or address had the wrong shape.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// A key or ciphertext did not match the expected parameters.
    #[error("{0}")]
    Primitive(#[from] ramux_tfhe::Error),

    /// Serialization or deserialization failed.
    #[error("{0}")]
    Bincode(#[from] bincode::Error),
}

/// A result in this crate.
pub type Result<T> = std::result::Result<T, Error>;
