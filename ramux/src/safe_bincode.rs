use bincode::{DefaultOptions, Options};
use serde::Deserialize;

use crate::{Params, Result};

/// Get the expected size of a type for safe bincode deserialization.
pub trait GetSize {
    /// The expected serialized size in bytes under the given [`Params`].
    fn get_size(params: &Params) -> usize;

    /// Check if the given object is valid under the given [`Params`].
    fn check_is_valid(&self, params: &Params) -> Result<()>;
}

/// Safely deserialize the given buffer given a type.
///
/// # Remarks
/// Bincode is told to refuse inputs larger than the size `T` has under
/// `params`, so a corrupt length prefix can't trigger a huge allocation. The
/// decoded value is then checked against `params`.
pub fn deserialize<'a, T: GetSize + Deserialize<'a>>(data: &'a [u8], params: &Params) -> Result<T> {
    let options = DefaultOptions::new()
        .with_limit(T::get_size(params) as u64)
        .with_fixint_encoding()
        .allow_trailing_bytes();

    let mut deserializer = bincode::Deserializer::from_slice(data, options);
    let result = T::deserialize(&mut deserializer)?;
    result.check_is_valid(params)?;

    Ok(result)
}
