//! Deep copies through a serialization round trip.
//!
//! The whole value graph of the source is serialized and materialized again
//! into the target, so nested records, collections and boxed members come
//! out fully built and never alias the source.
//!
//! The intermediate form is CBOR: struct fields travel by name, so the
//! target may be a different type with a compatible layout, and floats keep
//! their exact bits, infinities and NaN included.
//!
//! Only what serializes is copied. Fields skipped by serde (`#[serde(skip)]`,
//! typically the private ones) are left at their default in the copy.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// Copy `src` into `dst` through a serialization round trip.
///
/// `src` and `dst` may be different types as long as the serialized form of
/// one deserializes into the other.
pub fn deep_copy<S, D>(dst: &mut D, src: &S) -> Result<(), Error>
where
    S: Serialize + ?Sized,
    D: DeserializeOwned,
{
    let bytes = serde_cbor::to_vec(&src)?;
    *dst = serde_cbor::from_slice(&bytes)?;
    Ok(())
}

/// Produce an independent copy of `src`.
pub fn deep_clone<T>(src: &T) -> Result<T, Error>
where
    T: Serialize + DeserializeOwned,
{
    let bytes = serde_cbor::to_vec(src)?;
    Ok(serde_cbor::from_slice(&bytes)?)
}
