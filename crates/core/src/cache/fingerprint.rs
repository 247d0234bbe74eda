use crate::error::Result;
use serde::Serialize;

/// md5 digest over the JSON encoding of `value`.
///
/// Two values with equal JSON encodings share a fingerprint, which is what
/// lets a stage whose inputs were recomputed but came out equal hit the cache.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let encoded = serde_json::to_vec(value)?;
    Ok(format!("{:x}", md5::compute(&encoded)))
}
