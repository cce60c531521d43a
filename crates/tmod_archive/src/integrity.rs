//! SHA-1 content digest checks.

use sha1::{Digest, Sha1};

/// Size in bytes of the content digest stored in the archive header
pub const DIGEST_LEN: usize = 20;

/// Outcome of comparing the declared digest against the archive contents.
///
/// A mismatch only means the archive was modified after it was signed, or the
/// digest is stale. The contents are still extracted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Integrity {
    Matched,
    Mismatched { computed: [u8; DIGEST_LEN] },
}

impl Integrity {
    pub fn is_match(&self) -> bool {
        matches!(self, Integrity::Matched)
    }
}

/// Compute the SHA-1 digest of `bytes`
pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    Sha1::digest(bytes).into()
}

/// Check `bytes` against the digest declared in the header
pub fn verify(declared: &[u8; DIGEST_LEN], bytes: &[u8]) -> Integrity {
    let computed = digest(bytes);
    if &computed == declared {
        Integrity::Matched
    } else {
        Integrity::Mismatched { computed }
    }
}
