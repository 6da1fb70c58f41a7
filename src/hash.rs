use sha2::{Digest, Sha256};

/// Length of a rendered digest in hex characters.
pub const HASH_HEX_LEN: usize = 64;

/// SHA-256 of `input`, rendered as lowercase hex.
pub fn calculate_hash(input: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_ref());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// True when the first `difficulty` characters of `hash` are all `'0'`.
///
/// A difficulty longer than the hash can never be met.
pub fn hash_meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|c| c == b'0')
}
