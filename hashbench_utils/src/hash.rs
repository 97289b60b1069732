use sha1::{Digest, Sha1};

pub type Sha1Digest = [u8; 20];

/// Single-shot digest on a throwaway context. Used as the reference the
/// parallel paths are checked against.
pub fn sha1_digest<D: AsRef<[u8]>>(data: D) -> Sha1Digest {
    Sha1::new().chain_update(data).finalize().into()
}

pub fn to_hex(digest: &Sha1Digest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
