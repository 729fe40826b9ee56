// src/miner/hasher.rs
//! SHA-256 hashing for proof-of-work candidates
//!
//! A candidate is `sha256(header_digest || nonce.to_be_bytes())`. The header
//! digest covers every header field except the nonce and is computed once per
//! session.

use crate::types::Header;
use sha2::{Digest, Sha256};

/// Digest of the header fields that stay fixed during a session
pub type HeaderDigest = [u8; 32];

/// Minimum width of the big-endian difficulty encoding
const DIFFICULTY_MIN_WIDTH: usize = 8;

/// SHA-256 of an arbitrary byte sequence
pub fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// Hashes the header fields that do not change while mining
///
/// The difficulty is encoded big-endian, left-padded to at least eight bytes,
/// so any difficulty below `2^64` hashes as a fixed-width 64-bit integer.
pub fn header_digest(header: &Header) -> HeaderDigest {
    let bytes = header.difficulty().to_bytes_be();
    let mut encoded = vec![0u8; DIFFICULTY_MIN_WIDTH.saturating_sub(bytes.len())];
    encoded.extend_from_slice(&bytes);
    digest(&encoded)
}

/// Hash of one candidate nonce
pub fn candidate_hash(header_digest: &HeaderDigest, nonce: u64) -> [u8; 32] {
    CandidateHasher::new(header_digest).hash(nonce)
}

/// Reusable candidate buffer for the search loop
///
/// Holds `header_digest || nonce` on the stack and rewrites only the nonce
/// bytes per attempt.
#[derive(Clone)]
pub(crate) struct CandidateHasher {
    buf: [u8; 40],
}

impl CandidateHasher {
    pub(crate) fn new(header_digest: &HeaderDigest) -> Self {
        let mut buf = [0u8; 40];
        buf[..32].copy_from_slice(header_digest);
        CandidateHasher { buf }
    }

    #[inline]
    pub(crate) fn hash(&mut self, nonce: u64) -> [u8; 32] {
        self.buf[32..].copy_from_slice(&nonce.to_be_bytes());
        digest(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_bigint::BigUint;

    #[test]
    fn test_digest_known_vectors() {
        assert_eq!(
            digest(b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        assert_eq!(
            digest(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_header_digest_uses_eight_byte_encoding() {
        let header = Header::new(BigUint::from(1u32 << 24)).unwrap();
        let expected = digest(&(1u64 << 24).to_be_bytes());
        assert_eq!(header_digest(&header), expected);
    }

    #[test]
    fn test_header_digest_wide_difficulty() {
        let difficulty = BigUint::from(u64::MAX) + 1u32;
        let header = Header::new(difficulty).unwrap();
        let mut encoded = vec![0x01];
        encoded.extend_from_slice(&[0u8; 8]);
        assert_eq!(header_digest(&header), digest(&encoded));
    }

    #[test]
    fn test_candidate_hash_is_digest_of_concatenation() {
        let header = Header::new(BigUint::from(42u32)).unwrap();
        let hd = header_digest(&header);
        let nonce = 0x0102_0304_0506_0708u64;

        let mut joined = hd.to_vec();
        joined.extend_from_slice(&hex!("0102030405060708"));
        assert_eq!(candidate_hash(&hd, nonce), digest(&joined));
    }

    #[test]
    fn test_candidate_hash_deterministic_across_hashers() {
        let hd = header_digest(&Header::new(BigUint::from(7u32)).unwrap());
        let mut a = CandidateHasher::new(&hd);
        let mut b = CandidateHasher::new(&hd);

        for nonce in [0u64, 1, 12345, u64::MAX] {
            let expected = candidate_hash(&hd, nonce);
            assert_eq!(a.hash(nonce), expected);
            assert_eq!(b.hash(nonce), expected);
            assert_eq!(a.hash(nonce), b.hash(nonce));
        }
    }

    #[test]
    fn test_different_nonces_differ() {
        let hd = header_digest(&Header::new(BigUint::from(7u32)).unwrap());
        assert_ne!(candidate_hash(&hd, 1), candidate_hash(&hd, 2));
    }
}
