// src/types.rs
use crate::utils::error::MinerError;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// Block header mined over by every worker
///
/// Immutable once built. The difficulty is always strictly positive; a
/// zero difficulty is rejected at construction because the target
/// `2^256 / difficulty` would be undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    difficulty: BigUint,
}

impl Header {
    /// Creates a header with the given difficulty
    ///
    /// # Returns
    /// * `Ok(Header)` - For any positive difficulty
    /// * `Err(MinerError::ConfigError)` - If the difficulty is zero
    pub fn new(difficulty: BigUint) -> Result<Self, MinerError> {
        if difficulty.is_zero() {
            return Err(MinerError::ConfigError(
                "difficulty must be greater than zero".into(),
            ));
        }
        Ok(Header { difficulty })
    }

    /// Difficulty of the block being mined
    pub fn difficulty(&self) -> &BigUint {
        &self.difficulty
    }
}

/// A block: header plus an opaque payload that is never hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header the proof-of-work is computed over
    pub header: Header,
    /// Opaque block body
    pub body: Body,
}

impl Block {
    /// Creates a block with an empty body
    pub fn new(header: Header) -> Self {
        Block {
            header,
            body: Body::default(),
        }
    }
}

/// Opaque block payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    /// Raw bytes carried by the block
    pub payload: Vec<u8>,
}

/// Proof-of-work delivered by the winning worker of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningResult {
    /// Nonce that produced the accepted hash
    pub nonce: u64,
    /// Number of hashes the winning worker computed, including the winning one
    pub attempts: u64,
    /// `sha256(header_digest || nonce_be)`, at or below the session target
    pub hash: [u8; 32],
}

impl MiningResult {
    /// Hash as a `0x`-prefixed lowercase hex string
    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }
}

impl fmt::Display for MiningResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.nonce, self.attempts, self.hash_hex())
    }
}
