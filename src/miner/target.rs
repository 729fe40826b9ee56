// src/miner/target.rs
//! Acceptance threshold derived from difficulty
//!
//! `target = floor(2^256 / difficulty)`. A candidate hash, read as a
//! big-endian unsigned integer, is accepted when it is at or below the
//! target.

use crate::utils::error::MinerError;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Proof-of-work target for one mining session
///
/// Besides the exact value, the target keeps a 32-byte big-endian bound so
/// the per-hash comparison in the search loop is a plain array comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    value: BigUint,
    /// `None` when the target is at least `2^256 - 1`, i.e. every hash passes
    bound: Option<[u8; 32]>,
}

impl Target {
    /// Computes `floor(2^256 / difficulty)`
    ///
    /// # Returns
    /// * `Ok(Target)` - For any positive difficulty
    /// * `Err(MinerError::ConfigError)` - If the difficulty is zero
    pub fn from_difficulty(difficulty: &BigUint) -> Result<Self, MinerError> {
        if difficulty.is_zero() {
            return Err(MinerError::ConfigError(
                "difficulty must be greater than zero".into(),
            ));
        }

        let value = (BigUint::one() << 256u32) / difficulty;
        let bound = if value.bits() > 256 {
            None
        } else {
            let bytes = value.to_bytes_be();
            let mut bound = [0u8; 32];
            bound[32 - bytes.len()..].copy_from_slice(&bytes);
            if bound == [0xff; 32] { None } else { Some(bound) }
        };

        Ok(Target { value, bound })
    }

    /// Exact target value
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Returns `true` if `hash`, read as a big-endian integer, is `<=` the target
    #[inline]
    pub fn is_met_by(&self, hash: &[u8; 32]) -> bool {
        match &self.bound {
            None => true,
            // Equal-length byte arrays compare lexicographically, which is
            // big-endian numeric order.
            Some(bound) => hash <= bound,
        }
    }
}
