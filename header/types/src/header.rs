use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{HeaderError, VoteError};
use crate::hash::Hash;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Converts Unix nanotime to a CometBFT timestamp.
///
/// CometBFT carries time as signed 64-bit nanoseconds, so anything past
/// `i64::MAX` is rejected rather than wrapped.
pub(crate) fn tm_time_from_nanos(nanos: u64) -> Result<tendermint::Time, VoteError> {
    if i64::try_from(nanos).is_err() {
        return Err(VoteError::TimeOutOfRange(nanos));
    }

    // Both parts are in range once `nanos` fits in an i64.
    tendermint::Time::from_unix_timestamp(
        (nanos / NANOS_PER_SECOND) as i64,
        (nanos % NANOS_PER_SECOND) as u32,
    )
    .map_err(|_| VoteError::TimeOutOfRange(nanos))
}

/// Block and App version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub block: u64,
    pub app: u64,
}

/// BaseHeader contains the most basic data of a header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseHeader {
    /// Block height (aka block number)
    pub height: u64,
    /// Unix nanotime of the block
    pub time: u64,
    pub chain_id: String,
}

impl BaseHeader {
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Returns the block timestamp as the Unix epoch plus `time` nanoseconds.
    pub fn time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.time)
    }
}

/// Rollup block header.
///
/// Headers are produced by the sequencer and are immutable once built: this
/// crate only reads, hashes, validates and verifies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub base: BaseHeader,
    pub version: Version,

    /// Hash of the previous header
    pub last_header_hash: Hash,

    /// Commit from the aggregator for the last block
    pub last_commit_hash: Hash,
    /// Root of the block data (transactions)
    pub data_hash: Hash,
    /// Consensus params for the current block
    pub consensus_hash: Hash,
    /// State after applying txs from the current block
    pub app_hash: Hash,

    /// Kept for compatibility with CometBFT light clients
    pub validator_hash: Hash,

    /// Root hash of all results from the txs of the previous block
    pub last_results_hash: Hash,

    /// Original proposer (sequencer) of the block. The address is not always
    /// recoverable from the signature (e.g. ed25519), so it is carried here.
    #[serde(with = "hex::serde")]
    pub proposer_address: Vec<u8>,
}

impl Header {
    pub fn height(&self) -> u64 {
        self.base.height()
    }

    pub fn chain_id(&self) -> &str {
        self.base.chain_id()
    }

    pub fn time(&self) -> SystemTime {
        self.base.time()
    }

    /// Block timestamp as the CometBFT `Time` used in votes.
    pub fn tm_time(&self) -> Result<tendermint::Time, VoteError> {
        tm_time_from_nanos(self.base.time)
    }

    /// Hash of the header this one builds on.
    pub fn last_header(&self) -> Hash {
        self.last_header_hash
    }

    /// SHA-256 of the canonical binary encoding.
    pub fn hash(&self) -> Hash {
        let digest: [u8; 32] = Sha256::digest(self.marshal_binary()).into();
        Hash::new(digest)
    }

    /// Performs basic validation of a header.
    pub fn validate_basic(&self) -> Result<(), HeaderError> {
        if self.proposer_address.is_empty() {
            return Err(HeaderError::MissingProposerAddress);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        self.validate_basic()
    }

    /// Verifies `untrusted` against this (trusted) header.
    ///
    /// A single sequencer produces every block, so the only continuity rule
    /// is that both headers name the same proposer. Height progression and
    /// `last_header_hash` linkage are left to the sync framework.
    pub fn verify(&self, untrusted: &Header) -> Result<(), HeaderError> {
        if untrusted.proposer_address != self.proposer_address {
            debug!(
                trusted_height = self.height(),
                untrusted_height = untrusted.height(),
                "proposer mismatch"
            );
            return Err(HeaderError::ProposerMismatch {
                trusted: self.proposer_address.clone(),
                untrusted: untrusted.proposer_address.clone(),
            });
        }

        Ok(())
    }
}
