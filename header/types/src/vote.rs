//! CometBFT precommit votes for sequencer-signed headers.
//!
//! The sequencer signs the CometBFT consensus vote for each header so that
//! the signature can be checked by an unmodified CometBFT light client. The
//! sign bytes produced here must match CometBFT's `VoteSignBytes` exactly.

use tendermint::block::{self, parts, Round};
use tendermint::chain;
use tendermint::vote::{CanonicalVote, Type};
use tendermint_proto::v0_38::types::CanonicalVote as RawCanonicalVote;
use tendermint_proto::Protobuf;
use tracing::trace;

use crate::error::VoteError;
use crate::hash::Hash;
use crate::header::{tm_time_from_nanos, Header};

/// Precommit vote for a single-sequencer chain.
///
/// Exactly one sequencer signs each height exactly once, so the round and
/// the validator index are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerVote {
    pub chain_id: String,
    pub height: u64,
    /// Header hash, which is the block hash in rollkit.
    pub block_hash: Hash,
    /// Unix nanotime of the header
    pub time: u64,
    /// The proposer is both the sequencer and the only validator. CometBFT
    /// does not sign the validator address, so it never reaches the sign
    /// bytes directly.
    pub validator_address: Vec<u8>,
}

impl SequencerVote {
    pub fn from_header(header: &Header) -> Self {
        Self {
            chain_id: header.chain_id().to_owned(),
            height: header.height(),
            block_hash: header.hash(),
            time: header.base.time,
            validator_address: header.proposer_address.clone(),
        }
    }

    /// Builds the canonical form of the vote that CometBFT signs.
    pub fn to_canonical_vote(&self) -> Result<CanonicalVote, VoteError> {
        let height = block::Height::try_from(self.height)
            .map_err(|_| VoteError::HeightOutOfRange(self.height))?;
        let chain_id = self
            .chain_id
            .parse::<chain::Id>()
            .map_err(|_| VoteError::InvalidChainId(self.chain_id.clone()))?;

        Ok(CanonicalVote {
            vote_type: Type::Precommit,
            height,
            round: Round::default(),
            block_id: Some(block::Id {
                hash: self.block_hash.into(),
                part_set_header: parts::Header::default(),
            }),
            timestamp: Some(tm_time_from_nanos(self.time)?),
            chain_id,
        })
    }

    /// Returns the bytes the sequencer signs for this vote.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, VoteError> {
        let canonical = self.to_canonical_vote()?;
        let bytes = Protobuf::<RawCanonicalVote>::encode_length_delimited_vec(canonical);
        trace!(height = self.height, len = bytes.len(), "encoded precommit vote");
        Ok(bytes)
    }
}

impl Header {
    /// Makes the CometBFT consensus vote sign bytes for this header.
    pub fn make_cometbft_vote(&self) -> Result<Vec<u8>, VoteError> {
        SequencerVote::from_header(self).sign_bytes()
    }
}
