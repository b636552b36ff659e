//! Rollkit block header types.
//!
//! Data model, structural validation and trust verification of rollup headers,
//! plus the CometBFT precommit vote encoding the sequencer signs.

pub mod codec;
pub mod error;
pub mod hash;
pub mod header;
pub mod sync;
pub mod vote;

pub use error::{DecodeError, HeaderError, VoteError};
pub use hash::{Hash, HASH_LEN};
pub use header::{BaseHeader, Header, Version};
pub use sync::{SyncHeader, VerifyError};
pub use vote::SequencerVote;
