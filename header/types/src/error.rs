/// Error returned by header validation and verification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("no proposer address")]
    MissingProposerAddress,

    #[error(
        "expected proposer ({}) got ({})",
        hex::encode_upper(.trusted),
        hex::encode_upper(.untrusted)
    )]
    ProposerMismatch {
        trusted: Vec<u8>,
        untrusted: Vec<u8>,
    },
}

/// Error returned when decoding a header from its binary form
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("invalid {field} length: expected 32 bytes, got {len}")]
    InvalidHashLength { field: &'static str, len: usize },
}

/// Error returned when a header cannot be expressed as a CometBFT vote
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("height {0} does not fit in a signed 64-bit integer")]
    HeightOutOfRange(u64),

    #[error("time {0}ns does not fit in a signed 64-bit nanosecond timestamp")]
    TimeOutOfRange(u64),

    #[error("invalid chain id: {0:?}")]
    InvalidChainId(String),
}
