//! Protobuf wire format of a header.
//!
//! The encoding is the canonical binary form: it is what gets hashed and what
//! goes over the wire to the header exchange.

use prost::Message;
use tendermint_proto::Protobuf;

use crate::error::DecodeError;
use crate::hash::Hash;
use crate::header::{BaseHeader, Header, Version};

#[derive(Clone, PartialEq, Message)]
pub struct RawVersion {
    #[prost(uint64, tag = "1")]
    pub block: u64,
    #[prost(uint64, tag = "2")]
    pub app: u64,
}

#[derive(Clone, PartialEq, Message)]
pub struct RawHeader {
    #[prost(message, optional, tag = "1")]
    pub version: Option<RawVersion>,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(uint64, tag = "3")]
    pub time: u64,
    #[prost(bytes = "vec", tag = "4")]
    pub last_header_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub last_commit_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub data_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub consensus_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub app_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "9")]
    pub last_results_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub proposer_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "11")]
    pub validator_hash: Vec<u8>,
    #[prost(string, tag = "12")]
    pub chain_id: String,
}

impl From<Version> for RawVersion {
    fn from(version: Version) -> Self {
        Self {
            block: version.block,
            app: version.app,
        }
    }
}

impl From<RawVersion> for Version {
    fn from(raw: RawVersion) -> Self {
        Self {
            block: raw.block,
            app: raw.app,
        }
    }
}

impl From<Header> for RawHeader {
    fn from(header: Header) -> Self {
        Self {
            version: Some(header.version.into()),
            height: header.base.height,
            time: header.base.time,
            last_header_hash: header.last_header_hash.as_ref().to_vec(),
            last_commit_hash: header.last_commit_hash.as_ref().to_vec(),
            data_hash: header.data_hash.as_ref().to_vec(),
            consensus_hash: header.consensus_hash.as_ref().to_vec(),
            app_hash: header.app_hash.as_ref().to_vec(),
            last_results_hash: header.last_results_hash.as_ref().to_vec(),
            proposer_address: header.proposer_address,
            validator_hash: header.validator_hash.as_ref().to_vec(),
            chain_id: header.base.chain_id,
        }
    }
}

impl TryFrom<RawHeader> for Header {
    type Error = DecodeError;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        Ok(Self {
            base: BaseHeader {
                height: raw.height,
                time: raw.time,
                chain_id: raw.chain_id,
            },
            version: raw.version.map(Version::from).unwrap_or_default(),
            last_header_hash: Hash::from_field("last_header_hash", &raw.last_header_hash)?,
            last_commit_hash: Hash::from_field("last_commit_hash", &raw.last_commit_hash)?,
            data_hash: Hash::from_field("data_hash", &raw.data_hash)?,
            consensus_hash: Hash::from_field("consensus_hash", &raw.consensus_hash)?,
            app_hash: Hash::from_field("app_hash", &raw.app_hash)?,
            validator_hash: Hash::from_field("validator_hash", &raw.validator_hash)?,
            last_results_hash: Hash::from_field("last_results_hash", &raw.last_results_hash)?,
            proposer_address: raw.proposer_address,
        })
    }
}

impl Protobuf<RawHeader> for Header {}

impl Header {
    /// Encodes the header into its canonical binary form.
    pub fn marshal_binary(&self) -> Vec<u8> {
        Protobuf::<RawHeader>::encode_vec(self.clone())
    }

    /// Decodes a header from its canonical binary form.
    pub fn unmarshal_binary(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw = RawHeader::decode(bytes)?;
        Header::try_from(raw)
    }
}
