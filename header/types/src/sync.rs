//! The surface a generic header-sync framework needs from a header type.

use std::time::SystemTime;

use crate::error::{DecodeError, HeaderError};
use crate::hash::Hash;
use crate::header::Header;

/// Error returned by [`SyncHeader::verify`].
///
/// `soft_failure` is part of the framework's contract for header types that
/// can defer a decision. Rollkit headers never do: a proposer mismatch is
/// final, so [`Header`] only ever reports hard failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("header verification failed: {reason}")]
pub struct VerifyError {
    #[source]
    pub reason: HeaderError,
    pub soft_failure: bool,
}

impl VerifyError {
    pub fn hard(reason: HeaderError) -> Self {
        Self {
            reason,
            soft_failure: false,
        }
    }
}

/// Operations a header must expose to be synced and verified by a generic
/// header-exchange framework.
pub trait SyncHeader: Sized + Clone + Send + Sync + 'static {
    /// Creates a fresh zero-value header.
    fn new() -> Self;

    /// Reports whether `header` is absent.
    fn is_zero(header: Option<&Self>) -> bool {
        header.is_none()
    }

    fn chain_id(&self) -> &str;

    fn hash(&self) -> Hash;

    fn height(&self) -> u64;

    /// Hash of the previous header.
    fn last_header(&self) -> Hash;

    fn time(&self) -> SystemTime;

    /// Performs structural validation.
    fn validate(&self) -> Result<(), HeaderError>;

    /// Verifies `untrusted` against `self`, which is already trusted.
    fn verify(&self, untrusted: &Self) -> Result<(), VerifyError>;

    fn marshal_binary(&self) -> Vec<u8>;

    fn unmarshal_binary(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl SyncHeader for Header {
    fn new() -> Self {
        Header::default()
    }

    fn chain_id(&self) -> &str {
        Header::chain_id(self)
    }

    fn hash(&self) -> Hash {
        Header::hash(self)
    }

    fn height(&self) -> u64 {
        Header::height(self)
    }

    fn last_header(&self) -> Hash {
        Header::last_header(self)
    }

    fn time(&self) -> SystemTime {
        Header::time(self)
    }

    fn validate(&self) -> Result<(), HeaderError> {
        Header::validate(self)
    }

    fn verify(&self, untrusted: &Self) -> Result<(), VerifyError> {
        Header::verify(self, untrusted).map_err(VerifyError::hard)
    }

    fn marshal_binary(&self) -> Vec<u8> {
        Header::marshal_binary(self)
    }

    fn unmarshal_binary(bytes: &[u8]) -> Result<Self, DecodeError> {
        Header::unmarshal_binary(bytes)
    }
}

const _: () = {
    const fn assert_sync_header<H: SyncHeader>() {}
    assert_sync_header::<Header>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::tests::sample_header;

    // Drives the trait the way a sync loop would, without naming `Header`.
    fn accept<H: SyncHeader>(trusted: &H, wire: &[u8]) -> Result<H, String> {
        let candidate = H::unmarshal_binary(wire).map_err(|e| e.to_string())?;
        candidate.validate().map_err(|e| e.to_string())?;
        trusted.verify(&candidate).map_err(|e| e.to_string())?;
        Ok(candidate)
    }

    #[test]
    fn test_new_is_zero_value() {
        let header = <Header as SyncHeader>::new();
        assert_eq!(header, Header::default());
        assert_eq!(SyncHeader::height(&header), 0);
        assert!(SyncHeader::last_header(&header).is_zero());
    }

    #[test]
    fn test_is_zero_checks_absence() {
        let header = sample_header();
        assert!(Header::is_zero(None));
        assert!(!Header::is_zero(Some(&header)));
        assert!(!Header::is_zero(Some(&Header::default())));
    }

    #[test]
    fn test_accessors_delegate() {
        let header = sample_header();
        assert_eq!(SyncHeader::chain_id(&header), "rollkit-test");
        assert_eq!(SyncHeader::height(&header), 5);
        assert_eq!(SyncHeader::hash(&header), header.hash());
        assert_eq!(SyncHeader::last_header(&header), header.last_header_hash);
        assert_eq!(SyncHeader::time(&header), header.time());
    }

    #[test]
    fn test_verify_error_is_hard_failure() {
        let trusted = sample_header();
        let untrusted = Header {
            proposer_address: vec![0x01],
            ..sample_header()
        };

        let err = SyncHeader::verify(&trusted, &untrusted).unwrap_err();
        assert!(!err.soft_failure);
        assert!(matches!(err.reason, HeaderError::ProposerMismatch { .. }));
        assert_eq!(
            err,
            VerifyError::hard(HeaderError::ProposerMismatch {
                trusted: vec![0xaa; 20],
                untrusted: vec![0x01],
            })
        );
    }

    #[test]
    fn test_generic_accept_flow() {
        let trusted = sample_header();
        let next = Header {
            base: crate::header::BaseHeader {
                height: 6,
                ..trusted.base.clone()
            },
            last_header_hash: trusted.hash(),
            ..sample_header()
        };

        let accepted = accept(&trusted, &SyncHeader::marshal_binary(&next)).unwrap();
        assert_eq!(accepted, next);

        let anonymous = Header {
            proposer_address: Vec::new(),
            ..next.clone()
        };
        let err = accept(&trusted, &anonymous.marshal_binary()).unwrap_err();
        assert_eq!(err, "no proposer address");
    }
}
