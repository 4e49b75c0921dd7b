use chain_sdk_encoding::EncodingError;
use thiserror::Error;

use crate::{AssetId, KeyError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0}")]
    Encoding(#[from] EncodingError),

    #[error("unsupported asset version {0}")]
    UnsupportedAssetVersion(u64),

    #[error("unknown witness kind {0}")]
    UnknownWitnessKind(u64),

    #[error("unsupported serialization flags {0:#04x}")]
    UnsupportedSerializationFlags(u8),

    #[error("invalid root key {index}: {source}")]
    InvalidKey { index: usize, source: KeyError },

    #[error("committed asset id {committed} does not match computed asset id {computed}")]
    AssetIdMismatch {
        committed: AssetId,
        computed: AssetId,
    },

    #[error("{0} trailing bytes after issuance input")]
    TrailingBytes(usize),
}

impl InputError {
    /// Labels encoding errors with a decoding stage. Other errors are returned as is.
    #[must_use]
    pub fn stage(self, stage: &'static str) -> Self {
        match self {
            Self::Encoding(error) => Self::Encoding(error.stage(stage)),
            error => error,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Encoding(error) if error.is_truncated())
    }
}
