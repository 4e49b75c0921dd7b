use chain_sdk_assets::Asset;
use chain_sdk_types::AssetId;
use chia_protocol::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    json::{hex_asset_id, hex_bytes, hex_bytes_list, raw_json, yes},
    ApiError,
};

/// A signer's root key, the key derived from it for the asset, and the path between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetKey {
    #[serde(with = "hex_bytes")]
    pub root_xpub: Bytes,
    #[serde(with = "hex_bytes")]
    pub asset_pubkey: Bytes,
    #[serde(with = "hex_bytes_list")]
    pub asset_derivation_path: Vec<Bytes>,
}

/// A newly created asset, as reported to the client.
///
/// Fields serialize in declaration order, which clients rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPayload {
    #[serde(with = "hex_asset_id")]
    pub id: AssetId,
    pub alias: String,
    #[serde(with = "hex_bytes")]
    pub issuance_program: Bytes,
    pub keys: Vec<AssetKey>,
    pub quorum: i32,
    #[serde(default, with = "raw_json")]
    pub definition: Option<Bytes>,
    #[serde(default, with = "raw_json")]
    pub tags: Option<Bytes>,
    #[serde(with = "yes")]
    pub is_local: bool,
}

impl AssetPayload {
    /// Builds the payload for an asset, echoing the submitted definition and tags.
    pub fn new(
        asset: &Asset,
        definition: Option<Bytes>,
        tags: Option<Bytes>,
    ) -> Result<Self, ApiError> {
        let quorum = asset.signer.quorum;
        let quorum = i32::try_from(quorum).map_err(|_| {
            ApiError::internal(format!("quorum {quorum} does not fit in a response"))
        })?;

        let keys = asset
            .signer_keys()
            .into_iter()
            .map(|key| AssetKey {
                root_xpub: Bytes::from(key.root_key.to_bytes().to_vec()),
                asset_pubkey: Bytes::from(key.asset_key.to_bytes().to_vec()),
                asset_derivation_path: key.derivation_path.to_bytes_list(),
            })
            .collect();

        Ok(Self {
            id: asset.asset_id,
            alias: asset.alias.clone().unwrap_or_default(),
            issuance_program: asset.issuance_program.clone(),
            keys,
            quorum,
            definition,
            tags,
            is_local: asset.is_local,
        })
    }
}

/// The outcome of one item of a batch. Exactly one of the two is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateAssetResponse {
    Asset(AssetPayload),
    Error(ApiError),
}

impl CreateAssetResponse {
    pub fn asset(&self) -> Option<&AssetPayload> {
        match self {
            Self::Asset(asset) => Some(asset),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Asset(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

impl From<Result<AssetPayload, ApiError>> for CreateAssetResponse {
    fn from(result: Result<AssetPayload, ApiError>) -> Self {
        match result {
            Ok(asset) => Self::Asset(asset),
            Err(error) => Self::Error(error),
        }
    }
}
