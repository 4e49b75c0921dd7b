use std::future::Future;

use chia_bls::PublicKey;

use crate::{Asset, Document, RegistryError, RequestContext};

/// The arguments of [`AssetRegistry::define`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub root_keys: Vec<PublicKey>,
    pub quorum: u32,
    pub definition: Option<Document>,
    pub alias: Option<String>,
    pub tags: Option<Document>,
    /// Repeated calls with the same token return the asset created by the first call.
    pub client_token: Option<String>,
}

/// Creates and stores assets. Implementations must be safe to call concurrently.
pub trait AssetRegistry {
    /// Defines a new asset controlled by the given root keys.
    fn define(
        &self,
        ctx: &RequestContext,
        new_asset: NewAsset,
    ) -> impl Future<Output = Result<Asset, RegistryError>> + Send;
}
