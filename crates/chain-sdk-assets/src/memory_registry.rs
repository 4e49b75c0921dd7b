use std::collections::{HashMap, HashSet};

use chain_sdk_types::{
    asset_definition_hash, compute_asset_id, multisig_program, AssetId, DerivationPath,
};
use chia_bls::PublicKey;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    canonical_definition, Asset, AssetRegistry, NewAsset, RegistryConfig, RegistryError,
    RequestContext, Signer,
};

/// An asset registry that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryAssetRegistry {
    config: RegistryConfig,
    state: Mutex<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    assets: IndexMap<AssetId, Asset>,
    aliases: HashMap<String, AssetId>,
    client_tokens: HashMap<String, AssetId>,
    next_key_index: u32,
}

impl MemoryAssetRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RegistryState::default()),
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    pub fn asset(&self, asset_id: AssetId) -> Option<Asset> {
        self.state.lock().assets.get(&asset_id).cloned()
    }

    pub fn asset_by_alias(&self, alias: &str) -> Option<Asset> {
        let state = self.state.lock();
        let asset_id = state.aliases.get(alias)?;
        state.assets.get(asset_id).cloned()
    }

    /// Every asset, in the order they were defined.
    pub fn assets(&self) -> Vec<Asset> {
        self.state.lock().assets.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().assets.is_empty()
    }

    fn insert(&self, ctx: &RequestContext, new_asset: NewAsset) -> Result<Asset, RegistryError> {
        validate_root_keys(&new_asset.root_keys, new_asset.quorum)?;
        let definition = canonical_definition(new_asset.definition.as_ref())?;
        let alias = new_asset.alias.filter(|alias| !alias.is_empty());
        let client_token = new_asset.client_token;

        let key_index = {
            let mut state = self.state.lock();

            if let Some(asset) = state.claimed(ctx, client_token.as_deref(), alias.as_deref())? {
                return Ok(asset);
            }

            let key_index = state.next_key_index;
            state.next_key_index = key_index
                .checked_add(1)
                .ok_or(RegistryError::KeyIndexExhausted)?;
            key_index
        };

        let asset_keys = DerivationPath::asset(key_index).derive_all(&new_asset.root_keys);
        let issuance_program = multisig_program(&asset_keys, new_asset.quorum);
        let asset_id = compute_asset_id(
            issuance_program.as_ref(),
            self.config.initial_block_hash,
            self.config.vm_version,
            asset_definition_hash(&definition),
        );

        let asset = Asset {
            asset_id,
            alias,
            issuance_program,
            signer: Signer {
                root_keys: new_asset.root_keys,
                quorum: new_asset.quorum,
                key_index,
            },
            initial_block_hash: self.config.initial_block_hash,
            vm_version: self.config.vm_version,
            definition: definition.into(),
            tags: new_asset.tags,
            is_local: true,
        };

        let mut state = self.state.lock();

        // Another define may have taken the alias or token while the keys were derived.
        if let Some(existing) =
            state.claimed(ctx, client_token.as_deref(), asset.alias.as_deref())?
        {
            return Ok(existing);
        }

        if let Some(alias) = &asset.alias {
            state.aliases.insert(alias.clone(), asset_id);
        }
        if let Some(token) = client_token {
            state.client_tokens.insert(token, asset_id);
        }
        state.assets.insert(asset_id, asset.clone());

        debug!(
            request_id = %ctx.request_id(),
            asset_id = %asset_id,
            alias = ?asset.alias,
            key_index,
            "defined asset"
        );

        Ok(asset)
    }
}

impl RegistryState {
    /// The asset already created with this client token, or an error if the alias is taken.
    fn claimed(
        &self,
        ctx: &RequestContext,
        client_token: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Option<Asset>, RegistryError> {
        if let Some(asset) = client_token
            .and_then(|token| self.client_tokens.get(token))
            .and_then(|asset_id| self.assets.get(asset_id))
        {
            debug!(
                request_id = %ctx.request_id(),
                asset_id = %asset.asset_id,
                "client token already used, returning existing asset"
            );
            return Ok(Some(asset.clone()));
        }

        if let Some(alias) = alias {
            if self.aliases.contains_key(alias) {
                return Err(RegistryError::DuplicateAlias(alias.to_string()));
            }
        }

        Ok(None)
    }
}

impl AssetRegistry for MemoryAssetRegistry {
    async fn define(
        &self,
        ctx: &RequestContext,
        new_asset: NewAsset,
    ) -> Result<Asset, RegistryError> {
        self.insert(ctx, new_asset)
    }
}

fn validate_root_keys(root_keys: &[PublicKey], quorum: u32) -> Result<(), RegistryError> {
    if root_keys.is_empty() {
        return Err(RegistryError::NoRootKeys);
    }

    if quorum == 0 || quorum as usize > root_keys.len() {
        return Err(RegistryError::BadQuorum {
            quorum,
            keys: root_keys.len(),
        });
    }

    let mut seen = HashSet::new();
    for (index, root_key) in root_keys.iter().enumerate() {
        if !seen.insert(root_key) {
            return Err(RegistryError::DuplicateRootKey(index));
        }
    }

    Ok(())
}
