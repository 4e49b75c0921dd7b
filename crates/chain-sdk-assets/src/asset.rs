use chain_sdk_types::{AssetId, DerivationPath, KeysWitness};
use chia_bls::PublicKey;
use chia_protocol::{Bytes, Bytes32};

use crate::Document;

/// The keys that control issuance of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub root_keys: Vec<PublicKey>,
    pub quorum: u32,
    pub key_index: u32,
}

impl Signer {
    pub fn derivation_path(&self) -> DerivationPath {
        DerivationPath::asset(self.key_index)
    }

    /// The asset specific key derived from each root key, in the same order.
    pub fn asset_keys(&self) -> Vec<PublicKey> {
        self.derivation_path().derive_all(&self.root_keys)
    }
}

/// A root key along with the key derived from it for a specific asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerKey {
    pub root_key: PublicKey,
    pub asset_key: PublicKey,
    pub derivation_path: DerivationPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub asset_id: AssetId,
    pub alias: Option<String>,
    pub issuance_program: Bytes,
    pub signer: Signer,
    pub initial_block_hash: Bytes32,
    pub vm_version: u64,
    /// The canonical serialization of the definition, which is what the asset id commits to.
    pub definition: Bytes,
    pub tags: Option<Document>,
    pub is_local: bool,
}

impl Asset {
    pub fn signer_keys(&self) -> Vec<SignerKey> {
        let derivation_path = self.signer.derivation_path();
        self.signer
            .root_keys
            .iter()
            .map(|root_key| SignerKey {
                root_key: *root_key,
                asset_key: derivation_path.derive(root_key),
                derivation_path: derivation_path.clone(),
            })
            .collect()
    }

    /// An unsigned witness for issuing this asset. Its asset id is the id of this asset.
    pub fn issuance_witness(&self) -> KeysWitness {
        KeysWitness {
            initial_block: self.initial_block_hash,
            asset_definition: self.definition.clone(),
            vm_version: self.vm_version,
            root_keys: self.signer.root_keys.clone(),
            quorum: self.signer.quorum,
            derivation_path: self.signer.derivation_path(),
            signatures: Vec::new(),
        }
    }
}
