use std::fmt;

use chain_sdk_encoding::put_uvarint;
use chia_protocol::Bytes32;
use chia_sha2::Sha256;

/// The 32 byte identifier of an asset.
///
/// Asset ids are derived with [`compute_asset_id`], so two assets with the same issuance
/// program, initial block, VM version and definition always share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(Bytes32);

impl AssetId {
    /// Wraps raw bytes read off the wire. The result is not checked against anything.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Bytes32::new(bytes))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl From<AssetId> for Bytes32 {
    fn from(asset_id: AssetId) -> Self {
        asset_id.0
    }
}

impl AsRef<[u8]> for AssetId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Computes the id of an asset from the values that define it.
///
/// The hashed pre-image is `varstr31(issuance_program) || initial_block ||
/// varint63(vm_version) || definition_hash`.
pub fn compute_asset_id(
    issuance_program: &[u8],
    initial_block: Bytes32,
    vm_version: u64,
    definition_hash: Bytes32,
) -> AssetId {
    let mut preimage = Vec::with_capacity(issuance_program.len() + 84);
    put_uvarint(&mut preimage, issuance_program.len() as u64);
    preimage.extend_from_slice(issuance_program);
    preimage.extend_from_slice(initial_block.as_ref());
    put_uvarint(&mut preimage, vm_version);
    preimage.extend_from_slice(definition_hash.as_ref());

    AssetId(sha256(&preimage))
}

/// Hashes the serialized asset definition. An empty definition hashes the empty string.
pub fn asset_definition_hash(definition: &[u8]) -> Bytes32 {
    sha256(definition)
}

fn sha256(bytes: &[u8]) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Bytes32::from(hasher.finalize())
}
