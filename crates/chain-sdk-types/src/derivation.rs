use chia_bls::{DerivableKey, PublicKey};
use chia_protocol::Bytes;

use crate::ASSET_KEY_SPACE;

/// A sequence of unhardened derivation indices applied to a root key.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// The path of the signing keys for the asset with the given key index.
    pub fn asset(key_index: u32) -> Self {
        Self(vec![ASSET_KEY_SPACE, key_index])
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Derives the child of a root key along this path.
    pub fn derive(&self, root_key: &PublicKey) -> PublicKey {
        self.0
            .iter()
            .fold(*root_key, |key, &index| key.derive_unhardened(index))
    }

    /// Derives the child of each root key, preserving order.
    pub fn derive_all(&self, root_keys: &[PublicKey]) -> Vec<PublicKey> {
        root_keys.iter().map(|key| self.derive(key)).collect()
    }

    /// Each index as a 4 byte big-endian string, which is how paths are reported to clients.
    pub fn to_bytes_list(&self) -> Vec<Bytes> {
        self.0
            .iter()
            .map(|index| Bytes::new(index.to_be_bytes().to_vec()))
            .collect()
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

#[cfg(test)]
mod tests {
    use chia_bls::SecretKey;

    use super::*;

    fn root_key() -> PublicKey {
        SecretKey::from_seed(&[1; 32]).public_key()
    }

    #[test]
    fn test_asset_path() {
        let path = DerivationPath::asset(7);
        assert_eq!(path.indices(), [ASSET_KEY_SPACE, 7]);
        assert_eq!(
            path.to_bytes_list(),
            vec![Bytes::new(vec![0, 0, 0, 0]), Bytes::new(vec![0, 0, 0, 7])]
        );
    }

    #[test]
    fn test_derive_follows_each_index() {
        let root = root_key();
        let path = DerivationPath::asset(3);

        let expected = root.derive_unhardened(ASSET_KEY_SPACE).derive_unhardened(3);
        assert_eq!(path.derive(&root), expected);
        assert_ne!(path.derive(&root), root);
    }

    #[test]
    fn test_empty_path_is_identity() {
        let root = root_key();
        assert_eq!(DerivationPath::default().derive(&root), root);
    }

    #[test]
    fn test_key_indices_are_distinct() {
        let root = root_key();
        assert_ne!(
            DerivationPath::asset(0).derive(&root),
            DerivationPath::asset(1).derive(&root)
        );
    }

    #[test]
    fn test_derive_all_preserves_order() {
        let roots = [root_key(), SecretKey::from_seed(&[2; 32]).public_key()];
        let path = DerivationPath::asset(0);
        assert_eq!(
            path.derive_all(&roots),
            vec![path.derive(&roots[0]), path.derive(&roots[1])]
        );
    }
}
