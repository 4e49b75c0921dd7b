use bip39::Mnemonic;
use chia_bls::{PublicKey, SecretKey};
use chia_protocol::Bytes;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A deterministic BLS key pair, usable as the root key of an asset signer.
#[derive(Debug, Clone)]
pub struct BlsPair {
    pub sk: SecretKey,
    pub pk: PublicKey,
}

impl Default for BlsPair {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlsPair {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let entropy: [u8; 32] = rng.gen();
        let mnemonic =
            Mnemonic::from_entropy(&entropy).expect("32 bytes is a valid entropy length");
        let seed = mnemonic.to_seed("");
        let sk = SecretKey::from_seed(&seed);
        let pk = sk.public_key();
        Self { sk, pk }
    }

    /// The compressed public key, as it is sent in a create asset request.
    pub fn root_xpub(&self) -> Bytes {
        Bytes::from(self.pk.to_bytes().to_vec())
    }

    pub fn range<const N: usize>() -> [Self; N] {
        Self::range_with_seed(0)
    }

    pub fn range_with_seed<const N: usize>(seed: u64) -> [Self; N] {
        std::array::from_fn(|i| Self::new(seed + i as u64))
    }

    pub fn range_vec(length: usize) -> Vec<Self> {
        Self::range_vec_with_seed(0, length)
    }

    pub fn range_vec_with_seed(seed: u64, length: usize) -> Vec<Self> {
        (0..length).map(|i| Self::new(seed + i as u64)).collect()
    }
}
