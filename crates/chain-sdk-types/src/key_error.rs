use chia_bls::PublicKey;
use thiserror::Error;

/// The length of a compressed public key.
pub const PUBLIC_KEY_LEN: usize = 48;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("expected a {PUBLIC_KEY_LEN} byte public key, found {0} bytes")]
    WrongLength(usize),

    #[error("invalid public key: {0}")]
    Bls(#[from] chia_bls::Error),
}

/// Parses a compressed public key.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    let bytes: &[u8; PUBLIC_KEY_LEN] = bytes
        .try_into()
        .map_err(|_| KeyError::WrongLength(bytes.len()))?;
    Ok(PublicKey::from_bytes(bytes)?)
}

/// Parses a list of compressed public keys, stopping at the first invalid one.
pub fn parse_public_keys<T>(items: &[T]) -> Result<Vec<PublicKey>, KeyError>
where
    T: AsRef<[u8]>,
{
    items
        .iter()
        .map(|item| parse_public_key(item.as_ref()))
        .collect()
}
