use chain_sdk_types::DEFAULT_VM_VERSION;
use chia_protocol::Bytes32;
use hex_literal::hex;
use serde::Deserialize;

/// The network values every asset defined by a registry is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    #[serde(with = "hex_string_to_bytes32")]
    pub initial_block_hash: Bytes32,
    #[serde(default = "default_vm_version")]
    pub vm_version: u64,
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_block_hash: Bytes32::new(hex!(
                "a9b1c0d4b3f65e4c8ae9b1bb33d7d2dcb4fc8b4a5ff3fe5e5c0a2c3e1b5f9d01"
            )),
            vm_version: DEFAULT_VM_VERSION,
        }
    }
}

fn default_vm_version() -> u64 {
    DEFAULT_VM_VERSION
}

mod hex_string_to_bytes32 {
    use chia_protocol::Bytes32;
    use hex::FromHex;
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Bytes32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: &str = Deserialize::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = <[u8; 32]>::from_hex(s).map_err(serde::de::Error::custom)?;
        Ok(Bytes32::new(bytes))
    }
}
