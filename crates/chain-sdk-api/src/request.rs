use chia_protocol::Bytes;
use serde::Deserialize;

use crate::json::{hex_bytes_list, raw_json};

/// A request to create a single asset.
///
/// `definition` and `tags` hold the JSON exactly as it was submitted, so that a successful
/// response can echo it back unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAssetRequest {
    #[serde(default, with = "hex_bytes_list")]
    pub root_xpubs: Vec<Bytes>,
    #[serde(default)]
    pub quorum: i32,
    #[serde(default, with = "raw_json")]
    pub definition: Option<Bytes>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, with = "raw_json")]
    pub tags: Option<Bytes>,
    #[serde(default)]
    pub client_token: Option<String>,
}
