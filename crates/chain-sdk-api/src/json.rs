use crate::{CreateAssetRequest, CreateAssetResponse};

/// Parses a JSON array of create asset requests.
pub fn requests_from_json(json: &str) -> Result<Vec<CreateAssetRequest>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serializes the responses of a batch as a JSON array, in order.
pub fn responses_to_json(responses: &[CreateAssetResponse]) -> Result<String, serde_json::Error> {
    serde_json::to_string(responses)
}

pub(crate) mod hex_bytes {
    use chia_protocol::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Ok(bytes.into())
    }
}

pub(crate) mod hex_bytes_list {
    use chia_protocol::Bytes;
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(items: &[Bytes], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&hex::encode(item))?;
        }
        seq.end()
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Bytes>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|s| {
                hex::decode(s)
                    .map(Bytes::from)
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

pub(crate) mod hex_asset_id {
    use chain_sdk_types::AssetId;
    use hex::FromHex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(asset_id: &AssetId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(asset_id.to_bytes()))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<AssetId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = <[u8; 32]>::from_hex(s).map_err(serde::de::Error::custom)?;
        Ok(AssetId::from_bytes(bytes))
    }
}

/// Embeds stored JSON text as is. Absent or empty text is `null`.
pub(crate) mod raw_json {
    use chia_protocol::Bytes;
    use serde::{ser::Error, Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::value::RawValue;

    pub(crate) fn serialize<S>(value: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Some(bytes) = value.as_ref().filter(|bytes| !bytes.is_empty()) else {
            return serializer.serialize_none();
        };

        let text = std::str::from_utf8(bytes.as_ref()).map_err(S::Error::custom)?;
        let raw: &RawValue = serde_json::from_str(text).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Box<RawValue>>::deserialize(deserializer)?;
        Ok(raw.map(|raw| Bytes::from(raw.get().as_bytes().to_vec())))
    }
}

/// Writes `true` as `"yes"` and `false` as `"no"`. Any text other than `"yes"` reads as `false`.
pub(crate) mod yes {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(crate) fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(text == "yes")
    }
}

#[cfg(test)]
mod tests {
    use chain_sdk_types::AssetId;
    use chia_protocol::Bytes;

    use crate::{ApiError, AssetKey, AssetPayload};

    use super::*;

    fn payload() -> AssetPayload {
        AssetPayload {
            id: AssetId::from_bytes([0xab; 32]),
            alias: "gold".to_string(),
            issuance_program: Bytes::from(vec![0x01, 0x01]),
            keys: vec![AssetKey {
                root_xpub: Bytes::from(vec![0x0a]),
                asset_pubkey: Bytes::from(vec![0x0b]),
                asset_derivation_path: vec![
                    Bytes::from(vec![0, 0, 0, 0]),
                    Bytes::from(vec![0, 0, 0, 7]),
                ],
            }],
            quorum: 1,
            definition: Some(Bytes::from(br#"{ "type" :"metal" }"#.to_vec())),
            tags: None,
            is_local: true,
        }
    }

    #[test]
    fn test_asset_layout() -> anyhow::Result<()> {
        let json = responses_to_json(&[CreateAssetResponse::Asset(payload())])?;

        let expected = format!(
            concat!(
                r#"[{{"asset":{{"id":"{}","alias":"gold","issuance_program":"0101","#,
                r#""keys":[{{"root_xpub":"0a","asset_pubkey":"0b","#,
                r#""asset_derivation_path":["00000000","00000007"]}}],"#,
                r#""quorum":1,"definition":{{ "type" :"metal" }},"tags":null,"is_local":"yes"}}}}]"#
            ),
            "ab".repeat(32)
        );
        assert_eq!(json, expected);

        Ok(())
    }

    #[test]
    fn test_error_layout() -> anyhow::Result<()> {
        let json = responses_to_json(&[CreateAssetResponse::Error(ApiError::bad_request(
            "no root keys",
        ))])?;
        assert_eq!(
            json,
            r#"[{"error":{"code":"BAD_REQUEST","message":"no root keys"}}]"#
        );
        Ok(())
    }

    #[test]
    fn test_is_local_sentinel() -> anyhow::Result<()> {
        let json = serde_json::to_string(&payload())?;

        for (text, expected) in [("yes", true), ("no", false), ("true", false), ("YES", false)] {
            let json = json.replace(r#""is_local":"yes""#, &format!(r#""is_local":"{text}""#));
            let payload: AssetPayload = serde_json::from_str(&json)?;
            assert_eq!(payload.is_local, expected, "{text}");
        }

        let mut remote = payload();
        remote.is_local = false;
        assert!(serde_json::to_string(&remote)?.ends_with(r#""is_local":"no"}"#));

        Ok(())
    }

    #[test]
    fn test_payload_roundtrip() -> anyhow::Result<()> {
        let json = serde_json::to_string(&payload())?;
        let decoded: AssetPayload = serde_json::from_str(&json)?;

        assert_eq!(decoded, payload());

        Ok(())
    }

    #[test]
    fn test_requests_from_json() -> anyhow::Result<()> {
        let requests = requests_from_json(
            r#"[
                {
                    "root_xpubs": ["0a0b"],
                    "quorum": 1,
                    "definition": {"type": "metal"},
                    "alias": "gold",
                    "client_token": "abc"
                },
                { "quorum": -1, "tags": null }
            ]"#,
        )?;

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].root_xpubs, [Bytes::from(vec![0x0a, 0x0b])]);
        assert_eq!(
            requests[0].definition,
            Some(Bytes::from(br#"{"type": "metal"}"#.to_vec()))
        );
        assert_eq!(requests[0].alias.as_deref(), Some("gold"));
        assert_eq!(requests[0].tags, None);
        assert_eq!(requests[0].client_token.as_deref(), Some("abc"));

        assert!(requests[1].root_xpubs.is_empty());
        assert_eq!(requests[1].quorum, -1);
        assert_eq!(requests[1].tags, None);

        assert!(requests_from_json(r#"[{ "root_xpubs": ["zz"] }]"#).is_err());

        Ok(())
    }
}
