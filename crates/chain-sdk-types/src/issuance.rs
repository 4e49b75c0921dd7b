use std::io::{Read, Write};

use chain_sdk_encoding::{
    read_bytes32, read_varint63, read_varstr31, write_varint63, write_varstr31, EncodingError,
    Staged,
};
use chia_protocol::Bytes;

use crate::{AssetId, InputError, IssuanceWitness};

/// Selects which parts of a transaction are present in its serialization.
///
/// Only the convention where every part is present is supported. With it the asset id is
/// written explicitly in the commitment, and must agree with the one computed from the witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializationFlags(u8);

impl SerializationFlags {
    pub const ALL: Self = Self(0x07);

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn ensure_supported(self) -> Result<(), InputError> {
        if self == Self::ALL {
            Ok(())
        } else {
            Err(InputError::UnsupportedSerializationFlags(self.0))
        }
    }
}

impl Default for SerializationFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// The commitment half of an issuance input, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceCommitment {
    pub nonce: Bytes,
    pub asset_id: AssetId,
    pub amount: u64,
}

impl IssuanceCommitment {
    /// Reads `nonce: varstr31 || asset_id: 32 bytes || amount: varint63`.
    pub fn read(reader: &mut impl Read) -> Result<Self, EncodingError> {
        let nonce = read_varstr31(reader).stage("reading nonce")?;
        let asset_id = read_bytes32(reader).stage("reading asset id")?;
        let amount = read_varint63(reader).stage("reading amount")?;

        Ok(Self {
            nonce: nonce.into(),
            asset_id: AssetId::from_bytes(asset_id),
            amount,
        })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<(), EncodingError> {
        write_varstr31(writer, self.nonce.as_ref()).stage("writing nonce")?;
        writer
            .write_all(self.asset_id.as_ref())
            .stage("writing asset id")?;
        write_varint63(writer, self.amount).stage("writing amount")
    }
}

/// A transaction input that creates new units of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceInput {
    pub nonce: Bytes,
    pub amount: u64,
    pub witness: IssuanceWitness,
}

impl IssuanceInput {
    pub fn new(nonce: Bytes, amount: u64, witness: impl Into<IssuanceWitness>) -> Self {
        Self {
            nonce,
            amount,
            witness: witness.into(),
        }
    }

    /// The id of the issued asset, always recomputed from the witness.
    pub fn asset_id(&self) -> AssetId {
        self.witness.asset_id()
    }

    pub fn commitment(&self) -> IssuanceCommitment {
        IssuanceCommitment {
            nonce: self.nonce.clone(),
            asset_id: self.asset_id(),
            amount: self.amount,
        }
    }

    pub fn read_commitment(reader: &mut impl Read) -> Result<IssuanceCommitment, EncodingError> {
        IssuanceCommitment::read(reader)
    }

    pub fn write_commitment(&self, writer: &mut impl Write) -> Result<(), EncodingError> {
        self.commitment().write(writer)
    }

    pub fn read_witness(
        reader: &mut impl Read,
        asset_version: u64,
    ) -> Result<IssuanceWitness, InputError> {
        IssuanceWitness::read(reader, asset_version).map_err(|error| error.stage("reading witness"))
    }

    pub fn write_witness(
        &self,
        writer: &mut impl Write,
        asset_version: u64,
    ) -> Result<(), InputError> {
        self.witness
            .write(writer, asset_version)
            .map_err(|error| error.stage("writing witness"))
    }

    /// Joins a decoded commitment with its witness, checking that they describe the same asset.
    pub fn from_parts(
        commitment: IssuanceCommitment,
        witness: IssuanceWitness,
        flags: SerializationFlags,
    ) -> Result<Self, InputError> {
        flags.ensure_supported()?;

        let computed = witness.asset_id();
        if commitment.asset_id != computed {
            return Err(InputError::AssetIdMismatch {
                committed: commitment.asset_id,
                computed,
            });
        }

        Ok(Self {
            nonce: commitment.nonce,
            amount: commitment.amount,
            witness,
        })
    }

    /// Reads the commitment followed by the witness.
    pub fn read(
        reader: &mut impl Read,
        asset_version: u64,
        flags: SerializationFlags,
    ) -> Result<Self, InputError> {
        flags.ensure_supported()?;

        let commitment =
            Self::read_commitment(reader).map_err(|error| error.stage("reading commitment"))?;
        let witness = Self::read_witness(reader, asset_version)?;
        Self::from_parts(commitment, witness, flags)
    }

    pub fn write(&self, writer: &mut impl Write, asset_version: u64) -> Result<(), InputError> {
        self.write_commitment(writer)?;
        self.write_witness(writer, asset_version)
    }

    pub fn to_bytes(&self, asset_version: u64) -> Result<Vec<u8>, InputError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes, asset_version)?;
        Ok(bytes)
    }

    /// Decodes an input that must span the entire buffer.
    pub fn from_bytes(
        bytes: &[u8],
        asset_version: u64,
        flags: SerializationFlags,
    ) -> Result<Self, InputError> {
        let mut reader = bytes;
        let input = Self::read(&mut reader, asset_version, flags)?;
        if !reader.is_empty() {
            return Err(InputError::TrailingBytes(reader.len()));
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use chia_bls::SecretKey;
    use chia_protocol::Bytes32;
    use hex_literal::hex;
    use rstest::rstest;

    use crate::{DerivationPath, KeysWitness, ProgramWitness, ASSET_VERSION};

    use super::*;

    fn program_input() -> IssuanceInput {
        IssuanceInput::new(
            Bytes::from(hex!("c0ffee").to_vec()),
            1_000,
            ProgramWitness {
                initial_block: Bytes32::new([0x11; 32]),
                asset_definition: Bytes::from(b"{\n  \"type\": \"metal\"\n}".to_vec()),
                vm_version: 1,
                issuance_program: Bytes::from(hex!("0102").to_vec()),
                arguments: vec![Bytes::from(vec![5; 3])],
            },
        )
    }

    fn keys_input() -> IssuanceInput {
        IssuanceInput::new(
            Bytes::default(),
            (1 << 63) - 1,
            KeysWitness {
                initial_block: Bytes32::new([0x33; 32]),
                asset_definition: Bytes::default(),
                vm_version: 1,
                root_keys: vec![SecretKey::from_seed(&[9; 32]).public_key()],
                quorum: 1,
                derivation_path: DerivationPath::asset(0),
                signatures: Vec::new(),
            },
        )
    }

    #[test]
    fn test_commitment_layout() -> anyhow::Result<()> {
        let input = program_input();

        let mut encoded = Vec::new();
        input.write_commitment(&mut encoded)?;

        let mut expected = hex!("03c0ffee").to_vec();
        expected.extend_from_slice(&input.asset_id().to_bytes());
        expected.extend_from_slice(&hex!("e807"));
        assert_eq!(encoded, expected);

        let mut reader = encoded.as_slice();
        let commitment = IssuanceInput::read_commitment(&mut reader)?;
        assert_eq!(commitment, input.commitment());
        assert!(reader.is_empty());

        Ok(())
    }

    #[rstest]
    #[case::program(program_input())]
    #[case::keys(keys_input())]
    fn test_roundtrip(#[case] input: IssuanceInput) -> anyhow::Result<()> {
        let encoded = input.to_bytes(ASSET_VERSION)?;
        let decoded = IssuanceInput::from_bytes(&encoded, ASSET_VERSION, SerializationFlags::ALL)?;

        assert_eq!(decoded, input);
        assert_eq!(decoded.asset_id(), input.asset_id());
        assert_eq!(decoded.to_bytes(ASSET_VERSION)?, encoded);

        Ok(())
    }

    #[rstest]
    #[case::program(program_input())]
    #[case::keys(keys_input())]
    fn test_every_prefix_is_truncated(#[case] input: IssuanceInput) -> anyhow::Result<()> {
        let encoded = input.to_bytes(ASSET_VERSION)?;

        for length in 0..encoded.len() {
            let error =
                IssuanceInput::from_bytes(&encoded[..length], ASSET_VERSION, SerializationFlags::ALL)
                    .unwrap_err();
            assert!(
                error.is_truncated(),
                "prefix of length {length} failed with {error}"
            );
        }

        Ok(())
    }

    #[test]
    fn test_truncation_names_the_field() -> anyhow::Result<()> {
        let encoded = program_input().to_bytes(ASSET_VERSION)?;

        // The nonce is 4 bytes and the asset id 32, so the amount starts at offset 36.
        let error = IssuanceInput::from_bytes(&encoded[..37], ASSET_VERSION, SerializationFlags::ALL)
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "reading commitment: reading amount: truncated input"
        );

        let error = IssuanceInput::from_bytes(&encoded[..40], ASSET_VERSION, SerializationFlags::ALL)
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "reading witness: reading initial block: truncated input"
        );

        Ok(())
    }

    #[test]
    fn test_asset_id_mismatch() -> anyhow::Result<()> {
        let input = program_input();
        let mut encoded = input.to_bytes(ASSET_VERSION)?;
        encoded[4] ^= 0xff;

        assert!(matches!(
            IssuanceInput::from_bytes(&encoded, ASSET_VERSION, SerializationFlags::ALL),
            Err(InputError::AssetIdMismatch { computed, .. }) if computed == input.asset_id()
        ));

        Ok(())
    }

    #[test]
    fn test_unsupported_flags() -> anyhow::Result<()> {
        let encoded = program_input().to_bytes(ASSET_VERSION)?;

        assert!(matches!(
            IssuanceInput::from_bytes(&encoded, ASSET_VERSION, SerializationFlags::new(0x03)),
            Err(InputError::UnsupportedSerializationFlags(0x03))
        ));

        Ok(())
    }

    #[test]
    fn test_trailing_bytes() -> anyhow::Result<()> {
        let mut encoded = keys_input().to_bytes(ASSET_VERSION)?;
        encoded.extend_from_slice(&[0, 0]);

        assert!(matches!(
            IssuanceInput::from_bytes(&encoded, ASSET_VERSION, SerializationFlags::ALL),
            Err(InputError::TrailingBytes(2))
        ));

        Ok(())
    }

    #[test]
    fn test_amount_out_of_range() {
        let mut input = keys_input();
        input.amount = 1 << 63;

        let error = input.to_bytes(ASSET_VERSION).unwrap_err();
        let InputError::Encoding(error) = error else {
            panic!("expected an encoding error");
        };
        assert!(matches!(error.root(), EncodingError::Overflow));
        assert_eq!(error.stages(), ["writing amount"]);
    }

    #[test]
    fn test_default_flags() {
        assert_eq!(SerializationFlags::default(), SerializationFlags::ALL);
        assert_eq!(SerializationFlags::ALL.bits(), 0x07);
    }
}
