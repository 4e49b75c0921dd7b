use std::io::{Read, Write};

use chain_sdk_encoding::{
    read_bytes32, read_varint31, read_varint63, read_varstr31, read_varstr_list, write_varint31,
    write_varint63, write_varstr31, write_varstr_list, EncodingError, Staged,
};
use chia_bls::PublicKey;
use chia_protocol::{Bytes, Bytes32};

use crate::{
    asset_definition_hash, compute_asset_id, multisig_program, parse_public_key, AssetId,
    DerivationPath, InputError, ASSET_VERSION, PUBLIC_KEY_LEN,
};

/// Authorizes an issuance by revealing an arbitrary issuance program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramWitness {
    pub initial_block: Bytes32,
    pub asset_definition: Bytes,
    pub vm_version: u64,
    pub issuance_program: Bytes,
    pub arguments: Vec<Bytes>,
}

impl ProgramWitness {
    pub fn asset_id(&self) -> AssetId {
        compute_asset_id(
            self.issuance_program.as_ref(),
            self.initial_block,
            self.vm_version,
            asset_definition_hash(self.asset_definition.as_ref()),
        )
    }

    fn read(reader: &mut impl Read) -> Result<Self, InputError> {
        let (initial_block, asset_definition, vm_version) = read_asset_fields(reader)?;
        let issuance_program = read_varstr31(reader).stage("reading issuance program")?;
        let arguments = read_varstr_list(reader).stage("reading arguments")?;

        Ok(Self {
            initial_block,
            asset_definition,
            vm_version,
            issuance_program: issuance_program.into(),
            arguments: arguments.into_iter().map(Bytes::from).collect(),
        })
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), EncodingError> {
        write_asset_fields(
            writer,
            self.initial_block,
            &self.asset_definition,
            self.vm_version,
        )?;
        write_varstr31(writer, self.issuance_program.as_ref())?;
        write_varstr_list(writer, &self.arguments)
    }
}

/// Authorizes an issuance with signatures from keys derived from a set of root keys.
///
/// The issuance program is not stored. It is the multisig program over the root keys
/// derived along `derivation_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysWitness {
    pub initial_block: Bytes32,
    pub asset_definition: Bytes,
    pub vm_version: u64,
    pub root_keys: Vec<PublicKey>,
    pub quorum: u32,
    pub derivation_path: DerivationPath,
    pub signatures: Vec<Bytes>,
}

impl KeysWitness {
    /// The signing keys, derived from each root key.
    pub fn derived_keys(&self) -> Vec<PublicKey> {
        self.derivation_path.derive_all(&self.root_keys)
    }

    pub fn issuance_program(&self) -> Bytes {
        multisig_program(&self.derived_keys(), self.quorum)
    }

    pub fn asset_id(&self) -> AssetId {
        compute_asset_id(
            self.issuance_program().as_ref(),
            self.initial_block,
            self.vm_version,
            asset_definition_hash(self.asset_definition.as_ref()),
        )
    }

    fn read(reader: &mut impl Read) -> Result<Self, InputError> {
        let (initial_block, asset_definition, vm_version) = read_asset_fields(reader)?;
        let quorum = read_varint31(reader).stage("reading quorum")?;

        let key_count = read_varint31(reader).stage("reading root keys")?;
        let mut root_keys = Vec::new();
        for _ in 0..key_count {
            let mut bytes = [0; PUBLIC_KEY_LEN];
            reader.read_exact(&mut bytes).stage("reading root keys")?;
            let key = parse_public_key(&bytes).map_err(|source| InputError::InvalidKey {
                index: root_keys.len(),
                source,
            })?;
            root_keys.push(key);
        }

        let path_len = read_varint31(reader).stage("reading derivation path")?;
        let mut indices = Vec::new();
        for _ in 0..path_len {
            let index = read_varint63(reader).stage("reading derivation path")?;
            let index = u32::try_from(index)
                .map_err(|_| EncodingError::Overflow.stage("reading derivation path"))?;
            indices.push(index);
        }

        let signatures = read_varstr_list(reader).stage("reading signatures")?;

        Ok(Self {
            initial_block,
            asset_definition,
            vm_version,
            root_keys,
            quorum,
            derivation_path: indices.into(),
            signatures: signatures.into_iter().map(Bytes::from).collect(),
        })
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), EncodingError> {
        write_asset_fields(
            writer,
            self.initial_block,
            &self.asset_definition,
            self.vm_version,
        )?;
        write_varint31(writer, u64::from(self.quorum))?;

        write_varint31(writer, self.root_keys.len() as u64)?;
        for key in &self.root_keys {
            writer.write_all(&key.to_bytes())?;
        }

        let indices = self.derivation_path.indices();
        write_varint31(writer, indices.len() as u64)?;
        for &index in indices {
            write_varint63(writer, u64::from(index))?;
        }

        write_varstr_list(writer, &self.signatures)
    }
}

/// The witness half of an issuance input. Exactly one kind of witness is present, and it
/// determines both the wire grammar and how the asset id is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuanceWitness {
    Program(ProgramWitness),
    Keys(KeysWitness),
}

impl IssuanceWitness {
    pub const PROGRAM_KIND: u64 = 0;
    pub const KEYS_KIND: u64 = 1;

    pub fn kind(&self) -> u64 {
        match self {
            Self::Program(_) => Self::PROGRAM_KIND,
            Self::Keys(_) => Self::KEYS_KIND,
        }
    }

    pub fn initial_block(&self) -> Bytes32 {
        match self {
            Self::Program(witness) => witness.initial_block,
            Self::Keys(witness) => witness.initial_block,
        }
    }

    pub fn asset_definition(&self) -> &[u8] {
        match self {
            Self::Program(witness) => witness.asset_definition.as_ref(),
            Self::Keys(witness) => witness.asset_definition.as_ref(),
        }
    }

    pub fn asset_definition_hash(&self) -> Bytes32 {
        asset_definition_hash(self.asset_definition())
    }

    pub fn vm_version(&self) -> u64 {
        match self {
            Self::Program(witness) => witness.vm_version,
            Self::Keys(witness) => witness.vm_version,
        }
    }

    pub fn issuance_program(&self) -> Bytes {
        match self {
            Self::Program(witness) => witness.issuance_program.clone(),
            Self::Keys(witness) => witness.issuance_program(),
        }
    }

    pub fn asset_id(&self) -> AssetId {
        match self {
            Self::Program(witness) => witness.asset_id(),
            Self::Keys(witness) => witness.asset_id(),
        }
    }

    /// Reads a witness in the grammar of the given asset version.
    pub fn read(reader: &mut impl Read, asset_version: u64) -> Result<Self, InputError> {
        if asset_version != ASSET_VERSION {
            return Err(InputError::UnsupportedAssetVersion(asset_version));
        }

        match read_varint63(reader).stage("reading witness kind")? {
            Self::PROGRAM_KIND => Ok(Self::Program(ProgramWitness::read(reader)?)),
            Self::KEYS_KIND => Ok(Self::Keys(KeysWitness::read(reader)?)),
            kind => Err(InputError::UnknownWitnessKind(kind)),
        }
    }

    pub fn write(&self, writer: &mut impl Write, asset_version: u64) -> Result<(), InputError> {
        if asset_version != ASSET_VERSION {
            return Err(InputError::UnsupportedAssetVersion(asset_version));
        }

        write_varint63(writer, self.kind())?;
        match self {
            Self::Program(witness) => witness.write(writer)?,
            Self::Keys(witness) => witness.write(writer)?,
        }
        Ok(())
    }
}

impl From<ProgramWitness> for IssuanceWitness {
    fn from(witness: ProgramWitness) -> Self {
        Self::Program(witness)
    }
}

impl From<KeysWitness> for IssuanceWitness {
    fn from(witness: KeysWitness) -> Self {
        Self::Keys(witness)
    }
}

fn read_asset_fields(reader: &mut impl Read) -> Result<(Bytes32, Bytes, u64), EncodingError> {
    let initial_block = read_bytes32(reader).stage("reading initial block")?;
    let asset_definition = read_varstr31(reader).stage("reading asset definition")?;
    let vm_version = read_varint63(reader).stage("reading vm version")?;
    Ok((initial_block.into(), asset_definition.into(), vm_version))
}

fn write_asset_fields(
    writer: &mut impl Write,
    initial_block: Bytes32,
    asset_definition: &Bytes,
    vm_version: u64,
) -> Result<(), EncodingError> {
    writer.write_all(initial_block.as_ref())?;
    write_varstr31(writer, asset_definition.as_ref())?;
    write_varint63(writer, vm_version)
}
