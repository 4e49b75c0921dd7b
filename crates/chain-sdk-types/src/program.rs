use chain_sdk_encoding::put_uvarint;
use chia_bls::PublicKey;
use chia_protocol::Bytes;

use crate::PUBLIC_KEY_LEN;

/// Opcode of an issuance program that requires `quorum` of the listed keys to sign.
pub const OP_MULTISIG: u8 = 0x01;

/// Builds the issuance program for a set of signing keys.
///
/// Layout: `OP_MULTISIG || varint(quorum) || varint(key count) || keys`.
pub fn multisig_program(keys: &[PublicKey], quorum: u32) -> Bytes {
    let mut program = Vec::with_capacity(1 + 2 * 10 + keys.len() * PUBLIC_KEY_LEN);
    program.push(OP_MULTISIG);
    put_uvarint(&mut program, u64::from(quorum));
    put_uvarint(&mut program, keys.len() as u64);
    for key in keys {
        program.extend_from_slice(&key.to_bytes());
    }
    Bytes::new(program)
}
