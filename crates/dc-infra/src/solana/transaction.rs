//! Legacy transaction message compilation and wire serialization.
//!
//! Message layout: header `[required_signatures, readonly_signed,
//! readonly_unsigned]`, compact-u16 counted account keys, recent blockhash,
//! then compact-u16 counted instructions of `(program index, account
//! indices, data)`. Keys are ordered writable signers, readonly signers,
//! writable non-signers, readonly non-signers, with the fee payer first.

use dc_core::program::ProgramRequest;
use dc_core::Address;
use thiserror::Error;

pub const SIGNATURE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("request requires a signature from {0}, which is not the fee payer")]
    MissingSigner(Address),

    #[error("too many accounts in one transaction: {0}")]
    TooManyAccounts(usize),
}

#[derive(Debug, Clone, Copy)]
struct KeyFlags {
    address: Address,
    is_signer: bool,
    is_writable: bool,
}

fn collect_keys(payer: &Address, request: &ProgramRequest) -> Vec<KeyFlags> {
    let mut keys = vec![KeyFlags {
        address: *payer,
        is_signer: true,
        is_writable: true,
    }];
    let metas = request
        .accounts
        .iter()
        .map(|meta| (meta.address, meta.is_signer, meta.is_writable))
        .chain(std::iter::once((request.program_id, false, false)));

    for (address, is_signer, is_writable) in metas {
        match keys.iter_mut().find(|key| key.address == address) {
            Some(key) => {
                key.is_signer |= is_signer;
                key.is_writable |= is_writable;
            }
            None => keys.push(KeyFlags {
                address,
                is_signer,
                is_writable,
            }),
        }
    }

    // Stable sort keeps the payer first among writable signers.
    keys.sort_by_key(|key| match (key.is_signer, key.is_writable) {
        (true, true) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    });
    keys
}

/// Compiles a single-instruction legacy message paid and signed by `payer`.
pub fn compile_message(
    payer: &Address,
    request: &ProgramRequest,
    recent_blockhash: [u8; 32],
) -> Result<Vec<u8>, TransactionError> {
    if let Some(meta) = request
        .accounts
        .iter()
        .find(|meta| meta.is_signer && meta.address != *payer)
    {
        return Err(TransactionError::MissingSigner(meta.address));
    }

    let keys = collect_keys(payer, request);
    if keys.len() > u8::MAX as usize {
        return Err(TransactionError::TooManyAccounts(keys.len()));
    }
    let index_of = |address: &Address| {
        keys.iter()
            .position(|key| key.address == *address)
            .map(|index| index as u8)
    };

    let required_signatures = keys.iter().filter(|key| key.is_signer).count() as u8;
    let readonly_signed = keys
        .iter()
        .filter(|key| key.is_signer && !key.is_writable)
        .count() as u8;
    let readonly_unsigned = keys
        .iter()
        .filter(|key| !key.is_signer && !key.is_writable)
        .count() as u8;

    let mut message = vec![required_signatures, readonly_signed, readonly_unsigned];
    put_compact_u16(&mut message, keys.len());
    for key in &keys {
        message.extend_from_slice(key.address.as_bytes());
    }
    message.extend_from_slice(&recent_blockhash);

    // One instruction.
    put_compact_u16(&mut message, 1);
    message.push(index_of(&request.program_id).unwrap_or_default());
    put_compact_u16(&mut message, request.accounts.len());
    for meta in &request.accounts {
        message.push(index_of(&meta.address).unwrap_or_default());
    }
    let data = request.data();
    put_compact_u16(&mut message, data.len());
    message.extend_from_slice(&data);

    Ok(message)
}

/// Wire transaction: compact-u16 signature count, signatures, message.
pub fn serialize_transaction(signatures: &[[u8; SIGNATURE_LEN]], message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + signatures.len() * SIGNATURE_LEN + message.len());
    put_compact_u16(&mut out, signatures.len());
    for signature in signatures {
        out.extend_from_slice(signature);
    }
    out.extend_from_slice(message);
    out
}

fn put_compact_u16(out: &mut Vec<u8>, value: usize) {
    let mut rem = value as u16;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(byte);
            return;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::program::SYSTEM_PROGRAM_ID;
    use dc_core::FileHash;

    const PROGRAM: Address = Address::new([7u8; 32]);
    const USER: Address = Address::new([1u8; 32]);
    const STORAGE: Address = Address::new([2u8; 32]);
    const FILE: Address = Address::new([3u8; 32]);

    fn compact(value: usize) -> Vec<u8> {
        let mut out = Vec::new();
        put_compact_u16(&mut out, value);
        out
    }

    #[test]
    fn test_compact_u16_encoding() {
        assert_eq!(compact(0), vec![0x00]);
        assert_eq!(compact(0x7f), vec![0x7f]);
        assert_eq!(compact(0x80), vec![0x80, 0x01]);
        assert_eq!(compact(0x3fff), vec![0xff, 0x7f]);
        assert_eq!(compact(0x4000), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_initialize_message_layout() {
        let request = ProgramRequest::initialize_storage(PROGRAM, USER, STORAGE);
        let message = compile_message(&USER, &request, [9u8; 32]).unwrap();

        // One signer, no readonly signers, system program and program id readonly.
        assert_eq!(&message[..3], &[1, 0, 2]);
        assert_eq!(message[3], 4);
        let keys: Vec<&[u8]> = message[4..4 + 4 * 32].chunks(32).collect();
        assert_eq!(keys[0], USER.as_bytes());
        assert_eq!(keys[1], STORAGE.as_bytes());
        assert_eq!(keys[2], SYSTEM_PROGRAM_ID.as_bytes());
        assert_eq!(keys[3], PROGRAM.as_bytes());

        let rest = &message[4 + 4 * 32..];
        assert_eq!(&rest[..32], &[9u8; 32]);
        // instruction count, program index, 3 account indices
        assert_eq!(&rest[32..37], &[1, 3, 3, 0, 1]);
        assert_eq!(rest[37], 2);
        assert_eq!(rest[38] as usize, request.data().len());
        assert_eq!(&rest[39..], request.data().as_slice());
    }

    #[test]
    fn test_duplicate_keys_are_merged() {
        let request = ProgramRequest::download_file(PROGRAM, USER, FILE, FileHash::new("h").unwrap());
        let message = compile_message(&USER, &request, [0u8; 32]).unwrap();
        // payer, file, program
        assert_eq!(message[3], 3);
        assert_eq!(&message[..3], &[1, 0, 1]);
    }

    #[test]
    fn test_foreign_signer_is_rejected() {
        let request = ProgramRequest::delete_file(PROGRAM, USER, STORAGE, FILE);
        let other_payer = Address::new([5u8; 32]);
        assert_eq!(
            compile_message(&other_payer, &request, [0u8; 32]),
            Err(TransactionError::MissingSigner(USER))
        );
    }

    #[test]
    fn test_serialize_prefixes_signatures() {
        let wire = serialize_transaction(&[[4u8; SIGNATURE_LEN]], &[1, 2, 3]);
        assert_eq!(wire[0], 1);
        assert_eq!(&wire[1..65], &[4u8; 64]);
        assert_eq!(&wire[65..], &[1, 2, 3]);
    }
}
