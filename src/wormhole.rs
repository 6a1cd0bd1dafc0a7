//! Wormhole core bridge bindings.
//!
//! The `post_vaa` instruction body as a [`Layout`], a typed [`PostVaa`] view
//! over it, and the two bridge accounts a relayer has to find before it can
//! submit one: the guardian set and the posted VAA.
//!
//! ```rust,ignore
//! let vaa = PostVaa { guardian_set: 3, timestamp, nonce: 2, emitter_chain: 2,
//!                     emitter_address: &emitter, sequence: 245668,
//!                     consistency_level: 1, payload: &payload };
//! let data = vaa.encode()?;                       // 02 01 03 00 00 00 ..
//! let (guardian_set, _) = guardian_set_address(3, &CORE_BRIDGE_MAINNET)?;
//! let (posted, _) = posted_vaa_address(&vaa_hash, &CORE_BRIDGE_MAINNET)?;
//! ```

use pinocchio::{error::ProgramError, Address};
use pinocchio_pubkey::pubkey;
use vaakit_core::{
    deserialize, serialize_into, serialized_len, Endian, FieldSpec, Layout, LayoutError, Record,
    Value,
};

/// Core bridge program on Solana mainnet.
pub const CORE_BRIDGE_MAINNET: Address =
    Address::new_from_array(pubkey!("worm2ZoG2kUd4vFXhvjh93UUH596ayRfgQ2MgjNMTth"));

/// Instruction tag of `post_vaa`.
pub const POST_VAA_IX: u8 = 2;
/// VAA format version.
pub const VAA_VERSION: u8 = 1;

pub const GUARDIAN_SET_SEED: &[u8] = b"GuardianSet";
pub const POSTED_VAA_SEED: &[u8] = b"PostedVAA";

const POST_VAA_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("postVaaIx", 1, Endian::Little)
        .constant_uint(POST_VAA_IX as u64)
        .omit(),
    FieldSpec::uint("version", 1, Endian::Little)
        .constant_uint(VAA_VERSION as u64)
        .omit(),
    FieldSpec::uint("guardianSet", 4, Endian::Little),
    FieldSpec::uint("timestamp", 4, Endian::Little),
    FieldSpec::uint("nonce", 4, Endian::Little),
    FieldSpec::uint("emitterChain", 2, Endian::Little),
    FieldSpec::bytes("emitterAddress", 32),
    FieldSpec::uint("sequence", 8, Endian::Little),
    FieldSpec::uint("consistencyLevel", 1, Endian::Little),
    FieldSpec::var_bytes("payload", 4, Endian::Little),
];

/// `post_vaa` instruction data.
///
/// | Offset | Field | Wire |
/// |---|---|---|
/// | 0 | instruction tag | `u8` = 2 (omitted from records) |
/// | 1 | version | `u8` = 1 (omitted from records) |
/// | 2 | `guardianSet` | `u32` LE |
/// | 6 | `timestamp` | `u32` LE |
/// | 10 | `nonce` | `u32` LE |
/// | 14 | `emitterChain` | `u16` LE |
/// | 16 | `emitterAddress` | 32 bytes |
/// | 48 | `sequence` | `u64` LE |
/// | 56 | `consistencyLevel` | `u8` |
/// | 57 | `payload` | `u32` LE length, then bytes |
pub const POST_VAA_LAYOUT: Layout<'static> = Layout::new(POST_VAA_FIELDS);

// Guardian set indices are seeded big-endian, unlike everything on the wire.
const GUARDIAN_SET_INDEX_FIELDS: &[FieldSpec] = &[FieldSpec::uint("index", 4, Endian::Big)];
const GUARDIAN_SET_INDEX: Layout<'static> = Layout::new(GUARDIAN_SET_INDEX_FIELDS);

/// Typed view of a `post_vaa` instruction body. Borrows its byte fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostVaa<'a> {
    pub guardian_set: u32,
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: u16,
    pub emitter_address: &'a [u8; 32],
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: &'a [u8],
}

impl<'a> PostVaa<'a> {
    /// Field values as a [`Record`] for [`POST_VAA_LAYOUT`].
    pub fn to_record(&self) -> Result<Record<'a>, LayoutError> {
        Record::try_from_entries(&[
            ("guardianSet", Value::Uint(self.guardian_set.into())),
            ("timestamp", Value::Uint(self.timestamp.into())),
            ("nonce", Value::Uint(self.nonce.into())),
            ("emitterChain", Value::Uint(self.emitter_chain.into())),
            ("emitterAddress", Value::Bytes(self.emitter_address)),
            ("sequence", Value::Uint(self.sequence)),
            ("consistencyLevel", Value::Uint(self.consistency_level.into())),
            ("payload", Value::Bytes(self.payload)),
        ])
    }

    /// Read the typed view back out of a record.
    ///
    /// `MissingField` / `TypeMismatch` for absent or wrongly-typed fields,
    /// `ValueOutOfRange` if an integer does not fit its Rust type and
    /// `LengthMismatch` if the emitter address is not 32 bytes.
    pub fn from_record(record: &Record<'a>) -> Result<Self, LayoutError> {
        let emitter = bytes_field(record, "emitterAddress")?;
        let emitter_address = emitter
            .try_into()
            .map_err(|_| LayoutError::LengthMismatch {
                field: "emitterAddress",
                expected: 32,
                actual: emitter.len(),
            })?;
        Ok(Self {
            guardian_set: uint_field(record, "guardianSet")?,
            timestamp: uint_field(record, "timestamp")?,
            nonce: uint_field(record, "nonce")?,
            emitter_chain: uint_field(record, "emitterChain")?,
            emitter_address,
            sequence: uint_field(record, "sequence")?,
            consistency_level: uint_field(record, "consistencyLevel")?,
            payload: bytes_field(record, "payload")?,
        })
    }

    /// Wire size of this instruction body.
    pub fn encoded_len(&self) -> Result<usize, LayoutError> {
        serialized_len(&POST_VAA_LAYOUT, &self.to_record()?)
    }

    /// Write the instruction body into `out`, returning the bytes written.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize, LayoutError> {
        serialize_into(&POST_VAA_LAYOUT, &self.to_record()?, out)
    }

    #[cfg(feature = "alloc")]
    pub fn encode(&self) -> Result<alloc::vec::Vec<u8>, LayoutError> {
        vaakit_core::serialize(&POST_VAA_LAYOUT, &self.to_record()?)
    }

    /// Decode a full `post_vaa` instruction body, tag and version included.
    pub fn decode(data: &'a [u8]) -> Result<Self, LayoutError> {
        Self::from_record(&deserialize(&POST_VAA_LAYOUT, data)?)
    }
}

fn uint_field<T: TryFrom<u64>>(record: &Record<'_>, field: &'static str) -> Result<T, LayoutError> {
    match record.get(field) {
        Some(Value::Uint(v)) => T::try_from(v).map_err(|_| LayoutError::ValueOutOfRange { field }),
        Some(Value::Bytes(_)) => Err(LayoutError::TypeMismatch { field }),
        None => Err(LayoutError::MissingField { field }),
    }
}

fn bytes_field<'a>(record: &Record<'a>, field: &'static str) -> Result<&'a [u8], LayoutError> {
    match record.get(field) {
        Some(Value::Bytes(b)) => Ok(b),
        Some(Value::Uint(_)) => Err(LayoutError::TypeMismatch { field }),
        None => Err(LayoutError::MissingField { field }),
    }
}

/// Guardian set account for `index`: seeds `["GuardianSet", index as u32 BE]`.
pub fn guardian_set_address(index: u32, bridge: &Address) -> Result<(Address, u8), ProgramError> {
    let mut record = Record::new();
    record.push_uint("index", index.into())?;
    let mut seed = [0u8; 4];
    serialize_into(&GUARDIAN_SET_INDEX, &record, &mut seed)?;
    Ok(crate::find_pda!(bridge, GUARDIAN_SET_SEED, seed)?)
}

/// Posted VAA account for a VAA body hash: seeds `["PostedVAA", hash]`.
pub fn posted_vaa_address(vaa_hash: &[u8; 32], bridge: &Address) -> Result<(Address, u8), ProgramError> {
    Ok(crate::find_pda!(bridge, POSTED_VAA_SEED, vaa_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMITTER: [u8; 32] = {
        let mut out = [0u8; 32];
        out[31] = 0x85;
        out
    };

    fn sample(payload: &[u8]) -> PostVaa<'_> {
        PostVaa {
            guardian_set: 3,
            timestamp: 1711055471,
            nonce: 2,
            emitter_chain: 2,
            emitter_address: &EMITTER,
            sequence: 245668,
            consistency_level: 1,
            payload,
        }
    }

    #[test]
    fn header_bytes_lead() {
        let vaa = sample(b"hello");
        let mut buf = [0u8; 128];
        let n = vaa.encode_into(&mut buf).unwrap();
        assert_eq!(n, 2 + 4 + 4 + 4 + 2 + 32 + 8 + 1 + 4 + 5);
        assert_eq!(vaa.encoded_len(), Ok(n));
        assert_eq!(&buf[..6], &[POST_VAA_IX, VAA_VERSION, 3, 0, 0, 0]);
        assert_eq!(PostVaa::decode(&buf[..n]), Ok(vaa));
    }

    #[test]
    fn wrong_tag_rejected() {
        let vaa = sample(b"");
        let mut buf = [0u8; 64];
        let n = vaa.encode_into(&mut buf).unwrap();
        buf[0] = 1;
        assert_eq!(
            PostVaa::decode(&buf[..n]),
            Err(LayoutError::ConstantMismatch { field: "postVaaIx" })
        );
    }

    #[test]
    fn record_narrowing() {
        let mut rec = sample(b"").to_record().unwrap();
        assert_eq!(PostVaa::from_record(&rec), Ok(sample(b"")));

        let mut wide = Record::new();
        for (name, value) in rec.iter() {
            let value = if name == "emitterChain" { Value::Uint(1 << 16) } else { value };
            wide.push(name, value).unwrap();
        }
        assert_eq!(
            PostVaa::from_record(&wide),
            Err(LayoutError::ValueOutOfRange { field: "emitterChain" })
        );

        rec = Record::new();
        rec.push_uint("guardianSet", 3).unwrap();
        assert_eq!(
            PostVaa::from_record(&rec),
            Err(LayoutError::MissingField { field: "emitterAddress" })
        );
    }

    #[test]
    fn guardian_set_seed_is_big_endian() {
        let (address, bump) = guardian_set_address(3, &CORE_BRIDGE_MAINNET).unwrap();
        let direct = vaakit_core::create_program_address(
            &[b"GuardianSet", &[0, 0, 0, 3], &[bump]],
            &CORE_BRIDGE_MAINNET,
        )
        .unwrap();
        assert_eq!(address.to_bytes(), direct.to_bytes());
    }
}
