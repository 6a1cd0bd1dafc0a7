use proptest::prelude::*;
use vaakit_core::{
    deserialize, serialize, serialize_into, serialized_len, Endian, FieldSpec, Layout,
    LayoutError, Record, Value,
};

const VAA_BODY_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("guardianSet", 4, Endian::Little),
    FieldSpec::uint("timestamp", 4, Endian::Little),
    FieldSpec::uint("nonce", 4, Endian::Little),
    FieldSpec::uint("emitterChain", 2, Endian::Little),
    FieldSpec::bytes("emitterAddress", 32),
    FieldSpec::uint("sequence", 8, Endian::Little),
    FieldSpec::uint("consistencyLevel", 1, Endian::Little),
    FieldSpec::var_bytes("payload", 4, Endian::Little),
];
const VAA_BODY: Layout = Layout::new(VAA_BODY_FIELDS);

fn emitter() -> [u8; 32] {
    let mut out = [0u8; 32];
    let raw = hex::decode("3ee18b2214aff97000d974cf647e7c347e8fa585").unwrap();
    out[32 - raw.len()..].copy_from_slice(&raw);
    out
}

fn body_record<'a>(emitter: &'a [u8], payload: &'a [u8]) -> Record<'a> {
    let mut rec = Record::new();
    rec.push_uint("guardianSet", 3).unwrap();
    rec.push_uint("timestamp", 1711055471).unwrap();
    rec.push_uint("nonce", 2).unwrap();
    rec.push_uint("emitterChain", 2).unwrap();
    rec.push_bytes("emitterAddress", emitter).unwrap();
    rec.push_uint("sequence", 245668).unwrap();
    rec.push_uint("consistencyLevel", 1).unwrap();
    rec.push_bytes("payload", payload).unwrap();
    rec
}

#[test]
fn vaa_body_scenario() {
    let emitter = emitter();
    let payload = hex::decode(
        "01000000000000000000000000000000000000000000000000000012a9cff88af5\
         00000000000000000000000018aaa7115705e8be94bffebde57af9bfc265b998",
    )
    .unwrap();
    let rec = body_record(&emitter, &payload);

    let bytes = serialize(&VAA_BODY, &rec).unwrap();
    assert_eq!(&bytes[..4], &[0x03, 0x00, 0x00, 0x00]);
    assert_eq!(bytes.len(), 4 + 4 + 4 + 2 + 32 + 8 + 1 + 4 + payload.len());
    assert_eq!(&bytes[4..8], &1711055471u32.to_le_bytes());
    assert_eq!(&bytes[14..46], &emitter);
    assert_eq!(&bytes[46..54], &245668u64.to_le_bytes());
    assert_eq!(bytes[54], 1);
    assert_eq!(&bytes[55..59], &(payload.len() as u32).to_le_bytes());
    assert_eq!(&bytes[59..], &payload[..]);

    assert_eq!(deserialize(&VAA_BODY, &bytes).unwrap(), rec);
}

#[test]
fn one_byte_short_is_truncated() {
    let emitter = emitter();
    let rec = body_record(&emitter, b"abc");
    let bytes = serialize(&VAA_BODY, &rec).unwrap();
    assert!(matches!(
        deserialize(&VAA_BODY, &bytes[..bytes.len() - 1]),
        Err(LayoutError::TruncatedInput {
            field: "payload",
            ..
        })
    ));
}

const BLOB_FIELDS: &[FieldSpec] = &[FieldSpec::var_bytes("blob", 4, Endian::Little)];
const BLOB: Layout = Layout::new(BLOB_FIELDS);

#[test]
fn length_prefix_fidelity() {
    for len in [0usize, 1, 1 << 16] {
        let blob = vec![0x5Au8; len];
        let mut rec = Record::new();
        rec.push_bytes("blob", &blob).unwrap();
        let bytes = serialize(&BLOB, &rec).unwrap();
        assert_eq!(bytes.len(), 4 + len);
        assert_eq!(&bytes[..4], &(len as u32).to_le_bytes());
        let back = deserialize(&BLOB, &bytes).unwrap();
        assert_eq!(back.bytes("blob").map(<[u8]>::len), Some(len));
    }
}

// The `2^32 - 1` case is checked as a prefix with nothing behind it:
// encoding a 4 GiB blob is not something a test should allocate.
#[test]
fn hostile_length_prefix_fails_without_allocating() {
    let mut wire = u32::MAX.to_le_bytes().to_vec();
    wire.extend_from_slice(&[1, 2, 3]);
    assert_eq!(
        deserialize(&BLOB, &wire),
        Err(LayoutError::TruncatedInput {
            field: "blob",
            needed: u32::MAX as usize,
            remaining: 3
        })
    );
}

#[test]
fn prefix_width_bounds_encoding() {
    const SHORT_FIELDS: &[FieldSpec] = &[FieldSpec::var_bytes("blob", 2, Endian::Big)];
    const SHORT: Layout = Layout::new(SHORT_FIELDS);
    let fits = vec![0u8; u16::MAX as usize];
    let over = vec![0u8; u16::MAX as usize + 1];

    let mut rec = Record::new();
    rec.push_bytes("blob", &fits).unwrap();
    assert_eq!(serialized_len(&SHORT, &rec), Ok(2 + fits.len()));

    let mut rec = Record::new();
    rec.push_bytes("blob", &over).unwrap();
    let mut buf = vec![0u8; over.len() + 2];
    assert_eq!(
        serialize_into(&SHORT, &rec, &mut buf),
        Err(LayoutError::ValueOutOfRange { field: "blob" })
    );
    assert!(buf.iter().all(|b| *b == 0));
}

#[test]
fn layout_is_shared_across_threads() {
    let handles: Vec<_> = (0u64..4)
        .map(|i| {
            std::thread::spawn(move || {
                let emitter = [i as u8; 32];
                let mut rec = Record::new();
                for (name, value) in body_record(&emitter, b"").iter() {
                    if name == "nonce" {
                        rec.push_uint(name, i).unwrap();
                    } else {
                        rec.push(name, value).unwrap();
                    }
                }
                let bytes = serialize(&VAA_BODY, &rec).unwrap();
                deserialize(&VAA_BODY, &bytes).unwrap().uint("nonce")
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i as u64));
    }
}

// Constant (visible and omitted), reserved, both byte orders, prefixed and
// trailing blobs.
const FRAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::bytes("magic", 2).constant_bytes(b"VA"),
    FieldSpec::uint("version", 1, Endian::Big).constant_uint(1).omit(),
    FieldSpec::uint("kind", 2, Endian::Big),
    FieldSpec::bytes("reserved", 4).omit(),
    FieldSpec::uint("amount", 6, Endian::Little),
    FieldSpec::uint("flags", 1, Endian::Little).constant_uint(0),
    FieldSpec::var_bytes("memo", 2, Endian::Big),
    FieldSpec::trailing_bytes("body"),
];
const FRAME: Layout = Layout::new(FRAME_FIELDS);

#[test]
fn frame_constants_stay_out_of_records() {
    let mut rec = Record::new();
    rec.push_uint("kind", 9).unwrap();
    rec.push_uint("amount", 1).unwrap();
    rec.push_bytes("memo", b"m").unwrap();
    rec.push_bytes("body", b"").unwrap();
    let bytes = serialize(&FRAME, &rec).unwrap();
    assert_eq!(&bytes[..3], b"VA\x01");

    let back = deserialize(&FRAME, &bytes).unwrap();
    assert_eq!(back.len(), 4);
    for name in ["magic", "version", "reserved", "flags"] {
        assert!(!back.contains(name));
    }

    for (name, value) in [
        ("magic", Value::Bytes(b"VA")),
        ("version", Value::Uint(1)),
        ("flags", Value::Uint(0)),
    ] {
        let mut with_constant = rec;
        with_constant.push(name, value).unwrap();
        assert_eq!(
            serialized_len(&FRAME, &with_constant),
            Err(LayoutError::UnexpectedField { field: name })
        );
    }
}

proptest! {
    #[test]
    fn roundtrip_frame(
        kind in any::<u16>(),
        amount in 0u64..(1 << 48),
        memo in proptest::collection::vec(any::<u8>(), 0..64),
        body in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut rec = Record::new();
        rec.push_uint("kind", kind.into()).unwrap();
        rec.push_uint("amount", amount).unwrap();
        rec.push_bytes("memo", &memo).unwrap();
        rec.push_bytes("body", &body).unwrap();

        let bytes = serialize(&FRAME, &rec).unwrap();
        prop_assert_eq!(bytes.len(), FRAME.min_size() + memo.len() + body.len());
        prop_assert!(bytes[5..9].iter().all(|b| *b == 0));
        prop_assert_eq!(deserialize(&FRAME, &bytes).unwrap(), rec);
    }

    #[test]
    fn roundtrip_vaa_body(
        guardian_set in any::<u32>(),
        timestamp in any::<u32>(),
        nonce in any::<u32>(),
        chain in any::<u16>(),
        emitter in any::<[u8; 32]>(),
        sequence in any::<u64>(),
        consistency in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut rec = Record::new();
        rec.push_uint("guardianSet", guardian_set.into()).unwrap();
        rec.push_uint("timestamp", timestamp.into()).unwrap();
        rec.push_uint("nonce", nonce.into()).unwrap();
        rec.push_uint("emitterChain", chain.into()).unwrap();
        rec.push_bytes("emitterAddress", &emitter).unwrap();
        rec.push_uint("sequence", sequence).unwrap();
        rec.push_uint("consistencyLevel", consistency.into()).unwrap();
        rec.push_bytes("payload", &payload).unwrap();

        let bytes = serialize(&VAA_BODY, &rec).unwrap();
        prop_assert_eq!(bytes.len(), VAA_BODY.min_size() + payload.len());
        prop_assert_eq!(deserialize(&VAA_BODY, &bytes).unwrap(), rec);
    }

    #[test]
    fn out_of_range_uints_rejected(value in (1u64 << 16)..) {
        let mut rec = Record::new();
        rec.push_uint("guardianSet", 0).unwrap();
        rec.push_uint("timestamp", 0).unwrap();
        rec.push_uint("nonce", 0).unwrap();
        rec.push_uint("emitterChain", value).unwrap();
        rec.push_bytes("emitterAddress", &[0u8; 32]).unwrap();
        rec.push_uint("sequence", 0).unwrap();
        rec.push_uint("consistencyLevel", 0).unwrap();
        rec.push_bytes("payload", &[]).unwrap();
        prop_assert_eq!(
            serialized_len(&VAA_BODY, &rec),
            Err(LayoutError::ValueOutOfRange { field: "emitterChain" })
        );
    }

    #[test]
    fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(rec) = deserialize(&VAA_BODY, &data) {
            let again = serialize(&VAA_BODY, &rec).unwrap();
            prop_assert_eq!(&again[..], &data[..]);
        }
    }
}
