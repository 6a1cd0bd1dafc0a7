#![no_main]

use libfuzzer_sys::fuzz_target;
use vaakit_core::{deserialize, Endian, FieldSpec, Layout, LayoutError};

const POST_VAA_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("postVaaIx", 1, Endian::Little).constant_uint(2).omit(),
    FieldSpec::uint("version", 1, Endian::Little).constant_uint(1).omit(),
    FieldSpec::uint("guardianSet", 4, Endian::Little),
    FieldSpec::uint("timestamp", 4, Endian::Little),
    FieldSpec::uint("nonce", 4, Endian::Little),
    FieldSpec::uint("emitterChain", 2, Endian::Little),
    FieldSpec::bytes("emitterAddress", 32),
    FieldSpec::uint("sequence", 8, Endian::Little),
    FieldSpec::uint("consistencyLevel", 1, Endian::Little),
    FieldSpec::var_bytes("payload", 4, Endian::Little),
];
const POST_VAA: Layout = Layout::new(POST_VAA_FIELDS);

fuzz_target!(|data: &[u8]| {
    match deserialize(&POST_VAA, data) {
        Ok(record) => {
            assert_eq!(record.len(), 8);
            let payload = record.bytes("payload").unwrap();
            assert_eq!(data.len(), POST_VAA.min_size() + payload.len());
        }
        Err(LayoutError::TruncatedInput { .. })
        | Err(LayoutError::TrailingBytes { .. })
        | Err(LayoutError::ConstantMismatch { .. }) => {}
        Err(other) => panic!("unexpected decode error: {other}"),
    }
});
