#![no_main]

use libfuzzer_sys::fuzz_target;
use vaakit_core::{deserialize, serialize_into, serialized_len, Endian, FieldSpec, Layout};

// Every field kind: constant, reserved, both byte orders, fixed bytes,
// prefixed and trailing blobs.
const MIXED_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("tag", 1, Endian::Big).constant_uint(7).omit(),
    FieldSpec::uint("flags", 2, Endian::Big),
    FieldSpec::bytes("reserved", 3).omit(),
    FieldSpec::uint("amount", 5, Endian::Little),
    FieldSpec::bytes("magic", 2).constant_bytes(b"VA"),
    FieldSpec::var_bytes("memo", 1, Endian::Little),
    FieldSpec::trailing_bytes("rest"),
];
const MIXED: Layout = Layout::new(MIXED_FIELDS);

fuzz_target!(|data: &[u8]| {
    let Ok(record) = deserialize(&MIXED, data) else {
        return;
    };
    let len = serialized_len(&MIXED, &record).expect("decoded record re-encodes");
    let mut out = vec![0u8; len];
    serialize_into(&MIXED, &record, &mut out).expect("buffer sized by serialized_len");
    // Reserved bytes come back as zeros, everything else byte-for-byte.
    assert_eq!(&out[..3], &data[..3]);
    assert!(out[3..6].iter().all(|b| *b == 0));
    assert_eq!(&out[6..], &data[6..]);
});
