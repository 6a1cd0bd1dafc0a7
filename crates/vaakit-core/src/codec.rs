//! Serialize / deserialize a [`Record`] against a [`Layout`].
//!
//! Encoding is two-phase: [`serialized_len`] resolves and validates every
//! field first, and only then does [`serialize_into`] touch the output
//! buffer. An error therefore never leaves a half-written buffer behind.
//! Decoding builds the record locally and hands it out only on success.

use crate::{
    cursor::{DataWriter, SliceCursor},
    error::LayoutError,
    layout::{uint_fits, Constant, FieldKind, FieldSpec, Layout},
    record::{Record, Value},
};

/// What actually goes on the wire for one field.
#[derive(Clone, Copy)]
enum Resolved<'a> {
    Uint(u64),
    Bytes(&'a [u8]),
    /// Reserved fixed-size field: `n` zero bytes.
    Zeros(usize),
}

impl Constant {
    #[inline(always)]
    fn matches(&self, value: &Value<'_>) -> bool {
        match (*self, *value) {
            (Constant::Uint(c), Value::Uint(v)) => c == v,
            (Constant::Bytes(c), Value::Bytes(v)) => c == v,
            _ => false,
        }
    }

    #[inline(always)]
    fn resolve<'a>(self) -> Resolved<'a> {
        match self {
            Constant::Uint(v) => Resolved::Uint(v),
            Constant::Bytes(b) => Resolved::Bytes(b),
        }
    }
}

/// Every record name must be a caller-supplied field of the layout: not
/// omitted and not constant.
fn check_record_names(layout: &Layout<'_>, record: &Record<'_>) -> Result<(), LayoutError> {
    for (name, _) in record.iter() {
        match layout.field(name) {
            Some(field) if field.is_required() => {}
            _ => return Err(LayoutError::UnexpectedField { field: name }),
        }
    }
    Ok(())
}

/// Pick the value for `field` from the record or the layout and check that
/// it fits the field.
fn resolve<'a>(field: &FieldSpec, record: &Record<'a>) -> Result<Resolved<'a>, LayoutError> {
    let name = field.name;
    let supplied = if field.is_required() { record.get(name) } else { None };

    let resolved = match (field.constant, supplied) {
        (Some(constant), _) => constant.resolve(),
        (None, Some(Value::Uint(v))) => Resolved::Uint(v),
        (None, Some(Value::Bytes(b))) => Resolved::Bytes(b),
        (None, None) if field.omit => match field.kind {
            FieldKind::Uint { .. } => Resolved::Uint(0),
            FieldKind::Bytes { size } => Resolved::Zeros(size),
            FieldKind::VarBytes { .. } => Resolved::Bytes(&[]),
        },
        (None, None) => return Err(LayoutError::MissingField { field: name }),
    };

    match (field.kind, resolved) {
        (FieldKind::Uint { size, .. }, Resolved::Uint(v)) => {
            if !uint_fits(v, size) {
                return Err(LayoutError::ValueOutOfRange { field: name });
            }
        }
        (FieldKind::Bytes { size }, Resolved::Bytes(b)) => {
            if b.len() != size {
                return Err(LayoutError::LengthMismatch {
                    field: name,
                    expected: size,
                    actual: b.len(),
                });
            }
        }
        (FieldKind::Bytes { .. }, Resolved::Zeros(_)) => {}
        (FieldKind::VarBytes { prefix }, Resolved::Bytes(b)) => {
            if let Some(prefix) = prefix {
                let fits = u64::try_from(b.len()).is_ok_and(|len| uint_fits(len, prefix.size));
                if !fits {
                    return Err(LayoutError::ValueOutOfRange { field: name });
                }
            }
        }
        _ => return Err(LayoutError::TypeMismatch { field: name }),
    }
    Ok(resolved)
}

/// Wire size of one resolved field.
#[inline(always)]
fn wire_size(field: &FieldSpec, resolved: Resolved<'_>) -> usize {
    match (field.kind, resolved) {
        (FieldKind::Uint { size, .. }, _) => size as usize,
        (FieldKind::Bytes { size }, _) => size,
        (FieldKind::VarBytes { prefix }, Resolved::Bytes(b)) => {
            prefix.map_or(0, |p| p.size as usize) + b.len()
        }
        (FieldKind::VarBytes { .. }, _) => 0,
    }
}

/// Validate `record` against `layout` and return the encoded size in bytes.
///
/// Runs every check [`serialize_into`] relies on. The record names exactly
/// the caller-supplied fields (no unknown, omitted or constant names), each
/// with the right type. Integers fit their width, fixed blobs have the exact
/// length and var blobs fit their prefix. Constants come from the layout.
pub fn serialized_len(layout: &Layout<'_>, record: &Record<'_>) -> Result<usize, LayoutError> {
    check_record_names(layout, record)?;
    let mut total = 0usize;
    for field in layout.fields() {
        let resolved = resolve(field, record)?;
        total = total
            .checked_add(wire_size(field, resolved))
            .ok_or(LayoutError::ValueOutOfRange { field: field.name })?;
    }
    Ok(total)
}

/// Encode `record` into the front of `out` and return the number of bytes written.
///
/// All-or-nothing: on any error `out` is left untouched.
pub fn serialize_into(
    layout: &Layout<'_>,
    record: &Record<'_>,
    out: &mut [u8],
) -> Result<usize, LayoutError> {
    let needed = serialized_len(layout, record)?;
    if out.len() < needed {
        return Err(LayoutError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut w = DataWriter::new(&mut out[..needed]);
    for field in layout.fields() {
        let name = field.name;
        match (field.kind, resolve(field, record)?) {
            (FieldKind::Uint { size, endian }, Resolved::Uint(v)) => {
                w.write_uint(name, v, size, endian)?
            }
            (FieldKind::VarBytes { prefix }, Resolved::Bytes(b)) => {
                if let Some(prefix) = prefix {
                    w.write_uint(name, b.len() as u64, prefix.size, prefix.endian)?;
                }
                w.write_bytes(b)?;
            }
            (_, Resolved::Bytes(b)) => w.write_bytes(b)?,
            (_, Resolved::Zeros(n)) => w.write_zeros(n)?,
            (_, Resolved::Uint(_)) => return Err(LayoutError::TypeMismatch { field: name }),
        }
    }
    trace!("serialized {} bytes over {} fields", w.written(), layout.len());
    Ok(w.written())
}

/// Encode `record` into a freshly allocated buffer of exactly the right size.
#[cfg(feature = "alloc")]
pub fn serialize(
    layout: &Layout<'_>,
    record: &Record<'_>,
) -> Result<alloc::vec::Vec<u8>, LayoutError> {
    let mut out = alloc::vec![0u8; serialized_len(layout, record)?];
    serialize_into(layout, record, &mut out)?;
    Ok(out)
}

/// Decode `bytes` according to `layout`.
///
/// Reads fields in order, checks constants, and keeps only the fields a
/// caller would supply to [`serialize_into`]: constant and omitted fields
/// are validated or skipped but never land in the record. The input
/// must be consumed exactly: a short input is `TruncatedInput`, leftovers
/// are `TrailingBytes`. Byte values in the returned record borrow from
/// `bytes`; a length prefix is checked against the remaining input before
/// anything is sliced, so a hostile prefix costs nothing.
pub fn deserialize<'a>(layout: &Layout<'_>, bytes: &'a [u8]) -> Result<Record<'a>, LayoutError> {
    let result = decode_fields(layout, bytes);
    if let Err(err) = &result {
        debug!("decode of {} bytes failed: {}", bytes.len(), err);
    }
    result
}

fn decode_fields<'a>(layout: &Layout<'_>, bytes: &'a [u8]) -> Result<Record<'a>, LayoutError> {
    let mut cur = SliceCursor::new(bytes);
    let mut record = Record::new();

    for field in layout.fields() {
        let name = field.name;
        let value = match field.kind {
            FieldKind::Uint { size, endian } => Value::Uint(cur.read_uint(name, size, endian)?),
            FieldKind::Bytes { size } => Value::Bytes(cur.read_bytes(name, size)?),
            FieldKind::VarBytes {
                prefix: Some(prefix),
            } => {
                let len = cur.read_uint(name, prefix.size, prefix.endian)?;
                let len = usize::try_from(len).map_err(|_| LayoutError::TruncatedInput {
                    field: name,
                    needed: usize::MAX,
                    remaining: cur.remaining(),
                })?;
                Value::Bytes(cur.read_bytes(name, len)?)
            }
            FieldKind::VarBytes { prefix: None } => Value::Bytes(cur.read_rest()),
        };

        if let Some(constant) = field.constant {
            if !constant.matches(&value) {
                return Err(LayoutError::ConstantMismatch { field: name });
            }
        }
        if field.is_required() {
            record.push(name, value)?;
        }
    }

    match cur.remaining() {
        0 => Ok(record),
        extra => Err(LayoutError::TrailingBytes { extra }),
    }
}
