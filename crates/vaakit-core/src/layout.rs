//! Declarative layout descriptions.
//!
//! A [`Layout`] is an ordered list of [`FieldSpec`]s. Order is wire order:
//! the codec walks the list front to back, with no padding and no alignment.
//! Layouts are meant to live in `const` items, so a malformed one is a
//! compile error rather than a runtime surprise:
//!
//! ```rust,ignore
//! const HEADER_FIELDS: &[FieldSpec] = &[
//!     FieldSpec::uint("instruction", 1, Endian::Big).constant_uint(2).omit(),
//!     FieldSpec::uint("guardianSet", 4, Endian::Little),
//!     FieldSpec::bytes("emitterAddress", 32),
//!     FieldSpec::var_bytes("payload", 4, Endian::Little),
//! ];
//! const HEADER: Layout = Layout::new(HEADER_FIELDS);
//! ```

use crate::error::LayoutError;

/// Maximum number of fields in a [`Layout`] and entries in a [`Record`](crate::Record).
pub const MAX_FIELDS: usize = 32;

/// Widest supported unsigned integer, in bytes.
pub const MAX_UINT_SIZE: u8 = 8;

/// Byte order of an unsigned integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// The integer that precedes a length-prefixed blob and holds its byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPrefix {
    pub size: u8,
    pub endian: Endian,
}

/// How a field is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer, `size` bytes wide (1..=8).
    Uint { size: u8, endian: Endian },
    /// Blob of exactly `size` bytes.
    Bytes { size: usize },
    /// Blob whose length is given by `prefix`. Without a prefix the blob
    /// runs to the end of the input and must be the last field.
    VarBytes { prefix: Option<LengthPrefix> },
}

/// Fixed value of a constant field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Uint(u64),
    Bytes(&'static [u8]),
}

/// One field of a [`Layout`].
///
/// - `constant`: the value is written from the layout and checked on decode.
///   It never appears in a record, in either direction, omitted or not.
/// - `omit`: the field occupies wire bytes but is left out of records. An
///   omitted field without a constant is *reserved*: encoded as zeros,
///   skipped on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub constant: Option<Constant>,
    pub omit: bool,
}

impl FieldSpec {
    #[inline(always)]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            constant: None,
            omit: false,
        }
    }

    /// Unsigned integer field.
    #[inline(always)]
    pub const fn uint(name: &'static str, size: u8, endian: Endian) -> Self {
        Self::new(name, FieldKind::Uint { size, endian })
    }

    /// Fixed-length blob field.
    #[inline(always)]
    pub const fn bytes(name: &'static str, size: usize) -> Self {
        Self::new(name, FieldKind::Bytes { size })
    }

    /// Length-prefixed blob field; the prefix is a `prefix_size`-byte uint.
    #[inline(always)]
    pub const fn var_bytes(name: &'static str, prefix_size: u8, endian: Endian) -> Self {
        Self::new(
            name,
            FieldKind::VarBytes {
                prefix: Some(LengthPrefix {
                    size: prefix_size,
                    endian,
                }),
            },
        )
    }

    /// Blob that takes every remaining byte. Last field only.
    #[inline(always)]
    pub const fn trailing_bytes(name: &'static str) -> Self {
        Self::new(name, FieldKind::VarBytes { prefix: None })
    }

    #[inline(always)]
    pub const fn constant_uint(self, value: u64) -> Self {
        Self {
            constant: Some(Constant::Uint(value)),
            ..self
        }
    }

    #[inline(always)]
    pub const fn constant_bytes(self, value: &'static [u8]) -> Self {
        Self {
            constant: Some(Constant::Bytes(value)),
            ..self
        }
    }

    #[inline(always)]
    pub const fn omit(self) -> Self {
        Self { omit: true, ..self }
    }

    /// Omitted with no constant: zero-filled on encode, skipped on decode.
    #[inline(always)]
    pub const fn is_reserved(&self) -> bool {
        self.omit && self.constant.is_none()
    }

    /// The caller must supply this field on encode.
    #[inline(always)]
    pub const fn is_required(&self) -> bool {
        !self.omit && self.constant.is_none()
    }

    /// Wire size, when it does not depend on the value.
    pub const fn fixed_size(&self) -> Option<usize> {
        match self.kind {
            FieldKind::Uint { size, .. } => Some(size as usize),
            FieldKind::Bytes { size } => Some(size),
            FieldKind::VarBytes { .. } => None,
        }
    }
}

/// An immutable, validated, ordered list of fields.
///
/// `Copy` and free of interior mutability, so one `const` layout can be
/// shared by any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<'f> {
    fields: &'f [FieldSpec],
}

impl<'f> Layout<'f> {
    /// Build a layout, panicking if it is malformed.
    ///
    /// Intended for `const` items, where the panic becomes a compile error.
    /// Use [`Layout::try_new`] for layouts assembled at runtime.
    ///
    /// # Panics
    ///
    /// If [`Layout::try_new`] would return an error.
    pub const fn new(fields: &'f [FieldSpec]) -> Self {
        match Self::try_new(fields) {
            Ok(layout) => layout,
            Err(_) => panic!("malformed layout"),
        }
    }

    /// Build a layout, rejecting:
    ///
    /// - more than [`MAX_FIELDS`] fields, empty or duplicate names
    /// - uint / prefix widths outside `1..=8`
    /// - constants of the wrong kind, or that don't fit the field
    /// - an unprefixed var-bytes field anywhere but last
    pub const fn try_new(fields: &'f [FieldSpec]) -> Result<Self, LayoutError> {
        if fields.len() > MAX_FIELDS {
            return Err(LayoutError::TooManyFields);
        }
        let mut i = 0;
        while i < fields.len() {
            let field = &fields[i];
            if field.name.is_empty() {
                return Err(LayoutError::EmptyFieldName);
            }
            let name = field.name;
            match field.kind {
                FieldKind::Uint { size, .. } => {
                    if !valid_uint_size(size) {
                        return Err(LayoutError::InvalidFieldSize { field: name });
                    }
                    match field.constant {
                        None => {}
                        Some(Constant::Uint(value)) if uint_fits(value, size) => {}
                        Some(_) => return Err(LayoutError::InvalidConstant { field: name }),
                    }
                }
                FieldKind::Bytes { size } => match field.constant {
                    None => {}
                    Some(Constant::Bytes(value)) if value.len() == size => {}
                    Some(_) => return Err(LayoutError::InvalidConstant { field: name }),
                },
                FieldKind::VarBytes { prefix } => {
                    match prefix {
                        Some(prefix) => {
                            if !valid_uint_size(prefix.size) {
                                return Err(LayoutError::InvalidFieldSize { field: name });
                            }
                            if let Some(Constant::Bytes(value)) = field.constant {
                                if !uint_fits(value.len() as u64, prefix.size) {
                                    return Err(LayoutError::InvalidConstant { field: name });
                                }
                            }
                        }
                        None => {
                            if i + 1 != fields.len() {
                                return Err(LayoutError::UnboundedFieldNotLast { field: name });
                            }
                        }
                    }
                    if let Some(Constant::Uint(_)) = field.constant {
                        return Err(LayoutError::InvalidConstant { field: name });
                    }
                }
            }
            let mut j = 0;
            while j < i {
                if str_eq(fields[j].name, name) {
                    return Err(LayoutError::DuplicateField { field: name });
                }
                j += 1;
            }
            i += 1;
        }
        Ok(Self { fields })
    }

    #[inline(always)]
    pub const fn fields(&self) -> &'f [FieldSpec] {
        self.fields
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'f FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Total wire size if every field is fixed-size, else `None`.
    pub const fn fixed_size(&self) -> Option<usize> {
        let mut total = 0usize;
        let mut i = 0;
        while i < self.fields.len() {
            match self.fields[i].fixed_size() {
                Some(size) => total += size,
                None => return None,
            }
            i += 1;
        }
        Some(total)
    }

    /// Smallest possible encoding: every var-bytes blob empty.
    pub const fn min_size(&self) -> usize {
        let mut total = 0usize;
        let mut i = 0;
        while i < self.fields.len() {
            total += match self.fields[i].kind {
                FieldKind::Uint { size, .. } => size as usize,
                FieldKind::Bytes { size } => size,
                FieldKind::VarBytes {
                    prefix: Some(prefix),
                } => prefix.size as usize,
                FieldKind::VarBytes { prefix: None } => 0,
            };
            i += 1;
        }
        total
    }
}

#[inline(always)]
pub(crate) const fn valid_uint_size(size: u8) -> bool {
    size >= 1 && size <= MAX_UINT_SIZE
}

/// `value < 2^(8 * size)`.
#[inline(always)]
pub(crate) const fn uint_fits(value: u64, size: u8) -> bool {
    size >= MAX_UINT_SIZE || value >> (8 * size as u32) == 0
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
