use core::fmt;

use crate::{error::LayoutError, layout::MAX_FIELDS};

/// A decoded (or to-be-encoded) field value.
///
/// Byte values borrow from the input buffer on decode and from the caller
/// on encode. Nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Uint(u64),
    Bytes(&'a [u8]),
}

impl<'a> Value<'a> {
    #[inline(always)]
    pub fn as_uint(&self) -> Option<u64> {
        match *self {
            Value::Uint(v) => Some(v),
            Value::Bytes(_) => None,
        }
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Bytes(b) => Some(b),
            Value::Uint(_) => None,
        }
    }
}

/// Field name -> [`Value`] mapping with a fixed capacity of [`MAX_FIELDS`].
///
/// Keys are unique. Equality ignores insertion order, so a record built by
/// hand compares equal to the one [`deserialize`](crate::deserialize) returns.
///
/// ```rust,ignore
/// let mut rec = Record::new();
/// rec.push_uint("guardianSet", 3)?;
/// rec.push_bytes("payload", &payload)?;
/// assert_eq!(rec.uint("guardianSet"), Some(3));
/// ```
#[derive(Clone, Copy)]
pub struct Record<'a> {
    entries: [(&'static str, Value<'a>); MAX_FIELDS],
    len: usize,
}

impl<'a> Record<'a> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            entries: [("", Value::Uint(0)); MAX_FIELDS],
            len: 0,
        }
    }

    /// Build a record from `(name, value)` pairs.
    pub fn try_from_entries(entries: &[(&'static str, Value<'a>)]) -> Result<Self, LayoutError> {
        let mut rec = Self::new();
        for &(name, value) in entries {
            rec.push(name, value)?;
        }
        Ok(rec)
    }

    /// Insert a new entry. Names must be unique.
    pub fn push(&mut self, name: &'static str, value: Value<'a>) -> Result<(), LayoutError> {
        if self.contains(name) {
            return Err(LayoutError::DuplicateField { field: name });
        }
        if self.len == MAX_FIELDS {
            return Err(LayoutError::TooManyFields);
        }
        self.entries[self.len] = (name, value);
        self.len += 1;
        Ok(())
    }

    #[inline(always)]
    pub fn push_uint(&mut self, name: &'static str, value: u64) -> Result<(), LayoutError> {
        self.push(name, Value::Uint(value))
    }

    #[inline(always)]
    pub fn push_bytes(&mut self, name: &'static str, value: &'a [u8]) -> Result<(), LayoutError> {
        self.push(name, Value::Bytes(value))
    }

    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Integer value of `name`, if present and an integer.
    #[inline(always)]
    pub fn uint(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.as_uint())
    }

    /// Byte value of `name`, if present and bytes.
    #[inline(always)]
    pub fn bytes(&self, name: &str) -> Option<&'a [u8]> {
        self.get(name).and_then(|v| v.as_bytes())
    }

    #[inline(always)]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries in insertion order (wire order for decoded records).
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Value<'a>)> + '_ {
        self.entries[..self.len].iter().copied()
    }
}

impl Default for Record<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(name, v)| other.get(name) == Some(v))
    }
}

impl Eq for Record<'_> {}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
