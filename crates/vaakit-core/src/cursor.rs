use crate::{
    error::LayoutError,
    layout::{uint_fits, valid_uint_size, Endian},
};

/// Zero-copy read cursor over a byte slice.
///
/// Tracks the current position and reads fields sequentially. Every read is
/// bounds-checked: you get `TruncatedInput` naming the field instead of a
/// panic if you read past the end. Returned byte slices borrow from the input.
///
/// ```rust,ignore
/// let mut cur = SliceCursor::new(instruction_data);
/// let guardian_set = cur.read_uint("guardianSet", 4, Endian::Little)?;
/// let emitter      = cur.read_bytes("emitterAddress", 32)?;
/// ```
pub struct SliceCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    #[inline(always)]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes remaining from the current position.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Current byte offset into the slice.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the next `n` bytes.
    #[inline(always)]
    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], LayoutError> {
        let end = match self.pos.checked_add(n) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                return Err(LayoutError::TruncatedInput {
                    field,
                    needed: n,
                    remaining: self.remaining(),
                })
            }
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a `size`-byte unsigned integer (1..=8) in the given byte order.
    pub fn read_uint(
        &mut self,
        field: &'static str,
        size: u8,
        endian: Endian,
    ) -> Result<u64, LayoutError> {
        if !valid_uint_size(size) {
            return Err(LayoutError::InvalidFieldSize { field });
        }
        let bytes = self.read_bytes(field, size as usize)?;
        let fold = |acc: u64, b: &u8| (acc << 8) | *b as u64;
        Ok(match endian {
            Endian::Big => bytes.iter().fold(0, fold),
            Endian::Little => bytes.iter().rev().fold(0, fold),
        })
    }

    /// Consume and return everything left.
    #[inline(always)]
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.data_from_position();
        self.pos = self.data.len();
        rest
    }

    /// Skip `n` bytes without reading them.
    #[inline(always)]
    pub fn skip(&mut self, field: &'static str, n: usize) -> Result<(), LayoutError> {
        self.read_bytes(field, n).map(|_| ())
    }

    /// Return the remaining unread portion of the slice from the current position.
    #[inline(always)]
    pub fn data_from_position(&self) -> &'a [u8] {
        if self.pos >= self.data.len() {
            &[]
        } else {
            &self.data[self.pos..]
        }
    }
}

// ── DataWriter ────────────────────────────────────────────────────────────────

/// Write cursor over a mutable byte slice.
///
/// Position-tracked and bounds-checked. Unlike a raw little-endian writer,
/// every integer write names its width and byte order, matching the field
/// it comes from.
///
/// ```rust,ignore
/// let mut w = DataWriter::new(&mut buf);
/// w.write_uint("guardianSet", 3, 4, Endian::Little)?;
/// w.write_bytes(&emitter)?;
/// ```
pub struct DataWriter<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> DataWriter<'a> {
    #[inline(always)]
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes written so far.
    #[inline(always)]
    pub fn written(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn claim(&mut self, n: usize) -> Result<&mut [u8], LayoutError> {
        let available = self.data.len().saturating_sub(self.pos);
        if n > available {
            return Err(LayoutError::BufferTooSmall {
                needed: self.pos.saturating_add(n),
                available: self.data.len(),
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&mut self.data[start..self.pos])
    }

    /// Write `value` as a `size`-byte unsigned integer (1..=8).
    ///
    /// `ValueOutOfRange` if `value >= 2^(8 * size)`. Nothing is written on error.
    pub fn write_uint(
        &mut self,
        field: &'static str,
        value: u64,
        size: u8,
        endian: Endian,
    ) -> Result<(), LayoutError> {
        if !valid_uint_size(size) {
            return Err(LayoutError::InvalidFieldSize { field });
        }
        if !uint_fits(value, size) {
            return Err(LayoutError::ValueOutOfRange { field });
        }
        let le = value.to_le_bytes();
        let le = &le[..size as usize];
        let dst = self.claim(size as usize)?;
        match endian {
            Endian::Little => dst.copy_from_slice(le),
            Endian::Big => {
                for (d, s) in dst.iter_mut().zip(le.iter().rev()) {
                    *d = *s;
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LayoutError> {
        self.claim(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Write `n` zero bytes.
    #[inline(always)]
    pub fn write_zeros(&mut self, n: usize) -> Result<(), LayoutError> {
        self.claim(n)?.fill(0);
        Ok(())
    }
}
