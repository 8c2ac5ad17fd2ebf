//! Bounds-checked byte cursor over an immutable buffer.
//!
//! Every byte the crate decodes is read through [`ByteCursor`]. The cursor never panics on
//! short input: any read that needs more bytes than remain fails with
//! [`EmfError::UnexpectedEndOfData`] and leaves the cursor where it was.
//!
//! Fixed-width values implement [`Decode`], so records read fields with `cursor.read::<T>()`
//! and look ahead with `cursor.peek::<T>()`. The cursor is `Copy`; a peek decodes from a copy,
//! so a failed peek cannot disturb the real position.
//!
//! The position only ever moves backwards or jumps forward through
//! [`Envelope::seek`](crate::envelope::Envelope::seek), which validates the target against the
//! enclosing record first.

use crate::error::{EmfError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// A fixed-size little-endian value that can be read from a [`ByteCursor`].
pub trait Decode: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self>;
}

#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the whole underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn read<T: Decode>(&mut self) -> Result<T> {
        let saved = self.pos;
        T::decode(self).inspect_err(|_| self.pos = saved)
    }

    /// Decode a `T` at the current position without advancing.
    pub fn peek<T: Decode>(&self) -> Result<T> {
        let mut ahead = *self;
        ahead.read()
    }

    /// Decode a `T` located `distance` bytes past the current position without advancing.
    pub fn peek_at<T: Decode>(&self, distance: usize) -> Result<T> {
        let mut ahead = *self;
        ahead.skip(distance)?;
        ahead.read()
    }

    /// Borrow the next `count` bytes and advance past them.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(EmfError::UnexpectedEndOfData {
                position: self.pos,
                needed: count,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Owned copy of the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.take(count).map(<[u8]>::to_vec)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Skip the bytes needed to bring `position - start` up to a multiple of 4. Their content
    /// is ignored.
    pub fn read_alignment_padding(&mut self, start: usize) -> Result<()> {
        let consumed = self.pos.saturating_sub(start);
        let padding = consumed.next_multiple_of(4) - consumed;
        self.skip(padding)
    }

    /// Read `code_units` UTF-16LE code units. Unpaired surrogates are replaced with U+FFFD.
    pub fn read_utf16(&mut self, code_units: usize) -> Result<String> {
        let byte_len = code_units.checked_mul(2).ok_or(EmfError::UnexpectedEndOfData {
            position: self.pos,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let bytes = self.take(byte_len)?;
        let units: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
        Ok(String::from_utf16_lossy(&units))
    }

    /// Read `count` consecutive `T`s.
    pub fn read_array<T: Decode>(&mut self, count: usize) -> Result<Vec<T>> {
        // Reject impossible counts before allocating.
        let needed = count.saturating_mul(T::SIZE);
        if needed > self.remaining() {
            return Err(EmfError::UnexpectedEndOfData {
                position: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read()?);
        }
        Ok(out)
    }

    /// Move to an absolute position. Callers validate `pos` against the enclosing record.
    pub(crate) fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(EmfError::UnexpectedEndOfData {
                position: self.pos,
                needed: pos - self.pos,
                available: self.remaining(),
            });
        }
        self.pos = pos;
        Ok(())
    }
}

macro_rules! impl_decode_le {
    ($($ty:ty => $read:expr),* $(,)?) => {
        $(
            impl Decode for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
                    let bytes = cursor.take(Self::SIZE)?;
                    Ok($read(bytes))
                }
            }
        )*
    };
}

impl_decode_le! {
    u8 => |b: &[u8]| b[0],
    i8 => |b: &[u8]| b[0] as i8,
    u16 => LittleEndian::read_u16,
    i16 => LittleEndian::read_i16,
    u32 => LittleEndian::read_u32,
    i32 => LittleEndian::read_i32,
    u64 => LittleEndian::read_u64,
    f32 => LittleEndian::read_f32,
}
