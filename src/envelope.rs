//! Record envelope protocol.
//!
//! Every record starts with a 4-byte type tag and a 4-byte size covering the whole record.
//! [`Envelope::read`] validates that prefix before any body byte is touched, and
//! [`Envelope::finish`] checks after the body decode that exactly `size` bytes were consumed.
//! Between the two, a decoder may jump to offset-addressed data inside the record, but only
//! through [`Envelope::seek_range`] / [`Envelope::seek`], which check the target against the
//! record's declared extent first.
//!
//! ## Order of checks
//!
//! 1. tag (`CorruptTag`, cursor untouched)
//! 2. size alignment and tag minimum (`CorruptSize`)
//! 3. declared extent within the buffer (`UnexpectedEndOfData`)
//! 4. body decode
//! 5. consumed == size (`CorruptSize`)

use crate::cursor::ByteCursor;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;

/// Size of the tag + size prefix.
pub const ENVELOPE_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    start: usize,
    record_type: u32,
    size: u32,
}

impl Envelope {
    /// Tag of the record at the cursor, without consuming it.
    pub fn peek_type(cursor: &ByteCursor<'_>) -> Result<u32> {
        cursor.peek::<u32>()
    }

    /// Read the envelope of a record that must carry `expected` and be at least `min_size`
    /// bytes long.
    pub fn read(cursor: &mut ByteCursor<'_>, expected: RecordType, min_size: u32) -> Result<Self> {
        let found = Self::peek_type(cursor)?;
        if found != u32::from(expected) {
            return Err(EmfError::CorruptTag {
                position: cursor.position(),
                expected: expected.into(),
                found,
            });
        }
        Self::read_any(cursor, min_size)
    }

    /// Read an envelope whatever its tag. Used by the opaque decoder for unrecognized tags.
    pub fn read_any(cursor: &mut ByteCursor<'_>, min_size: u32) -> Result<Self> {
        let start = cursor.position();
        let mut ahead = *cursor;
        let record_type: u32 = ahead.read()?;
        let size: u32 = ahead.read()?;
        if size % 4 != 0 {
            return Err(EmfError::size(start, format!("size {size} is not a multiple of 4")));
        }
        let min_size = min_size.max(ENVELOPE_SIZE);
        if size < min_size {
            return Err(EmfError::size(start, format!("size {size} below minimum {min_size}")));
        }
        let available = cursor.len() - start;
        if size as usize > available {
            return Err(EmfError::UnexpectedEndOfData {
                position: start,
                needed: size as usize,
                available,
            });
        }
        *cursor = ahead;
        Ok(Envelope {
            start,
            record_type,
            size,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn record_type(&self) -> u32 {
        self.record_type
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Bytes consumed so far, relative to the record start.
    pub fn consumed(&self, cursor: &ByteCursor<'_>) -> usize {
        cursor.position().saturating_sub(self.start)
    }

    /// Check that the record-relative range `offset..offset + len` lies within `floor..limit`.
    pub fn check_range(&self, offset: u64, len: u64, floor: u64, limit: u64) -> Result<()> {
        let end = offset.checked_add(len);
        let limit = limit.min(u64::from(self.size));
        match end {
            Some(end) if offset >= floor && end <= limit => Ok(()),
            _ => Err(EmfError::CorruptOffset {
                position: self.start,
                offset,
                len,
                floor,
                limit,
            }),
        }
    }

    /// Validate `offset..offset + len` against `floor..limit` and move the cursor to `offset`.
    pub fn seek_range(
        &self,
        cursor: &mut ByteCursor<'_>,
        offset: u64,
        len: u64,
        floor: u64,
        limit: u64,
    ) -> Result<()> {
        self.check_range(offset, len, floor, limit)?;
        self.seek(cursor, offset)
    }

    /// Move the cursor to a record-relative offset no further than the declared end.
    pub fn seek(&self, cursor: &mut ByteCursor<'_>, offset: u64) -> Result<()> {
        self.check_range(offset, 0, 0, u64::from(self.size))?;
        // offset <= size, and start + size is within the buffer.
        cursor.set_position(self.start + offset as usize)
    }

    /// Assert that the cursor sits exactly on the declared end.
    pub fn finish(&self, cursor: &ByteCursor<'_>) -> Result<()> {
        let consumed = self.consumed(cursor);
        if consumed != self.size as usize {
            return Err(EmfError::size(
                self.start,
                format!("consumed {consumed} bytes of declared {}", self.size),
            ));
        }
        Ok(())
    }
}
