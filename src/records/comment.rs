//! `EMR_COMMENT` and sub-type disambiguation.
//!
//! A comment record is `{envelope, DataSize, data[DataSize], padding}`. The envelope never says
//! what the data is; the first four data bytes do, when they match a known identifier:
//!
//! | Identifier | Variant | Body |
//! |------------|---------|------|
//! | `0x2B464D45` | [`Comment::EmfPlus`] | embedded EMF+ records |
//! | `0x00000000` | [`Comment::EmfSpool`] | spool identifier + opaque spool records |
//! | `0x43494447` | [`Comment::Public`] | second identifier selects a [`PublicComment`] |
//! | other | [`Comment::Private`] | application data |
//!
//! The identifier is peeked, never consumed, before a branch is chosen. Data shorter than four
//! bytes is always private. Whatever the branch, the data must account for exactly `DataSize`
//! bytes and the record for exactly its declared size.

use crate::cursor::{ByteCursor, Decode};
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;
use crate::types::RectL;

pub const EMR_COMMENT_EMFPLUS: u32 = 0x2B46_4D45;
pub const EMR_COMMENT_EMFSPOOL: u32 = 0x0000_0000;
pub const EMR_COMMENT_PUBLIC: u32 = 0x4349_4447;

pub const EMFSPOOL_RECORD_IDENTIFIER: u32 = 0x544F_4E46;

pub const EMR_COMMENT_WINDOWS_METAFILE: u32 = 0x8000_0001;
pub const EMR_COMMENT_BEGINGROUP: u32 = 0x0000_0002;
pub const EMR_COMMENT_ENDGROUP: u32 = 0x0000_0003;
pub const EMR_COMMENT_MULTIFORMATS: u32 = 0x4000_0004;

/// Envelope + `DataSize`.
const COMMENT_FIXED_SIZE: u32 = 12;
/// EMF+ record header: type, flags, size, data size.
const EMF_PLUS_HEADER_SIZE: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    EmfPlus(Vec<EmfPlusRecord>),
    EmfSpool(Vec<u8>),
    Public(PublicComment),
    Private(Vec<u8>),
}

/// One record embedded in an EMF+ comment. The payload is kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfPlusRecord {
    pub record_type: u16,
    pub flags: u16,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicComment {
    WindowsMetafile(WindowsMetafileComment),
    BeginGroup { rectangle: RectL, description: String },
    EndGroup,
    MultiFormats { output_rect: RectL, formats: Vec<MultiFormat> },
    Unknown { identifier: u32, data: Vec<u8> },
}

/// A WMF embedded in an EMF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsMetafileComment {
    pub version: u16,
    pub checksum: u32,
    pub flags: u32,
    pub metafile: Vec<u8>,
}

u32_enum! {
    /// Payload kind of one [`MultiFormat`] entry.
    FormatSignature, "format signature" {
        Enhmeta = 0x464D_4520,
        Eps = 0x4653_5045,
    }
}

/// One alternative picture in an `EMR_COMMENT_MULTIFORMATS` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFormat {
    pub signature: FormatSignature,
    pub version: u32,
    pub data: Vec<u8>,
}

/// Fixed part of a format descriptor, before its payload is fetched.
struct FormatEntry {
    signature: FormatSignature,
    version: u32,
    size_data: u32,
    off_data: u32,
}

impl Decode for FormatEntry {
    const SIZE: usize = 16;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(FormatEntry {
            signature: cursor.read()?,
            version: cursor.read()?,
            size_data: cursor.read()?,
            off_data: cursor.read()?,
        })
    }
}

pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Comment> {
    let envelope = Envelope::read(cursor, RecordType::Comment, COMMENT_FIXED_SIZE)?;
    let data_size: u32 = cursor.read()?;
    if u64::from(COMMENT_FIXED_SIZE) + u64::from(data_size) > u64::from(envelope.size()) {
        return Err(EmfError::size(
            envelope.start(),
            format!("comment data of {data_size} bytes exceeds record size {}", envelope.size()),
        ));
    }

    let data = CommentData {
        envelope,
        start: cursor.position(),
        size: data_size,
    };
    let identifier = if data_size >= 4 { Some(cursor.peek::<u32>()?) } else { None };
    let comment = match identifier {
        Some(EMR_COMMENT_EMFPLUS) => Comment::EmfPlus(decode_emf_plus(cursor, &data)?),
        Some(EMR_COMMENT_EMFSPOOL) => Comment::EmfSpool(decode_emf_spool(cursor, &data)?),
        Some(EMR_COMMENT_PUBLIC) => Comment::Public(decode_public(cursor, &data)?),
        _ => Comment::Private(cursor.read_bytes(data_size as usize)?),
    };
    tracing::debug!(identifier = ?identifier, data_size, "comment");

    data.finish(cursor)?;
    cursor.read_alignment_padding(envelope.start())?;
    envelope.finish(cursor)?;
    Ok(comment)
}

/// The `DataSize` bytes following the comment's fixed prefix.
struct CommentData {
    envelope: Envelope,
    /// Absolute offset of the comment identifier.
    start: usize,
    size: u32,
}

impl CommentData {
    fn consumed(&self, cursor: &ByteCursor<'_>) -> u64 {
        cursor.position().saturating_sub(self.start) as u64
    }

    fn remaining(&self, cursor: &ByteCursor<'_>) -> u64 {
        u64::from(self.size).saturating_sub(self.consumed(cursor))
    }

    /// Record-relative offset of the comment identifier.
    fn record_offset(&self) -> u64 {
        (self.start - self.envelope.start()) as u64
    }

    fn require(&self, cursor: &ByteCursor<'_>, needed: u64, what: &str) -> Result<()> {
        if self.remaining(cursor) < needed {
            return Err(EmfError::size(
                self.envelope.start(),
                format!("{what} needs {needed} bytes, comment data has {} left", self.remaining(cursor)),
            ));
        }
        Ok(())
    }

    fn finish(&self, cursor: &ByteCursor<'_>) -> Result<()> {
        let consumed = self.consumed(cursor);
        if cursor.position() < self.start || consumed != u64::from(self.size) {
            return Err(EmfError::size(
                self.envelope.start(),
                format!("comment decoded {consumed} bytes of DataSize {}", self.size),
            ));
        }
        Ok(())
    }
}

fn decode_emf_plus(cursor: &mut ByteCursor<'_>, data: &CommentData) -> Result<Vec<EmfPlusRecord>> {
    cursor.skip(4)?;
    let mut records = Vec::new();
    while data.remaining(cursor) > 0 {
        let position = cursor.position();
        data.require(cursor, EMF_PLUS_HEADER_SIZE.into(), "EMF+ record header")?;
        let record_type: u16 = cursor.read()?;
        let flags: u16 = cursor.read()?;
        let size: u32 = cursor.read()?;
        let data_size: u32 = cursor.read()?;
        if size < EMF_PLUS_HEADER_SIZE || size % 4 != 0 {
            return Err(EmfError::size(position, format!("EMF+ record size {size}")));
        }
        if data_size > size - EMF_PLUS_HEADER_SIZE {
            return Err(EmfError::size(
                position,
                format!("EMF+ data size {data_size} exceeds record size {size}"),
            ));
        }
        let body = u64::from(size - EMF_PLUS_HEADER_SIZE);
        data.require(cursor, body, "EMF+ record body")?;
        let payload = cursor.read_bytes(data_size as usize)?;
        cursor.skip((size - EMF_PLUS_HEADER_SIZE - data_size) as usize)?;
        records.push(EmfPlusRecord {
            record_type,
            flags,
            data: payload,
        });
    }
    Ok(records)
}

fn decode_emf_spool(cursor: &mut ByteCursor<'_>, data: &CommentData) -> Result<Vec<u8>> {
    data.require(cursor, 8, "spool comment")?;
    cursor.skip(4)?;
    let position = cursor.position();
    let spool_identifier: u32 = cursor.read()?;
    if spool_identifier != EMFSPOOL_RECORD_IDENTIFIER {
        return Err(EmfError::enum_value(position, "spool record identifier", spool_identifier));
    }
    cursor.read_bytes(data.remaining(cursor) as usize)
}

fn decode_public(cursor: &mut ByteCursor<'_>, data: &CommentData) -> Result<PublicComment> {
    data.require(cursor, 8, "public comment")?;
    cursor.skip(4)?;
    let identifier: u32 = cursor.peek()?;
    let comment = match identifier {
        EMR_COMMENT_WINDOWS_METAFILE => {
            cursor.skip(4)?;
            PublicComment::WindowsMetafile(decode_windows_metafile(cursor, data)?)
        }
        EMR_COMMENT_BEGINGROUP => {
            cursor.skip(4)?;
            data.require(cursor, RectL::SIZE as u64 + 4, "begin-group comment")?;
            let rectangle = cursor.read()?;
            let n_description: u32 = cursor.read()?;
            data.require(cursor, u64::from(n_description) * 2, "group description")?;
            let description = cursor.read_utf16(n_description as usize)?;
            PublicComment::BeginGroup {
                rectangle,
                description,
            }
        }
        EMR_COMMENT_ENDGROUP => {
            cursor.skip(4)?;
            PublicComment::EndGroup
        }
        EMR_COMMENT_MULTIFORMATS => {
            cursor.skip(4)?;
            decode_multiformats(cursor, data)?
        }
        _ => {
            cursor.skip(4)?;
            PublicComment::Unknown {
                identifier,
                data: cursor.read_bytes(data.remaining(cursor) as usize)?,
            }
        }
    };
    Ok(comment)
}

fn decode_windows_metafile(cursor: &mut ByteCursor<'_>, data: &CommentData) -> Result<WindowsMetafileComment> {
    data.require(cursor, 16, "windows metafile comment")?;
    let position = cursor.position();
    let version: u16 = cursor.read()?;
    if version != 0x0100 && version != 0x0300 {
        return Err(EmfError::enum_value(position, "metafile version", version.into()));
    }
    let _reserved: u16 = cursor.read()?;
    let checksum = cursor.read()?;
    let flags = cursor.read()?;
    let metafile_size: u32 = cursor.read()?;
    data.require(cursor, metafile_size.into(), "embedded metafile")?;
    Ok(WindowsMetafileComment {
        version,
        checksum,
        flags,
        metafile: cursor.read_bytes(metafile_size as usize)?,
    })
}

/// Format payloads sit at `offData` bytes from the comment identifier, after the descriptor
/// table and within the comment data. Bytes of the comment data not covered by a payload are
/// skipped.
fn decode_multiformats(cursor: &mut ByteCursor<'_>, data: &CommentData) -> Result<PublicComment> {
    data.require(cursor, RectL::SIZE as u64 + 4, "multi-formats comment")?;
    let output_rect = cursor.read()?;
    let count: u32 = cursor.read()?;
    data.require(cursor, u64::from(count) * FormatEntry::SIZE as u64, "format descriptors")?;
    let entries: Vec<FormatEntry> = cursor.read_array(count as usize)?;

    let base = data.record_offset();
    let table_end = data.envelope.consumed(cursor) as u64;
    let data_end = base + u64::from(data.size);
    let mut formats = Vec::with_capacity(entries.len());
    for entry in entries {
        let offset = base + u64::from(entry.off_data);
        let len = u64::from(entry.size_data);
        data.envelope.seek_range(cursor, offset, len, table_end, data_end)?;
        formats.push(MultiFormat {
            signature: entry.signature,
            version: entry.version,
            data: cursor.read_bytes(entry.size_data as usize)?,
        });
    }
    data.envelope.seek(cursor, data_end)?;

    Ok(PublicComment::MultiFormats {
        output_rect,
        formats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn comment(data: &[u8]) -> Vec<u8> {
        let size = (12 + data.len()).next_multiple_of(4) as u32;
        let mut v = Vec::new();
        for x in [70, size, data.len() as u32] {
            v.extend_from_slice(&x.to_le_bytes());
        }
        v.extend_from_slice(data);
        v.resize(size as usize, 0);
        v
    }

    fn words(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn short_data_is_private() {
        let data = comment(&[1, 2, 3]);
        let mut c = ByteCursor::new(&data);
        assert_eq!(decode(&mut c).unwrap(), Comment::Private(vec![1, 2, 3]));
        assert!(c.is_at_end());
    }

    #[test]
    fn emf_plus_records_fill_data() {
        let mut body = words(&[EMR_COMMENT_EMFPLUS]);
        body.extend_from_slice(&0x4001u16.to_le_bytes());
        body.extend_from_slice(&1u16.to_le_bytes());
        body.extend_from_slice(&words(&[16, 2]));
        body.extend_from_slice(&[0xaa, 0xbb, 0, 0]);
        let data = comment(&body);
        let decoded = decode(&mut ByteCursor::new(&data)).unwrap();
        assert_eq!(
            decoded,
            Comment::EmfPlus(vec![EmfPlusRecord {
                record_type: 0x4001,
                flags: 1,
                data: vec![0xaa, 0xbb],
            }])
        );
    }

    #[test]
    fn emf_plus_record_overrunning_comment_is_corrupt() {
        let mut body = words(&[EMR_COMMENT_EMFPLUS]);
        body.extend_from_slice(&0x4001u16.to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&words(&[20, 0]));
        let data = comment(&body);
        let err = decode(&mut ByteCursor::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptSize);
    }

    #[test]
    fn spool_needs_second_identifier() {
        let data = comment(&words(&[EMR_COMMENT_EMFSPOOL, EMFSPOOL_RECORD_IDENTIFIER, 7]));
        assert_eq!(
            decode(&mut ByteCursor::new(&data)).unwrap(),
            Comment::EmfSpool(words(&[7]))
        );

        let data = comment(&words(&[EMR_COMMENT_EMFSPOOL, 1]));
        let err = decode(&mut ByteCursor::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptEnumValue);
    }

    #[test]
    fn public_comment_shorter_than_two_identifiers() {
        let data = comment(&words(&[EMR_COMMENT_PUBLIC]));
        let err = decode(&mut ByteCursor::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptSize);
    }

    #[test]
    fn multiformats_payload_by_offset() {
        // identifier, sub-id, rect (16), count, one descriptor (16), payload (4)
        let mut body = words(&[EMR_COMMENT_PUBLIC, EMR_COMMENT_MULTIFORMATS, 0, 0, 10, 10, 1]);
        body.extend_from_slice(&words(&[0x464D_4520, 0x10000, 4, 44]));
        body.extend_from_slice(&[9, 8, 7, 6]);
        let data = comment(&body);
        let mut c = ByteCursor::new(&data);
        let Comment::Public(PublicComment::MultiFormats { formats, .. }) = decode(&mut c).unwrap() else {
            panic!("expected multi-formats comment");
        };
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].signature, FormatSignature::Enhmeta);
        assert_eq!(formats[0].data, vec![9, 8, 7, 6]);
        assert!(c.is_at_end());
    }

    #[test]
    fn multiformats_payload_outside_data() {
        let mut body = words(&[EMR_COMMENT_PUBLIC, EMR_COMMENT_MULTIFORMATS, 0, 0, 10, 10, 1]);
        body.extend_from_slice(&words(&[0x464D_4520, 0x10000, 8, 44]));
        body.extend_from_slice(&[9, 8, 7, 6]);
        let data = comment(&body);
        let err = decode(&mut ByteCursor::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptOffset);
    }

    #[test]
    fn data_size_past_record() {
        let mut data = comment(&[0; 8]);
        data[8..12].copy_from_slice(&16u32.to_le_bytes());
        let err = decode(&mut ByteCursor::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptSize);
    }
}
