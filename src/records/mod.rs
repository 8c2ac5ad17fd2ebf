//! Decoded records and the tag dispatcher.
//!
//! [`Record::decode`] peeks the tag at the cursor and hands the cursor to the decoder for that
//! tag. Every decoder follows the same envelope protocol (see [`crate::envelope`]), so on
//! success the cursor always sits on the next record's envelope. Tags without a decoder go
//! through the opaque decoder, which validates the envelope and keeps a copy of the body.

/// Closed `u32` enumeration read as a record field; values outside the set are
/// `CorruptEnumValue`.
macro_rules! u32_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident = $value:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($variant = $value),*
        }

        impl $name {
            pub fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl $crate::cursor::Decode for $name {
            const SIZE: usize = 4;

            fn decode(cursor: &mut $crate::cursor::ByteCursor<'_>) -> $crate::error::Result<Self> {
                let position = cursor.position();
                let raw: u32 = cursor.read()?;
                $name::from_u32(raw)
                    .ok_or($crate::error::EmfError::enum_value(position, $field, raw))
            }
        }
    };
}

pub mod comment;
pub mod drawing;
pub mod eof;
pub mod header;
pub mod object;
pub mod state;

use crate::cursor::{ByteCursor, Decode};
use crate::envelope::{Envelope, ENVELOPE_SIZE};
use crate::error::Result;
use crate::record_type::RecordType;
use crate::types::{ColorRef, PointL, RectL, SizeL, XForm};

pub use comment::{Comment, EmfPlusRecord, FormatSignature, MultiFormat, PublicComment, WindowsMetafileComment};
pub use drawing::Polyline16;
pub use eof::Eof;
pub use header::{Header, HeaderExtension1, HeaderExtension2, HeaderLayout};
pub use object::{BrushStyle, CreateBrushIndirect, LogBrush, ObjectIndex};
pub use state::{BackgroundMode, MapMode, ModifyWorldTransform, TransformMode};

/// One decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Header(Header),
    Eof(Eof),
    Comment(Comment),
    SetWindowExtEx(SizeL),
    SetWindowOrgEx(PointL),
    SetViewportExtEx(SizeL),
    SetViewportOrgEx(PointL),
    SetMapMode(MapMode),
    SetBkMode(BackgroundMode),
    SetTextColor(ColorRef),
    MoveToEx(PointL),
    IntersectClipRect(RectL),
    SaveDc,
    /// Relative saved-state index, always negative.
    RestoreDc(i32),
    SetWorldTransform(XForm),
    ModifyWorldTransform(ModifyWorldTransform),
    SelectObject(ObjectIndex),
    CreateBrushIndirect(CreateBrushIndirect),
    DeleteObject(ObjectIndex),
    Rectangle(RectL),
    LineTo(PointL),
    Polyline16(Polyline16),
    /// Record whose tag has no decoder; the body is kept verbatim.
    Unknown { record_type: u32, data: Vec<u8> },
}

impl Record {
    /// Decode the record at the cursor, dispatching on its tag.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Record> {
        let tag = Envelope::peek_type(cursor)?;
        let Some(record_type) = RecordType::from_u32(tag) else {
            return decode_unknown(cursor);
        };
        let record = match record_type {
            RecordType::Header => Record::Header(header::decode(cursor)?),
            RecordType::Eof => Record::Eof(eof::decode(cursor)?),
            RecordType::Comment => Record::Comment(comment::decode(cursor)?),
            RecordType::SetWindowExtEx => Record::SetWindowExtEx(decode_single(cursor, record_type)?),
            RecordType::SetWindowOrgEx => Record::SetWindowOrgEx(decode_single(cursor, record_type)?),
            RecordType::SetViewportExtEx => Record::SetViewportExtEx(decode_single(cursor, record_type)?),
            RecordType::SetViewportOrgEx => Record::SetViewportOrgEx(decode_single(cursor, record_type)?),
            RecordType::SetMapMode => Record::SetMapMode(decode_single(cursor, record_type)?),
            RecordType::SetBkMode => Record::SetBkMode(decode_single(cursor, record_type)?),
            RecordType::SetTextColor => Record::SetTextColor(decode_single(cursor, record_type)?),
            RecordType::MoveToEx => Record::MoveToEx(decode_single(cursor, record_type)?),
            RecordType::IntersectClipRect => Record::IntersectClipRect(decode_single(cursor, record_type)?),
            RecordType::SaveDc => {
                decode_empty(cursor, record_type)?;
                Record::SaveDc
            }
            RecordType::RestoreDc => Record::RestoreDc(state::decode_restore_dc(cursor)?),
            RecordType::SetWorldTransform => Record::SetWorldTransform(decode_single(cursor, record_type)?),
            RecordType::ModifyWorldTransform => {
                Record::ModifyWorldTransform(decode_single(cursor, record_type)?)
            }
            RecordType::SelectObject => Record::SelectObject(decode_single(cursor, record_type)?),
            RecordType::CreateBrushIndirect => {
                Record::CreateBrushIndirect(decode_single(cursor, record_type)?)
            }
            RecordType::DeleteObject => Record::DeleteObject(decode_single(cursor, record_type)?),
            RecordType::Rectangle => Record::Rectangle(decode_single(cursor, record_type)?),
            RecordType::LineTo => Record::LineTo(decode_single(cursor, record_type)?),
            RecordType::Polyline16 => Record::Polyline16(drawing::decode_polyline16(cursor)?),
            _ => decode_unknown(cursor)?,
        };
        Ok(record)
    }

    /// Raw type tag of this record.
    pub fn record_type(&self) -> u32 {
        let ty = match self {
            Record::Header(_) => RecordType::Header,
            Record::Eof(_) => RecordType::Eof,
            Record::Comment(_) => RecordType::Comment,
            Record::SetWindowExtEx(_) => RecordType::SetWindowExtEx,
            Record::SetWindowOrgEx(_) => RecordType::SetWindowOrgEx,
            Record::SetViewportExtEx(_) => RecordType::SetViewportExtEx,
            Record::SetViewportOrgEx(_) => RecordType::SetViewportOrgEx,
            Record::SetMapMode(_) => RecordType::SetMapMode,
            Record::SetBkMode(_) => RecordType::SetBkMode,
            Record::SetTextColor(_) => RecordType::SetTextColor,
            Record::MoveToEx(_) => RecordType::MoveToEx,
            Record::IntersectClipRect(_) => RecordType::IntersectClipRect,
            Record::SaveDc => RecordType::SaveDc,
            Record::RestoreDc(_) => RecordType::RestoreDc,
            Record::SetWorldTransform(_) => RecordType::SetWorldTransform,
            Record::ModifyWorldTransform(_) => RecordType::ModifyWorldTransform,
            Record::SelectObject(_) => RecordType::SelectObject,
            Record::CreateBrushIndirect(_) => RecordType::CreateBrushIndirect,
            Record::DeleteObject(_) => RecordType::DeleteObject,
            Record::Rectangle(_) => RecordType::Rectangle,
            Record::LineTo(_) => RecordType::LineTo,
            Record::Polyline16(_) => RecordType::Polyline16,
            Record::Unknown { record_type, .. } => return *record_type,
        };
        ty.into()
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Record::Eof(_))
    }
}

/// Record whose body is exactly one fixed-size value.
fn decode_single<T: Decode>(cursor: &mut ByteCursor<'_>, record_type: RecordType) -> Result<T> {
    let envelope = Envelope::read(cursor, record_type, ENVELOPE_SIZE + T::SIZE as u32)?;
    let value = cursor.read()?;
    envelope.finish(cursor)?;
    Ok(value)
}

/// Record with no body.
fn decode_empty(cursor: &mut ByteCursor<'_>, record_type: RecordType) -> Result<()> {
    let envelope = Envelope::read(cursor, record_type, ENVELOPE_SIZE)?;
    envelope.finish(cursor)
}

fn decode_unknown(cursor: &mut ByteCursor<'_>) -> Result<Record> {
    let envelope = Envelope::read_any(cursor, ENVELOPE_SIZE)?;
    let data = cursor.read_bytes(envelope.size() as usize - ENVELOPE_SIZE as usize)?;
    envelope.finish(cursor)?;
    Ok(Record::Unknown {
        record_type: envelope.record_type(),
        data,
    })
}
