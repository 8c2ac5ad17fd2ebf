//! `EMR_HEADER` and header-version detection.
//!
//! The header comes in three overlapping shapes that share a tag:
//!
//! | Layout | Fixed size | Adds |
//! |--------|-----------:|------|
//! | base | 88 | bounds, frame, signature, counts, description and palette fields, device sizes |
//! | extension 1 | 100 | `cbPixelFormat`, `offPixelFormat`, `bOpenGL` |
//! | extension 2 | 108 | micrometre device size |
//!
//! Which one a file uses is not stored anywhere. It is derived from where the variable data
//! starts: the fixed part ends no later than the description string, and no later than the
//! pixel-format block when extension 1 fits in front of it. See [`detect_header_size`].
//!
//! The description and the pixel-format block are located by offset fields. Both must lie
//! between the end of the fixed part and the end of the record, in either order, without
//! overlapping; they are checked before the cursor moves to either.

use crate::cursor::{ByteCursor, Decode};
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;
use crate::types::{PixelFormatDescriptor, RectL, SizeL};

/// `" EMF"` in little-endian.
pub const ENHMETA_SIGNATURE: u32 = 0x464D_4520;

pub const BASE_HEADER_SIZE: u32 = 88;
pub const EXTENSION1_HEADER_SIZE: u32 = 100;
pub const EXTENSION2_HEADER_SIZE: u32 = 108;

/// Which of the three header shapes a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderLayout {
    Base,
    Extension1,
    Extension2,
}

impl HeaderLayout {
    /// Layout implied by a computed header size.
    pub fn from_header_size(header_size: u32) -> Self {
        if header_size >= EXTENSION2_HEADER_SIZE {
            HeaderLayout::Extension2
        } else if header_size >= EXTENSION1_HEADER_SIZE {
            HeaderLayout::Extension1
        } else {
            HeaderLayout::Base
        }
    }

    pub fn fixed_size(self) -> u32 {
        match self {
            HeaderLayout::Base => BASE_HEADER_SIZE,
            HeaderLayout::Extension1 => EXTENSION1_HEADER_SIZE,
            HeaderLayout::Extension2 => EXTENSION2_HEADER_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderExtension1 {
    pub cb_pixel_format: u32,
    pub off_pixel_format: u32,
    pub opengl: bool,
}

impl Decode for HeaderExtension1 {
    const SIZE: usize = 12;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(HeaderExtension1 {
            cb_pixel_format: cursor.read()?,
            off_pixel_format: cursor.read()?,
            opengl: cursor.read::<u32>()? != 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderExtension2 {
    pub micrometers_x: u32,
    pub micrometers_y: u32,
}

impl Decode for HeaderExtension2 {
    const SIZE: usize = 8;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(HeaderExtension2 {
            micrometers_x: cursor.read()?,
            micrometers_y: cursor.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Inclusive bounds of the drawing, in device units.
    pub bounds: RectL,
    /// Picture frame, in 0.01 mm units.
    pub frame: RectL,
    pub version: u32,
    /// Size of the whole metafile in bytes, as declared.
    pub bytes: u32,
    /// Number of records, as declared.
    pub records: u32,
    pub handles: u16,
    pub reserved: u16,
    pub n_description: u32,
    pub off_description: u32,
    pub n_pal_entries: u32,
    /// Reference device size in pixels.
    pub device: SizeL,
    /// Reference device size in millimetres.
    pub millimeters: SizeL,
    pub extension1: Option<HeaderExtension1>,
    pub extension2: Option<HeaderExtension2>,
    pub description: Option<String>,
    pub pixel_format: Option<PixelFormatDescriptor>,
}

impl Header {
    pub fn layout(&self) -> HeaderLayout {
        match (self.extension1, self.extension2) {
            (Some(_), Some(_)) => HeaderLayout::Extension2,
            (Some(_), None) => HeaderLayout::Extension1,
            _ => HeaderLayout::Base,
        }
    }
}

/// Fixed base fields, read before the layout is known.
struct BaseFields {
    bounds: RectL,
    frame: RectL,
    version: u32,
    bytes: u32,
    records: u32,
    handles: u16,
    reserved: u16,
    n_description: u32,
    off_description: u32,
    n_pal_entries: u32,
    device: SizeL,
    millimeters: SizeL,
}

pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Header> {
    let envelope = Envelope::read(cursor, RecordType::Header, BASE_HEADER_SIZE)?;
    let base = read_base_fields(cursor)?;

    let header_size = detect_header_size(cursor, envelope.size(), base.n_description, base.off_description)?;
    let layout = HeaderLayout::from_header_size(header_size);
    tracing::debug!(header_size, ?layout, "header layout");

    let extension1 = match layout {
        HeaderLayout::Base => None,
        _ => Some(cursor.read::<HeaderExtension1>()?),
    };
    let extension2 = match layout {
        HeaderLayout::Extension2 => Some(cursor.read::<HeaderExtension2>()?),
        _ => None,
    };

    let fixed_end = u64::from(layout.fixed_size());
    let record_size = u64::from(envelope.size());
    let description_range = (base.n_description != 0 && base.off_description != 0)
        .then(|| (u64::from(base.off_description), u64::from(base.n_description) * 2));
    let pixel_format_range = match extension1 {
        Some(ext) if ext.cb_pixel_format != 0 && ext.off_pixel_format != 0 => {
            if ext.cb_pixel_format as usize != PixelFormatDescriptor::SIZE {
                return Err(EmfError::size(
                    envelope.start(),
                    format!("pixel format block of {} bytes", ext.cb_pixel_format),
                ));
            }
            Some((u64::from(ext.off_pixel_format), u64::from(ext.cb_pixel_format)))
        }
        _ => None,
    };
    for (offset, len) in description_range.iter().chain(pixel_format_range.iter()) {
        envelope.check_range(*offset, *len, fixed_end, record_size)?;
    }
    if let (Some(a), Some(b)) = (description_range, pixel_format_range) {
        check_disjoint(&envelope, a, b)?;
    }

    let description = match description_range {
        Some((offset, _)) => {
            envelope.seek(cursor, offset)?;
            Some(cursor.read_utf16(base.n_description as usize)?)
        }
        None => None,
    };
    let pixel_format = match pixel_format_range {
        Some((offset, _)) => {
            envelope.seek(cursor, offset)?;
            Some(cursor.read::<PixelFormatDescriptor>()?)
        }
        None => None,
    };

    let data_end = description_range
        .iter()
        .chain(pixel_format_range.iter())
        .map(|(offset, len)| offset + len)
        .fold(fixed_end, u64::max);
    envelope.seek(cursor, data_end)?;
    cursor.read_alignment_padding(envelope.start())?;
    envelope.finish(cursor)?;

    Ok(Header {
        bounds: base.bounds,
        frame: base.frame,
        version: base.version,
        bytes: base.bytes,
        records: base.records,
        handles: base.handles,
        reserved: base.reserved,
        n_description: base.n_description,
        off_description: base.off_description,
        n_pal_entries: base.n_pal_entries,
        device: base.device,
        millimeters: base.millimeters,
        extension1,
        extension2,
        description,
        pixel_format,
    })
}

/// Description and pixel-format ranges, both already inside the record, must not share a byte.
fn check_disjoint(envelope: &Envelope, a: (u64, u64), b: (u64, u64)) -> Result<()> {
    let (first, second) = if a.0 <= b.0 { (a, b) } else { (b, a) };
    let first_end = first.0 + first.1;
    if second.0 < first_end {
        return Err(EmfError::CorruptOffset {
            position: envelope.start(),
            offset: second.0,
            len: second.1,
            floor: first_end,
            limit: envelope.size().into(),
        });
    }
    Ok(())
}

fn read_base_fields(cursor: &mut ByteCursor<'_>) -> Result<BaseFields> {
    let bounds = cursor.read()?;
    let frame = cursor.read()?;
    let signature_position = cursor.position();
    let signature: u32 = cursor.read()?;
    if signature != ENHMETA_SIGNATURE {
        return Err(EmfError::enum_value(signature_position, "header signature", signature));
    }
    Ok(BaseFields {
        bounds,
        frame,
        version: cursor.read()?,
        bytes: cursor.read()?,
        records: cursor.read()?,
        handles: cursor.read()?,
        reserved: cursor.read()?,
        n_description: cursor.read()?,
        off_description: cursor.read()?,
        n_pal_entries: cursor.read()?,
        device: cursor.read()?,
        millimeters: cursor.read()?,
    })
}

/// Size of the fixed part of the header. The cursor must sit just past the base fields; it
/// is not moved.
///
/// Starts at the declared record size, is clamped to `offDescription` when the description
/// fits in the record, then to `offPixelFormat` when extension 1 still fits and the
/// pixel-format block lies in the record in front of the current value.
pub fn detect_header_size(
    cursor: &ByteCursor<'_>,
    record_size: u32,
    n_description: u32,
    off_description: u32,
) -> Result<u32> {
    let size = u64::from(record_size);
    let mut header_size = record_size;

    let description_end = u64::from(off_description) + u64::from(n_description) * 2;
    if off_description >= BASE_HEADER_SIZE && description_end <= size {
        header_size = off_description;
    }

    if header_size >= EXTENSION1_HEADER_SIZE {
        let cb_pixel_format: u32 = cursor.peek()?;
        let off_pixel_format: u32 = cursor.peek_at(4)?;
        let pixel_format_end = u64::from(off_pixel_format) + u64::from(cb_pixel_format);
        if off_pixel_format >= EXTENSION1_HEADER_SIZE
            && pixel_format_end <= size
            && off_pixel_format < header_size
        {
            header_size = off_pixel_format;
        }
    }

    Ok(header_size)
}
