//! `EMR_EOF`: the terminal record, carrying an optional palette located by offset.
//!
//! Layout: envelope, `nPalEntries`, `offPalEntries`, palette entries at `offPalEntries`, and
//! `SizeLast` in the final four bytes. Bytes between the fixed fields, the palette and
//! `SizeLast` are undefined and skipped.

use crate::cursor::{ByteCursor, Decode};
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;
use crate::types::LogPaletteEntry;

/// Envelope + `nPalEntries` + `offPalEntries`.
const EOF_FIXED_PREFIX: u32 = 16;
/// Fixed prefix + `SizeLast`.
const EOF_MIN_SIZE: u32 = EOF_FIXED_PREFIX + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eof {
    pub off_pal_entries: u32,
    pub palette: Vec<LogPaletteEntry>,
    /// Copy of the record size stored at the end of the record.
    pub size_last: u32,
}

pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Eof> {
    let envelope = Envelope::read(cursor, RecordType::Eof, EOF_MIN_SIZE)?;
    let n_pal_entries: u32 = cursor.read()?;
    let off_pal_entries: u32 = cursor.read()?;
    let size_last_offset = u64::from(envelope.size() - 4);

    let palette = if n_pal_entries != 0 {
        let len = u64::from(n_pal_entries) * LogPaletteEntry::SIZE as u64;
        envelope.seek_range(
            cursor,
            off_pal_entries.into(),
            len,
            EOF_FIXED_PREFIX.into(),
            size_last_offset,
        )?;
        cursor.read_array(n_pal_entries as usize)?
    } else {
        Vec::new()
    };

    envelope.seek(cursor, size_last_offset)?;
    let size_last: u32 = cursor.read()?;
    if size_last != envelope.size() {
        return Err(EmfError::size(
            envelope.start(),
            format!("SizeLast {size_last} differs from record size {}", envelope.size()),
        ));
    }
    envelope.finish(cursor)?;

    Ok(Eof {
        off_pal_entries,
        palette,
        size_last,
    })
}
