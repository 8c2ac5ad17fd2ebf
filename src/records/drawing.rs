//! Drawing records with a variable-length point array.
//!
//! The fixed-schema drawing records (`MoveToEx`, `LineTo`, `Rectangle`, ...) go through the
//! single-value path in [`Record::decode`](super::Record::decode); only the ones whose size
//! depends on a count field live here.

use crate::cursor::ByteCursor;
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;
use crate::types::{PointS, RectL};

/// Bounds (16) + count (4) after the envelope.
const POLYLINE16_FIXED_SIZE: u32 = 28;

/// `EMR_POLYLINE16`: connected line segments with 16-bit coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyline16 {
    pub bounds: RectL,
    pub points: Vec<PointS>,
}

pub(crate) fn decode_polyline16(cursor: &mut ByteCursor<'_>) -> Result<Polyline16> {
    let envelope = Envelope::read(cursor, RecordType::Polyline16, POLYLINE16_FIXED_SIZE)?;
    let bounds = cursor.read()?;
    let count: u32 = cursor.read()?;
    let expected = u64::from(POLYLINE16_FIXED_SIZE) + u64::from(count) * 4;
    if expected != u64::from(envelope.size()) {
        return Err(EmfError::size(
            envelope.start(),
            format!("{count} points need {expected} bytes, record declares {}", envelope.size()),
        ));
    }
    let points = cursor.read_array(count as usize)?;
    envelope.finish(cursor)?;
    Ok(Polyline16 { bounds, points })
}
