//! Object-table records: brush creation, selection and deletion.

use crate::cursor::{ByteCursor, Decode};
use crate::error::{EmfError, Result};
use crate::types::ColorRef;

/// Index into the playback object table. Index 0 is reserved for the metafile itself and is
/// rejected; indices with the high bit set name stock objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIndex(pub u32);

impl ObjectIndex {
    const STOCK_OBJECT_FLAG: u32 = 0x8000_0000;

    pub fn is_stock_object(self) -> bool {
        self.0 & Self::STOCK_OBJECT_FLAG != 0
    }
}

impl Decode for ObjectIndex {
    const SIZE: usize = 4;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let position = cursor.position();
        let index: u32 = cursor.read()?;
        if index == 0 {
            return Err(EmfError::enum_value(position, "object index", index));
        }
        Ok(ObjectIndex(index))
    }
}

u32_enum! {
    /// `LogBrush` style.
    BrushStyle, "brush style" {
        Solid = 0,
        Null = 1,
        Hatched = 2,
        Pattern = 3,
        Indexed = 4,
        DibPattern = 5,
        DibPatternPt = 6,
        Pattern8x8 = 7,
        DibPattern8x8 = 8,
        MonoPattern = 9,
    }
}

/// `LogBrush`: style, colour and hatch. The hatch value is only meaningful for
/// [`BrushStyle::Hatched`] and is kept raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogBrush {
    pub style: BrushStyle,
    pub color: ColorRef,
    pub hatch: u32,
}

impl Decode for LogBrush {
    const SIZE: usize = 12;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(LogBrush {
            style: cursor.read()?,
            color: cursor.read()?,
            hatch: cursor.read()?,
        })
    }
}

/// `EMR_CREATEBRUSHINDIRECT` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateBrushIndirect {
    pub index: ObjectIndex,
    pub brush: LogBrush,
}

impl Decode for CreateBrushIndirect {
    const SIZE: usize = ObjectIndex::SIZE + LogBrush::SIZE;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(CreateBrushIndirect {
            index: cursor.read()?,
            brush: cursor.read()?,
        })
    }
}
