//! Graphics-state records: mapping mode, background mode, saved states and world transforms.

use crate::cursor::{ByteCursor, Decode};
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::RecordType;
use crate::types::XForm;

u32_enum! {
    /// Logical-to-device mapping mode (`EMR_SETMAPMODE`).
    MapMode, "map mode" {
        Text = 1,
        LoMetric = 2,
        HiMetric = 3,
        LoEnglish = 4,
        HiEnglish = 5,
        Twips = 6,
        Isotropic = 7,
        Anisotropic = 8,
    }
}

u32_enum! {
    /// Background mix mode (`EMR_SETBKMODE`).
    BackgroundMode, "background mode" {
        Transparent = 1,
        Opaque = 2,
    }
}

u32_enum! {
    /// How `EMR_MODIFYWORLDTRANSFORM` combines its transform with the current one.
    TransformMode, "world transform mode" {
        Identity = 1,
        LeftMultiply = 2,
        RightMultiply = 3,
        Set = 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifyWorldTransform {
    pub xform: XForm,
    pub mode: TransformMode,
}

impl Decode for ModifyWorldTransform {
    const SIZE: usize = XForm::SIZE + TransformMode::SIZE;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(ModifyWorldTransform {
            xform: cursor.read()?,
            mode: cursor.read()?,
        })
    }
}

/// `EMR_RESTOREDC`: the saved-state index is relative and must be negative.
pub(crate) fn decode_restore_dc(cursor: &mut ByteCursor<'_>) -> Result<i32> {
    let envelope = Envelope::read(cursor, RecordType::RestoreDc, 12)?;
    let position = cursor.position();
    let saved_dc: i32 = cursor.read()?;
    if saved_dc >= 0 {
        return Err(EmfError::enum_value(position, "saved DC index", saved_dc as u32));
    }
    envelope.finish(cursor)?;
    Ok(saved_dc)
}
