//! Fixed-size value types shared by record bodies: points, sizes, rectangles, transforms,
//! colours and palette entries.

use crate::cursor::{ByteCursor, Decode};
use crate::error::Result;

/// 32-bit signed point (`PointL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointL {
    pub x: i32,
    pub y: i32,
}

/// 16-bit signed point (`PointS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointS {
    pub x: i16,
    pub y: i16,
}

/// Extent in logical units (`SizeL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeL {
    pub cx: i32,
    pub cy: i32,
}

/// Inclusive-exclusive rectangle (`RectL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectL {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// 2-D affine transform (`XForm`): `x' = m11*x + m21*y + dx`, `y' = m12*x + m22*y + dy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XForm {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub dx: f32,
    pub dy: f32,
}

/// RGB colour (`ColorRef`), stored red, green, blue, reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorRef {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub reserved: u8,
}

/// Palette entry (`LogPaletteEntry`), stored reserved, blue, green, red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogPaletteEntry {
    pub reserved: u8,
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

/// OpenGL pixel format (`PixelFormatDescriptor`), 40 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelFormatDescriptor {
    pub size: u16,
    pub version: u16,
    pub flags: u32,
    pub pixel_type: u8,
    pub color_bits: u8,
    pub red_bits: u8,
    pub red_shift: u8,
    pub green_bits: u8,
    pub green_shift: u8,
    pub blue_bits: u8,
    pub blue_shift: u8,
    pub alpha_bits: u8,
    pub alpha_shift: u8,
    pub accum_bits: u8,
    pub accum_red_bits: u8,
    pub accum_green_bits: u8,
    pub accum_blue_bits: u8,
    pub accum_alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub aux_buffers: u8,
    pub layer_type: u8,
    pub reserved: u8,
    pub layer_mask: u32,
    pub visible_mask: u32,
    pub damage_mask: u32,
}

impl Decode for PointL {
    const SIZE: usize = 8;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(PointL {
            x: cursor.read()?,
            y: cursor.read()?,
        })
    }
}

impl Decode for PointS {
    const SIZE: usize = 4;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(PointS {
            x: cursor.read()?,
            y: cursor.read()?,
        })
    }
}

impl Decode for SizeL {
    const SIZE: usize = 8;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(SizeL {
            cx: cursor.read()?,
            cy: cursor.read()?,
        })
    }
}

impl Decode for RectL {
    const SIZE: usize = 16;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(RectL {
            left: cursor.read()?,
            top: cursor.read()?,
            right: cursor.read()?,
            bottom: cursor.read()?,
        })
    }
}

impl Decode for XForm {
    const SIZE: usize = 24;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(XForm {
            m11: cursor.read()?,
            m12: cursor.read()?,
            m21: cursor.read()?,
            m22: cursor.read()?,
            dx: cursor.read()?,
            dy: cursor.read()?,
        })
    }
}

impl Decode for ColorRef {
    const SIZE: usize = 4;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(ColorRef {
            red: cursor.read()?,
            green: cursor.read()?,
            blue: cursor.read()?,
            reserved: cursor.read()?,
        })
    }
}

impl Decode for LogPaletteEntry {
    const SIZE: usize = 4;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(LogPaletteEntry {
            reserved: cursor.read()?,
            blue: cursor.read()?,
            green: cursor.read()?,
            red: cursor.read()?,
        })
    }
}

impl Decode for PixelFormatDescriptor {
    const SIZE: usize = 40;

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(PixelFormatDescriptor {
            size: cursor.read()?,
            version: cursor.read()?,
            flags: cursor.read()?,
            pixel_type: cursor.read()?,
            color_bits: cursor.read()?,
            red_bits: cursor.read()?,
            red_shift: cursor.read()?,
            green_bits: cursor.read()?,
            green_shift: cursor.read()?,
            blue_bits: cursor.read()?,
            blue_shift: cursor.read()?,
            alpha_bits: cursor.read()?,
            alpha_shift: cursor.read()?,
            accum_bits: cursor.read()?,
            accum_red_bits: cursor.read()?,
            accum_green_bits: cursor.read()?,
            accum_blue_bits: cursor.read()?,
            accum_alpha_bits: cursor.read()?,
            depth_bits: cursor.read()?,
            stencil_bits: cursor.read()?,
            aux_buffers: cursor.read()?,
            layer_type: cursor.read()?,
            reserved: cursor.read()?,
            layer_mask: cursor.read()?,
            visible_mask: cursor.read()?,
            damage_mask: cursor.read()?,
        })
    }
}
