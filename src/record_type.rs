//! Record type tags.
//!
//! Every tag the format defines is listed so that records without a dedicated decoder can
//! still be named in dumps and diagnostics. Which tags actually have a decoder is decided in
//! [`Record::decode`](crate::records::Record::decode).

macro_rules! record_types {
    ($($name:ident = $value:literal => $label:literal),* $(,)?) => {
        /// Record type tag (`EMR_*`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum RecordType {
            $($name = $value),*
        }

        impl RecordType {
            pub fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($value => Some(RecordType::$name),)*
                    _ => None,
                }
            }

            /// Canonical `EMR_*` name.
            pub fn name(self) -> &'static str {
                match self {
                    $(RecordType::$name => $label),*
                }
            }
        }
    };
}

record_types! {
    Header = 1 => "EMR_HEADER",
    PolyBezier = 2 => "EMR_POLYBEZIER",
    Polygon = 3 => "EMR_POLYGON",
    Polyline = 4 => "EMR_POLYLINE",
    PolyBezierTo = 5 => "EMR_POLYBEZIERTO",
    PolyLineTo = 6 => "EMR_POLYLINETO",
    PolyPolyline = 7 => "EMR_POLYPOLYLINE",
    PolyPolygon = 8 => "EMR_POLYPOLYGON",
    SetWindowExtEx = 9 => "EMR_SETWINDOWEXTEX",
    SetWindowOrgEx = 10 => "EMR_SETWINDOWORGEX",
    SetViewportExtEx = 11 => "EMR_SETVIEWPORTEXTEX",
    SetViewportOrgEx = 12 => "EMR_SETVIEWPORTORGEX",
    SetBrushOrgEx = 13 => "EMR_SETBRUSHORGEX",
    Eof = 14 => "EMR_EOF",
    SetPixelV = 15 => "EMR_SETPIXELV",
    SetMapperFlags = 16 => "EMR_SETMAPPERFLAGS",
    SetMapMode = 17 => "EMR_SETMAPMODE",
    SetBkMode = 18 => "EMR_SETBKMODE",
    SetPolyFillMode = 19 => "EMR_SETPOLYFILLMODE",
    SetRop2 = 20 => "EMR_SETROP2",
    SetStretchBltMode = 21 => "EMR_SETSTRETCHBLTMODE",
    SetTextAlign = 22 => "EMR_SETTEXTALIGN",
    SetColorAdjustment = 23 => "EMR_SETCOLORADJUSTMENT",
    SetTextColor = 24 => "EMR_SETTEXTCOLOR",
    SetBkColor = 25 => "EMR_SETBKCOLOR",
    OffsetClipRgn = 26 => "EMR_OFFSETCLIPRGN",
    MoveToEx = 27 => "EMR_MOVETOEX",
    SetMetaRgn = 28 => "EMR_SETMETARGN",
    ExcludeClipRect = 29 => "EMR_EXCLUDECLIPRECT",
    IntersectClipRect = 30 => "EMR_INTERSECTCLIPRECT",
    ScaleViewportExtEx = 31 => "EMR_SCALEVIEWPORTEXTEX",
    ScaleWindowExtEx = 32 => "EMR_SCALEWINDOWEXTEX",
    SaveDc = 33 => "EMR_SAVEDC",
    RestoreDc = 34 => "EMR_RESTOREDC",
    SetWorldTransform = 35 => "EMR_SETWORLDTRANSFORM",
    ModifyWorldTransform = 36 => "EMR_MODIFYWORLDTRANSFORM",
    SelectObject = 37 => "EMR_SELECTOBJECT",
    CreatePen = 38 => "EMR_CREATEPEN",
    CreateBrushIndirect = 39 => "EMR_CREATEBRUSHINDIRECT",
    DeleteObject = 40 => "EMR_DELETEOBJECT",
    AngleArc = 41 => "EMR_ANGLEARC",
    Ellipse = 42 => "EMR_ELLIPSE",
    Rectangle = 43 => "EMR_RECTANGLE",
    RoundRect = 44 => "EMR_ROUNDRECT",
    Arc = 45 => "EMR_ARC",
    Chord = 46 => "EMR_CHORD",
    Pie = 47 => "EMR_PIE",
    SelectPalette = 48 => "EMR_SELECTPALETTE",
    CreatePalette = 49 => "EMR_CREATEPALETTE",
    SetPaletteEntries = 50 => "EMR_SETPALETTEENTRIES",
    ResizePalette = 51 => "EMR_RESIZEPALETTE",
    RealizePalette = 52 => "EMR_REALIZEPALETTE",
    ExtFloodFill = 53 => "EMR_EXTFLOODFILL",
    LineTo = 54 => "EMR_LINETO",
    ArcTo = 55 => "EMR_ARCTO",
    PolyDraw = 56 => "EMR_POLYDRAW",
    SetArcDirection = 57 => "EMR_SETARCDIRECTION",
    SetMiterLimit = 58 => "EMR_SETMITERLIMIT",
    BeginPath = 59 => "EMR_BEGINPATH",
    EndPath = 60 => "EMR_ENDPATH",
    CloseFigure = 61 => "EMR_CLOSEFIGURE",
    FillPath = 62 => "EMR_FILLPATH",
    StrokeAndFillPath = 63 => "EMR_STROKEANDFILLPATH",
    StrokePath = 64 => "EMR_STROKEPATH",
    FlattenPath = 65 => "EMR_FLATTENPATH",
    WidenPath = 66 => "EMR_WIDENPATH",
    SelectClipPath = 67 => "EMR_SELECTCLIPPATH",
    AbortPath = 68 => "EMR_ABORTPATH",
    Comment = 70 => "EMR_COMMENT",
    FillRgn = 71 => "EMR_FILLRGN",
    FrameRgn = 72 => "EMR_FRAMERGN",
    InvertRgn = 73 => "EMR_INVERTRGN",
    PaintRgn = 74 => "EMR_PAINTRGN",
    ExtSelectClipRgn = 75 => "EMR_EXTSELECTCLIPRGN",
    BitBlt = 76 => "EMR_BITBLT",
    StretchBlt = 77 => "EMR_STRETCHBLT",
    MaskBlt = 78 => "EMR_MASKBLT",
    PlgBlt = 79 => "EMR_PLGBLT",
    SetDiBitsToDevice = 80 => "EMR_SETDIBITSTODEVICE",
    StretchDiBits = 81 => "EMR_STRETCHDIBITS",
    ExtCreateFontIndirectW = 82 => "EMR_EXTCREATEFONTINDIRECTW",
    ExtTextOutA = 83 => "EMR_EXTTEXTOUTA",
    ExtTextOutW = 84 => "EMR_EXTTEXTOUTW",
    PolyBezier16 = 85 => "EMR_POLYBEZIER16",
    Polygon16 = 86 => "EMR_POLYGON16",
    Polyline16 = 87 => "EMR_POLYLINE16",
    PolyBezierTo16 = 88 => "EMR_POLYBEZIERTO16",
    PolylineTo16 = 89 => "EMR_POLYLINETO16",
    PolyPolyline16 = 90 => "EMR_POLYPOLYLINE16",
    PolyPolygon16 = 91 => "EMR_POLYPOLYGON16",
    PolyDraw16 = 92 => "EMR_POLYDRAW16",
    CreateMonoBrush = 93 => "EMR_CREATEMONOBRUSH",
    CreateDibPatternBrushPt = 94 => "EMR_CREATEDIBPATTERNBRUSHPT",
    ExtCreatePen = 95 => "EMR_EXTCREATEPEN",
    PolyTextOutA = 96 => "EMR_POLYTEXTOUTA",
    PolyTextOutW = 97 => "EMR_POLYTEXTOUTW",
    SetIcmMode = 98 => "EMR_SETICMMODE",
    CreateColorSpace = 99 => "EMR_CREATECOLORSPACE",
    SetColorSpace = 100 => "EMR_SETCOLORSPACE",
    DeleteColorSpace = 101 => "EMR_DELETECOLORSPACE",
    GlsRecord = 102 => "EMR_GLSRECORD",
    GlsBoundedRecord = 103 => "EMR_GLSBOUNDEDRECORD",
    PixelFormat = 104 => "EMR_PIXELFORMAT",
    DrawEscape = 105 => "EMR_DRAWESCAPE",
    ExtEscape = 106 => "EMR_EXTESCAPE",
    SmallTextOut = 108 => "EMR_SMALLTEXTOUT",
    ForceUfiMapping = 109 => "EMR_FORCEUFIMAPPING",
    NamedEscape = 110 => "EMR_NAMEDESCAPE",
    ColorCorrectPalette = 111 => "EMR_COLORCORRECTPALETTE",
    SetIcmProfileA = 112 => "EMR_SETICMPROFILEA",
    SetIcmProfileW = 113 => "EMR_SETICMPROFILEW",
    AlphaBlend = 114 => "EMR_ALPHABLEND",
    SetLayout = 115 => "EMR_SETLAYOUT",
    TransparentBlt = 116 => "EMR_TRANSPARENTBLT",
    GradientFill = 118 => "EMR_GRADIENTFILL",
    SetLinkedUfis = 119 => "EMR_SETLINKEDUFIS",
    SetTextJustification = 120 => "EMR_SETTEXTJUSTIFICATION",
    ColorMatchToTargetW = 121 => "EMR_COLORMATCHTOTARGETW",
    CreateColorSpaceW = 122 => "EMR_CREATECOLORSPACEW",
}

impl From<RecordType> for u32 {
    fn from(value: RecordType) -> Self {
        value as u32
    }
}

/// `EMR_*` name for a raw tag, or `"EMR_UNKNOWN"` when the tag is not defined.
pub fn record_name(tag: u32) -> &'static str {
    RecordType::from_u32(tag).map_or("EMR_UNKNOWN", RecordType::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip_through_u32() {
        for tag in [1u32, 14, 70, 87, 122] {
            let ty = RecordType::from_u32(tag).expect("defined tag");
            assert_eq!(u32::from(ty), tag);
        }
    }

    #[test]
    fn gaps_in_the_tag_space_are_undefined() {
        assert_eq!(RecordType::from_u32(0), None);
        assert_eq!(RecordType::from_u32(69), None);
        assert_eq!(RecordType::from_u32(107), None);
        assert_eq!(RecordType::from_u32(117), None);
        assert_eq!(record_name(500), "EMR_UNKNOWN");
        assert_eq!(record_name(14), "EMR_EOF");
    }
}
