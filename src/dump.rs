//! One-line text summaries of decoded records, used by the `emf_dump` inspector.

use crate::records::{Comment, Header, PublicComment, Record};
use crate::types::{PointL, RectL, SizeL, XForm};

fn rect(r: &RectL) -> String {
    format!("({}, {})-({}, {})", r.left, r.top, r.right, r.bottom)
}

fn point(p: &PointL) -> String {
    format!("({}, {})", p.x, p.y)
}

fn size(s: &SizeL) -> String {
    format!("{}x{}", s.cx, s.cy)
}

fn xform(x: &XForm) -> String {
    format!(
        "[{} {} {} {} {} {}]",
        x.m11, x.m12, x.m21, x.m22, x.dx, x.dy
    )
}

/// Header summary: layout, bounds, frame, declared counts and description.
pub fn describe_header(header: &Header) -> String {
    let mut out = format!(
        "{:?} header, bounds {}, frame {}, {} bytes, {} records, {} handles",
        header.layout(),
        rect(&header.bounds),
        rect(&header.frame),
        header.bytes,
        header.records,
        header.handles,
    );
    if let Some(description) = &header.description {
        // Description strings are two NUL-terminated parts: application and picture name.
        let parts: Vec<&str> = description.split('\0').filter(|s| !s.is_empty()).collect();
        out.push_str(&format!(", description {:?}", parts.join(" / ")));
    }
    if header.pixel_format.is_some() {
        out.push_str(", pixel format");
    }
    out
}

fn describe_comment(comment: &Comment) -> String {
    match comment {
        Comment::EmfPlus(records) => format!("EMF+ ({} records)", records.len()),
        Comment::EmfSpool(data) => format!("spool ({} bytes)", data.len()),
        Comment::Private(data) => format!("private ({} bytes)", data.len()),
        Comment::Public(public) => match public {
            PublicComment::WindowsMetafile(wmf) => {
                format!("windows metafile v{:#06x} ({} bytes)", wmf.version, wmf.metafile.len())
            }
            PublicComment::BeginGroup {
                rectangle,
                description,
            } => format!("begin group {} {:?}", rect(rectangle), description),
            PublicComment::EndGroup => "end group".to_string(),
            PublicComment::MultiFormats { output_rect, formats } => {
                let kinds: Vec<String> = formats
                    .iter()
                    .map(|f| format!("{:?}:{}", f.signature, f.data.len()))
                    .collect();
                format!("multi-formats {} [{}]", rect(output_rect), kinds.join(", "))
            }
            PublicComment::Unknown { identifier, data } => {
                format!("public {:#010x} ({} bytes)", identifier, data.len())
            }
        },
    }
}

/// Summary of a record's body. The record name is not included.
pub fn describe(record: &Record) -> String {
    match record {
        Record::Header(h) => describe_header(h),
        Record::Eof(eof) => format!("{} palette entries", eof.palette.len()),
        Record::Comment(c) => describe_comment(c),
        Record::SetWindowExtEx(s) | Record::SetViewportExtEx(s) => size(s),
        Record::SetWindowOrgEx(p)
        | Record::SetViewportOrgEx(p)
        | Record::MoveToEx(p)
        | Record::LineTo(p) => point(p),
        Record::SetMapMode(mode) => format!("{:?}", mode),
        Record::SetBkMode(mode) => format!("{:?}", mode),
        Record::SetTextColor(c) => format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue),
        Record::IntersectClipRect(r) | Record::Rectangle(r) => rect(r),
        Record::SaveDc => String::new(),
        Record::RestoreDc(index) => index.to_string(),
        Record::SetWorldTransform(x) => xform(x),
        Record::ModifyWorldTransform(m) => format!("{:?} {}", m.mode, xform(&m.xform)),
        Record::SelectObject(index) | Record::DeleteObject(index) => {
            if index.is_stock_object() {
                format!("stock {:#x}", index.0 & 0x7fff_ffff)
            } else {
                format!("#{}", index.0)
            }
        }
        Record::CreateBrushIndirect(b) => format!(
            "#{} {:?} #{:02x}{:02x}{:02x}",
            b.index.0, b.brush.style, b.brush.color.red, b.brush.color.green, b.brush.color.blue
        ),
        Record::Polyline16(p) => format!("{} points in {}", p.points.len(), rect(&p.bounds)),
        Record::Unknown { data, .. } => format!("{} bytes", data.len()),
    }
}
