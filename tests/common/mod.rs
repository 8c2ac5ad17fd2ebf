//! Byte builders shared by the integration tests. All values little-endian.

#![allow(dead_code)]

use emfcore::{EmfError, EmfFile, Record};

pub const HEADER: u32 = 1;
pub const EOF: u32 = 14;
pub const COMMENT: u32 = 70;

pub fn u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn utf16(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// `{tag, size}` + body, zero-padded to a multiple of 4.
pub fn record(tag: u32, body: &[u8]) -> Vec<u8> {
    let size = (8 + body.len()).next_multiple_of(4);
    let mut out = u32s(&[tag, size as u32]);
    out.extend_from_slice(body);
    out.resize(size, 0);
    out
}

/// The 80 base header bytes that follow the envelope.
pub fn header_fields(n_description: u32, off_description: u32) -> Vec<u8> {
    let mut out = u32s(&[0, 0, 640, 480]); // bounds
    out.extend(u32s(&[0, 0, 16933, 12700])); // frame
    out.extend(u32s(&[0x464D_4520, 0x0001_0000, 0, 0])); // signature, version, bytes, records
    out.extend(u32s(&[1])); // handles, reserved
    out.extend(u32s(&[n_description, off_description, 0]));
    out.extend(u32s(&[1920, 1080, 508, 286])); // device, millimeters
    out
}

/// Header record of exactly `size` bytes: base fields followed by `rest`, zero-filled to `size`.
pub fn header_record(size: u32, n_description: u32, off_description: u32, rest: &[(u32, &[u8])]) -> Vec<u8> {
    let mut out = u32s(&[HEADER, size]);
    out.extend(header_fields(n_description, off_description));
    out.resize(size as usize, 0);
    for (offset, bytes) in rest {
        let at = *offset as usize;
        out[at..at + bytes.len()].copy_from_slice(bytes);
    }
    out
}

pub fn minimal_header() -> Vec<u8> {
    header_record(88, 0, 0, &[])
}

pub fn eof() -> Vec<u8> {
    u32s(&[EOF, 20, 0, 16, 20])
}

pub fn comment(data: &[u8]) -> Vec<u8> {
    let mut body = u32s(&[data.len() as u32]);
    body.extend_from_slice(data);
    record(COMMENT, &body)
}

pub fn line_to(x: u32, y: u32) -> Vec<u8> {
    u32s(&[54, 16, x, y])
}

/// Minimal header, the given records, EOF.
pub fn metafile(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = minimal_header();
    for r in records {
        out.extend_from_slice(r);
    }
    out.extend(eof());
    out
}

/// Open and scan, collecting every record.
pub fn scan(data: &[u8]) -> Result<Vec<Record>, EmfError> {
    let file = EmfFile::open(data)?;
    file.records().collect()
}

/// Decode a single record and check it consumed all of `data`.
pub fn decode_one(data: &[u8]) -> Result<Record, EmfError> {
    let mut cursor = emfcore::ByteCursor::new(data);
    let record = Record::decode(&mut cursor)?;
    assert!(cursor.is_at_end(), "record left {} bytes", cursor.remaining());
    Ok(record)
}
