//! Comment sub-type disambiguation.

mod common;

use common::*;
use emfcore::records::{EmfPlusRecord, FormatSignature, WindowsMetafileComment};
use emfcore::{Comment, ErrorKind, PublicComment, Record};

const EMF_PLUS: u32 = 0x2B46_4D45;
const SPOOL: u32 = 0x0000_0000;
const PUBLIC: u32 = 0x4349_4447;

fn decode_comment(data: &[u8]) -> Comment {
    match decode_one(&comment(data)).expect("decode comment") {
        Record::Comment(c) => c,
        other => panic!("expected comment, got {other:?}"),
    }
}

fn emf_plus_record(record_type: u16, flags: u16, payload: &[u8]) -> Vec<u8> {
    let size = (12 + payload.len()).next_multiple_of(4) as u32;
    let mut out = Vec::new();
    out.extend_from_slice(&record_type.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend(u32s(&[size, payload.len() as u32]));
    out.extend_from_slice(payload);
    out.resize(size as usize, 0);
    out
}

#[test]
fn test_emf_plus_comment() {
    let mut data = u32s(&[EMF_PLUS]);
    data.extend(emf_plus_record(0x4001, 0, &u32s(&[0xDBC0_1002, 1])));
    data.extend(emf_plus_record(0x4002, 0, &[]));
    let c = decode_comment(&data);
    assert_eq!(
        c,
        Comment::EmfPlus(vec![
            EmfPlusRecord {
                record_type: 0x4001,
                flags: 0,
                data: u32s(&[0xDBC0_1002, 1]),
            },
            EmfPlusRecord {
                record_type: 0x4002,
                flags: 0,
                data: Vec::new(),
            },
        ])
    );
}

#[test]
fn test_emf_plus_unaligned_inner_size() {
    let mut data = u32s(&[EMF_PLUS]);
    data.extend_from_slice(&0x4001u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend(u32s(&[14, 0, 0]));
    let err = decode_one(&comment(&data)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
}

#[test]
fn test_emf_plus_partial_inner_header() {
    let mut data = u32s(&[EMF_PLUS]);
    data.extend_from_slice(&0x4001u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    let err = decode_one(&comment(&data)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
}

#[test]
fn test_spool_comment() {
    let c = decode_comment(&u32s(&[SPOOL, 0x544F_4E46, 1, 2]));
    assert_eq!(c, Comment::EmfSpool(u32s(&[1, 2])));
}

#[test]
fn test_public_begin_group() {
    let mut data = u32s(&[PUBLIC, 2, 0, 0, 100, 50, 3]);
    data.extend(utf16("abc"));
    let c = decode_comment(&data);
    assert_eq!(
        c,
        Comment::Public(PublicComment::BeginGroup {
            rectangle: emfcore::types::RectL {
                left: 0,
                top: 0,
                right: 100,
                bottom: 50
            },
            description: "abc".to_string(),
        })
    );
}

#[test]
fn test_public_end_group() {
    let c = decode_comment(&u32s(&[PUBLIC, 3]));
    assert_eq!(c, Comment::Public(PublicComment::EndGroup));
}

#[test]
fn test_public_end_group_with_extra_data() {
    let err = decode_one(&comment(&u32s(&[PUBLIC, 3, 0]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
}

#[test]
fn test_public_windows_metafile() {
    let mut data = u32s(&[PUBLIC, 0x8000_0001, 0x0000_0300, 0xABCD, 0, 6]);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    let c = decode_comment(&data);
    assert_eq!(
        c,
        Comment::Public(PublicComment::WindowsMetafile(WindowsMetafileComment {
            version: 0x0300,
            checksum: 0xABCD,
            flags: 0,
            metafile: vec![1, 2, 3, 4, 5, 6],
        }))
    );
}

#[test]
fn test_public_windows_metafile_bad_version() {
    let data = u32s(&[PUBLIC, 0x8000_0001, 0x0000_0200, 0, 0, 0]);
    let err = decode_one(&comment(&data)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptEnumValue);
}

#[test]
fn test_public_multiformats() {
    // identifier 0, sub-id 4, rect 8, count 24, descriptors 28..60, payloads from 60
    let mut data = u32s(&[PUBLIC, 0x4000_0004, 0, 0, 10, 10, 2]);
    data.extend(u32s(&[0x464D_4520, 0x0001_0000, 4, 60]));
    data.extend(u32s(&[0x4653_5045, 1, 8, 64]));
    data.extend(u32s(&[0xEEEE_EEEE, 0x1111_1111, 0x2222_2222]));
    let c = decode_comment(&data);
    let Comment::Public(PublicComment::MultiFormats { output_rect, formats }) = c else {
        panic!("expected multi-formats comment, got {c:?}");
    };
    assert_eq!(output_rect.right, 10);
    assert_eq!(formats.len(), 2);
    assert_eq!(formats[0].signature, FormatSignature::Enhmeta);
    assert_eq!(formats[0].data, u32s(&[0xEEEE_EEEE]));
    assert_eq!(formats[1].signature, FormatSignature::Eps);
    assert_eq!(formats[1].data, u32s(&[0x1111_1111, 0x2222_2222]));
}

#[test]
fn test_public_multiformats_bad_signature() {
    let mut data = u32s(&[PUBLIC, 0x4000_0004, 0, 0, 10, 10, 1]);
    data.extend(u32s(&[0x0BAD_0BAD, 0, 0, 44]));
    let err = decode_one(&comment(&data)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptEnumValue);
}

#[test]
fn test_public_multiformats_payload_inside_table() {
    let mut data = u32s(&[PUBLIC, 0x4000_0004, 0, 0, 10, 10, 1]);
    data.extend(u32s(&[0x464D_4520, 0, 4, 8]));
    data.extend(u32s(&[0]));
    let err = decode_one(&comment(&data)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptOffset);
}

#[test]
fn test_public_unknown() {
    let c = decode_comment(&u32s(&[PUBLIC, 0x1234_5678, 0xDEAD_BEEF]));
    assert_eq!(
        c,
        Comment::Public(PublicComment::Unknown {
            identifier: 0x1234_5678,
            data: u32s(&[0xDEAD_BEEF]),
        })
    );
}

#[test]
fn test_public_too_short() {
    let err = decode_one(&comment(&u32s(&[PUBLIC]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
}

#[test]
fn test_private_comment() {
    let c = decode_comment(&u32s(&[0x5052_4956, 42]));
    assert_eq!(c, Comment::Private(u32s(&[0x5052_4956, 42])));
}

#[test]
fn test_empty_and_short_data_is_private() {
    assert_eq!(decode_comment(&[]), Comment::Private(Vec::new()));
    // Starts like the spool identifier but is too short to carry it.
    assert_eq!(decode_comment(&[0, 0, 0]), Comment::Private(vec![0, 0, 0]));
}

#[test]
fn test_data_size_beyond_record() {
    let mut data = comment(&[1, 2, 3, 4]);
    data[8..12].copy_from_slice(&u32s(&[8]));
    let err = decode_one(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
}

#[test]
fn test_record_larger_than_padded_data() {
    let mut data = record(COMMENT, &u32s(&[4, 0x5052_4956, 0]));
    assert_eq!(data.len(), 20);
    let err = decode_one(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptSize);
    data.truncate(16);
    data[4..8].copy_from_slice(&u32s(&[16]));
    assert!(decode_one(&data).is_ok());
}

#[test]
fn test_comments_inside_metafile() {
    let data = metafile(&[
        comment(&u32s(&[PUBLIC, 2, 0, 0, 1, 1, 0])),
        comment(&u32s(&[PUBLIC, 3])),
        comment(b"hello"),
    ]);
    let records = scan(&data).expect("scan");
    assert_eq!(records.len(), 5);
    assert!(matches!(records[1], Record::Comment(Comment::Public(PublicComment::BeginGroup { .. }))));
    assert!(matches!(records[2], Record::Comment(Comment::Public(PublicComment::EndGroup))));
    assert_eq!(records[3], Record::Comment(Comment::Private(b"hello".to_vec())));
}
