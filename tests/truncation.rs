//! Truncated and mangled input: every failure is an error value, never a panic.

mod common;

use common::*;
use emfcore::{EmfFile, ErrorKind, Flow};
use proptest::prelude::*;

/// A metafile exercising every variable-layout decoder, with its record boundaries.
fn sample() -> (Vec<u8>, Vec<usize>) {
    let mut records = vec![header_record(112, 2, 108, &[(108, &utf16("AB"))])];
    records.push(line_to(1, 2));
    records.push(comment(&u32s(&[0x2B46_4D45, 0x0000_4001, 12, 0])));
    let mut multi = u32s(&[0x4349_4447, 0x4000_0004, 0, 0, 10, 10, 1]);
    multi.extend(u32s(&[0x464D_4520, 0x0001_0000, 4, 44, 0xEEEE_EEEE]));
    records.push(comment(&multi));
    records.push(comment(b"private"));
    records.push(record(200, &u32s(&[1, 2, 3])));
    let mut eof = u32s(&[EOF, 28, 2, 16, 0x0102_0300, 0x0405_0600]);
    eof.extend(u32s(&[28]));
    records.push(eof);

    let mut data = Vec::new();
    let mut boundaries = Vec::new();
    for r in &records {
        data.extend_from_slice(r);
        boundaries.push(data.len());
    }
    (data, boundaries)
}

fn scan_all(data: &[u8]) -> Result<usize, emfcore::EmfError> {
    let file = EmfFile::open(data)?;
    let mut count = 0;
    file.enumerate_records(|_| {
        count += 1;
        Flow::Continue
    })?;
    Ok(count)
}

#[test]
fn test_sample_scans_cleanly() {
    let (data, boundaries) = sample();
    assert_eq!(scan_all(&data).expect("scan"), boundaries.len());
}

#[test]
fn test_every_truncation_point() {
    let (data, boundaries) = sample();
    for len in 0..data.len() {
        let err = scan_all(&data[..len]).expect_err("truncated file must fail");
        let expected = if len == 0 || boundaries.contains(&len) {
            ErrorKind::CorruptSequence
        } else {
            ErrorKind::UnexpectedEndOfData
        };
        assert_eq!(err.kind(), expected, "truncated at {len}: {err}");
    }
}

fn line_records() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((any::<u32>(), any::<u32>()), 0..16)
}

proptest! {
    #[test]
    fn prop_cut_inside_record_is_end_of_data(
        points in line_records(),
        word in any::<prop::sample::Index>(),
        extra in 1usize..4,
    ) {
        let records: Vec<Vec<u8>> = points.iter().map(|&(x, y)| line_to(x, y)).collect();
        let data = metafile(&records);
        // Records are word-aligned, so a cut that is not is never on a boundary.
        let len = word.index(data.len() / 4) * 4 + extra;
        let err = scan_all(&data[..len]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfData);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = scan_all(&data);
    }

    #[test]
    fn prop_arbitrary_body_after_header_never_panics(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut data = minimal_header();
        data.extend_from_slice(&body);
        let _ = scan_all(&data);
    }

    #[test]
    fn prop_single_byte_mutation_never_panics(at in any::<prop::sample::Index>(), value in any::<u8>()) {
        let (mut data, _) = sample();
        let i = at.index(data.len());
        data[i] = value;
        let _ = scan_all(&data);
    }

    #[test]
    fn prop_scan_is_deterministic(points in line_records()) {
        let records: Vec<Vec<u8>> = points.iter().map(|&(x, y)| line_to(x, y)).collect();
        let data = metafile(&records);
        let first = scan(&data);
        let second = scan(&data);
        prop_assert_eq!(first.clone(), second);
        prop_assert_eq!(first.map(|r| r.len()).ok(), Some(points.len() + 2));
    }
}
