//! File scanner: record sequencing over a whole metafile buffer.
//!
//! A metafile is one header record, any number of body records and one EOF record, with
//! nothing before the header and nothing after the EOF record's declared extent. The scanner
//! is a single forward pass that holds at most one decoded record at a time.

use std::iter::FusedIterator;

use crate::cursor::ByteCursor;
use crate::envelope::Envelope;
use crate::error::{EmfError, Result};
use crate::record_type::{record_name, RecordType};
use crate::records::{header, Header, Record};

/// Verdict returned by an [`EmfFile::enumerate_records`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A metafile buffer whose header has been decoded.
///
/// The buffer is borrowed and never modified; any number of scans may run over it, each with
/// its own cursor.
#[derive(Debug, Clone)]
pub struct EmfFile<'a> {
    data: &'a [u8],
    header: Header,
}

impl<'a> EmfFile<'a> {
    /// Decode the header record at offset 0. Fails when the buffer is empty or does not start
    /// with a well-formed header.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        check_next_tag(&cursor, ScanState::Start)?;
        let header = header::decode(&mut cursor).inspect_err(|err| {
            tracing::debug!(kind = ?err.kind(), position = err.position(), "header decode failed");
        })?;
        tracing::debug!(
            len = data.len(),
            declared_bytes = header.bytes,
            declared_records = header.records,
            layout = ?header.layout(),
            "opened metafile"
        );
        Ok(EmfFile { data, header })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Lazy scan from offset 0. Each call starts over.
    pub fn records(&self) -> Records<'a> {
        Records {
            cursor: ByteCursor::new(self.data),
            state: ScanState::Start,
        }
    }

    /// Decode every record in order and hand it to `callback` until the EOF record has been
    /// delivered or the callback answers [`Flow::Stop`]. Both end the scan successfully.
    pub fn enumerate_records<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(Record) -> Flow,
    {
        tracing::debug!(len = self.data.len(), "scan start");
        let mut records = self.records();
        while let Some(record) = records.next() {
            if callback(record?) == Flow::Stop {
                tracing::debug!(position = records.position(), "scan stopped by callback");
                return Ok(());
            }
        }
        tracing::debug!(position = records.position(), "scan complete");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing decoded yet; the header is due.
    Start,
    /// Header seen; body records or EOF are due.
    Body,
    /// EOF delivered or an error reported.
    Done,
}

/// Iterator over the records of an [`EmfFile`]. Yields at most one error, then ends.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    cursor: ByteCursor<'a>,
    state: ScanState,
}

impl Records<'_> {
    /// Offset of the next record's envelope.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn next_record(&mut self) -> Result<Record> {
        let position = self.cursor.position();
        if self.cursor.is_at_end() {
            let reason = match self.state {
                ScanState::Start => "buffer contains no records",
                _ => "records end without an EOF record",
            };
            return Err(EmfError::sequence(position, reason));
        }
        check_next_tag(&self.cursor, self.state)?;

        let record = Record::decode(&mut self.cursor)?;
        let tag = record.record_type();
        tracing::trace!(
            position,
            tag,
            name = record_name(tag),
            size = self.cursor.position() - position,
            "record"
        );

        if record.is_eof() && !self.cursor.is_at_end() {
            return Err(EmfError::sequence(
                self.cursor.position(),
                format!("{} trailing bytes after EOF record", self.cursor.remaining()),
            ));
        }
        self.state = if record.is_eof() { ScanState::Done } else { ScanState::Body };
        Ok(record)
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ScanState::Done {
            return None;
        }
        let result = self.next_record();
        if let Err(err) = &result {
            tracing::debug!(kind = ?err.kind(), position = err.position(), %err, "scan failed");
            self.state = ScanState::Done;
        }
        Some(result)
    }
}

impl FusedIterator for Records<'_> {}

/// Header only at offset 0, and only once.
fn check_next_tag(cursor: &ByteCursor<'_>, state: ScanState) -> Result<()> {
    let position = cursor.position();
    if cursor.is_empty() {
        return Err(EmfError::sequence(position, "buffer contains no records"));
    }
    let tag = Envelope::peek_type(cursor)?;
    let is_header = tag == u32::from(RecordType::Header);
    match state {
        ScanState::Start if !is_header => Err(EmfError::sequence(
            position,
            format!("first record is {} rather than EMR_HEADER", record_name(tag)),
        )),
        ScanState::Body if is_header => Err(EmfError::sequence(position, "second EMR_HEADER record")),
        _ => Ok(()),
    }
}
