//! Error taxonomy shared by every decoder in the crate.
//!
//! All errors are fatal to the scan that produced them: once a record fails to decode the
//! cursor can no longer be trusted to sit on a record boundary, so nothing is retried.

/// Coarse classification of an [`EmfError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedEndOfData,
    CorruptTag,
    CorruptSize,
    CorruptOffset,
    CorruptEnumValue,
    CorruptSequence,
}

/// Decode failure. Positions are absolute byte offsets into the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmfError {
    #[error("unexpected end of data at offset {position}: needed {needed} bytes, {available} available")]
    UnexpectedEndOfData {
        position: usize,
        needed: usize,
        available: usize,
    },
    #[error("corrupt record tag at offset {position}: expected {expected:#x}, found {found:#x}")]
    CorruptTag {
        position: usize,
        expected: u32,
        found: u32,
    },
    #[error("corrupt record size at offset {position}: {reason}")]
    CorruptSize { position: usize, reason: String },
    #[error("corrupt offset in record at {position}: range {offset}+{len} outside {floor}..{limit}")]
    CorruptOffset {
        position: usize,
        offset: u64,
        len: u64,
        floor: u64,
        limit: u64,
    },
    #[error("corrupt value for {field} at offset {position}: {value:#x}")]
    CorruptEnumValue {
        position: usize,
        field: &'static str,
        value: u32,
    },
    #[error("corrupt record sequence at offset {position}: {reason}")]
    CorruptSequence { position: usize, reason: String },
}

impl EmfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmfError::UnexpectedEndOfData { .. } => ErrorKind::UnexpectedEndOfData,
            EmfError::CorruptTag { .. } => ErrorKind::CorruptTag,
            EmfError::CorruptSize { .. } => ErrorKind::CorruptSize,
            EmfError::CorruptOffset { .. } => ErrorKind::CorruptOffset,
            EmfError::CorruptEnumValue { .. } => ErrorKind::CorruptEnumValue,
            EmfError::CorruptSequence { .. } => ErrorKind::CorruptSequence,
        }
    }

    /// Byte offset the error was detected at.
    pub fn position(&self) -> usize {
        match self {
            EmfError::UnexpectedEndOfData { position, .. }
            | EmfError::CorruptTag { position, .. }
            | EmfError::CorruptSize { position, .. }
            | EmfError::CorruptOffset { position, .. }
            | EmfError::CorruptEnumValue { position, .. }
            | EmfError::CorruptSequence { position, .. } => *position,
        }
    }

    pub(crate) fn size(position: usize, reason: impl Into<String>) -> Self {
        EmfError::CorruptSize {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn sequence(position: usize, reason: impl Into<String>) -> Self {
        EmfError::CorruptSequence {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn enum_value(position: usize, field: &'static str, value: u32) -> Self {
        EmfError::CorruptEnumValue {
            position,
            field,
            value,
        }
    }
}

pub type Result<T, E = EmfError> = std::result::Result<T, E>;
