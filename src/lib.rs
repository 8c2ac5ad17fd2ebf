//! # emfcore — Enhanced Metafile record decoder
//!
//! Bounds-checked decoding of EMF (Enhanced Metafile) record streams held in memory.
//!
//! ## Layers
//!
//! - **Cursor** ([`cursor`]): little-endian reads over a borrowed buffer; never panics on short input
//! - **Envelope** ([`envelope`]): the `{type, size}` prefix every record shares, plus the rule that
//!   a decoder consumes exactly `size` bytes
//! - **Records** ([`records`]): typed records and the tag dispatcher, including the three records
//!   whose layout is computed rather than fixed (header, comment, EOF)
//! - **Scanner** ([`file`]): header first, EOF last, nothing after
//!
//! ## File layout
//!
//! ```text
//! EMR_HEADER   type=1  size  bounds frame " EMF" ... [ext1] [ext2] [description] [pixel format]
//! body record  type    size  ...
//! ...
//! EMR_EOF      type=14 size  nPalEntries offPalEntries [palette] SizeLast
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use emfcore::{EmfFile, Flow};
//!
//! let bytes = std::fs::read("picture.emf").unwrap();
//! let file = EmfFile::open(&bytes).unwrap();
//! file.enumerate_records(|record| {
//!     println!("{}", emfcore::dump::describe(&record));
//!     Flow::Continue
//! })
//! .unwrap();
//! ```

pub mod cursor;
pub mod dump;
pub mod envelope;
pub mod error;
pub mod file;
pub mod record_type;
pub mod records;
pub mod types;

pub use cursor::{ByteCursor, Decode};
pub use error::{EmfError, ErrorKind, Result};
pub use file::{EmfFile, Flow, Records};
pub use record_type::{record_name, RecordType};
pub use records::{Comment, Eof, Header, HeaderLayout, PublicComment, Record};
