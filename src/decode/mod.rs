//! Note body decoding: blob in, markdown text out.
//!
//! Data flows strictly downstream:
//! decompress, schema decode, run walk, resolve, substitute. Substitution
//! sanitizes the source text it copies and persists only the files it
//! actually places.

mod decompress;
mod pipeline;
mod resolver;
mod sanitize;
mod schema;
mod sink;
mod substitute;
mod walker;
mod warning;
mod wire;

pub use decompress::{DecompressionError, GZIP_MAGIC, decompress, is_gzip};
pub use pipeline::{
    DecodeError, DecodeOptions, DecodedNote, WrittenAttachment, decode_note, file_link,
    render_document,
};
pub use resolver::{DEFAULT_LOOKUP_ATTEMPTS, Resolved, Resolver};
pub use sanitize::{ARTIFACTS, remove_artifacts, tidy};
pub use schema::{SchemaDecodeError, decode_document};
pub use sink::AttachmentSink;
pub use substitute::{Placement, Substitution, substitute};
pub use walker::{LengthMismatch, LengthUnit, Span, Walk, WalkedRun, walk};
pub use warning::DecodeWarning;
pub use wire::WireError;
