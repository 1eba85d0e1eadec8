//! Decoder for the Apple Notes body schema.
//!
//! ```text
//! NoteStoreProto { 2: Document document }
//! Document       { 2: int32 version, 3: Note note }
//! Note           { 2: string note_text, 5: repeated AttributeRun attribute_run }
//! AttributeRun   { 1: int32 length, 12: AttachmentInfo attachment_info }
//! AttachmentInfo { 1: string attachment_identifier, 2: string type_uti }
//! ```
//!
//! Formatting fields of `AttributeRun` and every other unknown field are
//! skipped. Decoding is lenient: a malformed field stops reading its message
//! but keeps what was read before it, and truncated data yields the usable
//! prefix.

use crate::decode::wire::{Field, WireError, WireReader, WireValue};
use crate::domain::{Document, Run};
use log::{debug, trace};
use thiserror::Error;

const STORE_DOCUMENT: u32 = 2;
const DOCUMENT_NOTE: u32 = 3;
const NOTE_TEXT: u32 = 2;
const NOTE_ATTRIBUTE_RUN: u32 = 5;
const RUN_LENGTH: u32 = 1;
const RUN_ATTACHMENT_INFO: u32 = 12;
const ATTACHMENT_IDENTIFIER: u32 = 1;
const ATTACHMENT_TYPE_UTI: u32 = 2;

/// Errors when the note body cannot be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDecodeError {
    #[error("note text field is missing")]
    MissingNoteText,

    #[error("malformed note data: {0}")]
    Malformed(#[from] WireError),
}

/// Decodes a decompressed note body into a [`Document`].
///
/// Accepts the full `NoteStoreProto` envelope and, failing that, a bare
/// `Note` message.
///
/// # Errors
///
/// Returns `SchemaDecodeError::Malformed` if the buffer is not readable as a
/// message at all, and `SchemaDecodeError::MissingNoteText` if no note text
/// is present.
pub fn decode_document(bytes: &[u8]) -> Result<Document, SchemaDecodeError> {
    match find_envelope_note(bytes) {
        Ok(Some(note)) => {
            return decode_note_message(note)?.ok_or(SchemaDecodeError::MissingNoteText);
        }
        Ok(None) => trace!("no note store envelope, trying bare note message"),
        Err(err) => debug!("note store envelope unreadable ({err}), trying bare note message"),
    }

    decode_note_message(bytes)?.ok_or(SchemaDecodeError::MissingNoteText)
}

/// Visits every field of a message.
///
/// A malformed field ends the visit. It is an error only when it is the very
/// first field; otherwise the fields read so far stand.
fn for_each_field<'a>(
    bytes: &'a [u8],
    mut visit: impl FnMut(Field<'a>),
) -> Result<(), WireError> {
    let mut reader = WireReader::new(bytes);
    let mut seen = 0usize;
    loop {
        match reader.next_field() {
            Ok(Some(field)) => {
                seen += 1;
                visit(field);
            }
            Ok(None) => return Ok(()),
            Err(err) if seen > 0 => {
                debug!("stopping at malformed field after {seen} fields: {err}");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }
}

/// Returns the last length-delimited field with the given number.
fn find_message(bytes: &[u8], number: u32) -> Result<Option<&[u8]>, WireError> {
    let mut found = None;
    for_each_field(bytes, |field| {
        if field.number == number
            && let WireValue::Bytes(inner) = field.value
        {
            found = Some(inner);
        }
    })?;
    Ok(found)
}

/// Locates the `Note` message inside a `NoteStoreProto` envelope.
fn find_envelope_note(bytes: &[u8]) -> Result<Option<&[u8]>, WireError> {
    match find_message(bytes, STORE_DOCUMENT)? {
        Some(document) => find_message(document, DOCUMENT_NOTE),
        None => Ok(None),
    }
}

fn decode_note_message(bytes: &[u8]) -> Result<Option<Document>, WireError> {
    let mut text = None;
    let mut runs = Vec::new();

    for_each_field(bytes, |field| match (field.number, field.value) {
        (NOTE_TEXT, WireValue::Bytes(raw)) => {
            text = Some(decode_text(raw, field.truncated));
        }
        (NOTE_ATTRIBUTE_RUN, WireValue::Bytes(_)) if field.truncated => {
            debug!("dropping truncated attribute run {}", runs.len());
        }
        (NOTE_ATTRIBUTE_RUN, WireValue::Bytes(raw)) => match decode_run(raw) {
            Ok(run) => runs.push(run),
            Err(err) => debug!("dropping malformed attribute run {}: {err}", runs.len()),
        },
        _ => {}
    })?;

    Ok(text.map(|text| Document::new(text, runs)))
}

fn decode_run(bytes: &[u8]) -> Result<Run, WireError> {
    let mut length = 0usize;
    let mut attachment: Option<(Option<String>, Option<String>)> = None;

    for_each_field(bytes, |field| match (field.number, field.value) {
        (RUN_LENGTH, WireValue::Varint(value)) => {
            length = usize::try_from(value).unwrap_or(usize::MAX);
        }
        (RUN_ATTACHMENT_INFO, WireValue::Bytes(raw)) => {
            attachment = Some(decode_attachment_info(raw));
        }
        _ => {}
    })?;

    Ok(match attachment {
        Some((id, type_tag)) => Run::attachment(length, id, type_tag),
        None => Run::plain(length),
    })
}

fn decode_attachment_info(bytes: &[u8]) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut type_tag = None;

    let visited = for_each_field(bytes, |field| match (field.number, field.value) {
        (ATTACHMENT_IDENTIFIER, WireValue::Bytes(raw)) => {
            id = non_empty(decode_text(raw, field.truncated));
        }
        (ATTACHMENT_TYPE_UTI, WireValue::Bytes(raw)) => {
            type_tag = non_empty(decode_text(raw, field.truncated));
        }
        _ => {}
    });
    if let Err(err) = visited {
        debug!("unreadable attachment info: {err}");
    }

    (id, type_tag)
}

/// Decodes UTF-8, keeping the valid prefix of a cut string.
fn decode_text(raw: &[u8], truncated: bool) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(err) if truncated => String::from_utf8_lossy(&raw[..err.valid_up_to()]).into_owned(),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
