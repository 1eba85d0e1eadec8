//! Builder for note body blobs in the Apple Notes schema.

// Not every test binary uses every helper
#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

fn put_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn put_varint_field(out: &mut Vec<u8>, field: u32, value: u64) {
    put_varint(out, u64::from(field) << 3);
    put_varint(out, value);
}

fn put_bytes(out: &mut Vec<u8>, field: u32, bytes: &[u8]) {
    put_varint(out, (u64::from(field) << 3) | 2);
    put_varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Fluent builder: text plus attribute runs, encoded on demand.
///
/// ```ignore
/// let blob = NoteBlob::new("Tag: \u{FFFC} done")
///     .attachment(6, "X", "com.apple.notes.inlinetextattachment.hashtag")
///     .plain(5)
///     .gzip();
/// ```
#[derive(Debug, Clone)]
pub struct NoteBlob {
    text: String,
    runs: Vec<(u64, Option<(String, String)>)>,
}

impl NoteBlob {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            runs: Vec::new(),
        }
    }

    /// Adds a formatting-only run.
    pub fn plain(mut self, length: u64) -> Self {
        self.runs.push((length, None));
        self
    }

    /// Adds a run carrying attachment info.
    pub fn attachment(mut self, length: u64, id: &str, type_uti: &str) -> Self {
        self.runs
            .push((length, Some((id.to_string(), type_uti.to_string()))));
        self
    }

    /// Encodes the full `NoteStoreProto` envelope, uncompressed.
    pub fn encode(&self) -> Vec<u8> {
        let mut note = Vec::new();
        put_bytes(&mut note, 2, self.text.as_bytes());
        for (length, attachment) in &self.runs {
            let mut run = Vec::new();
            put_varint_field(&mut run, 1, *length);
            // A formatting field the decoder must skip
            put_varint_field(&mut run, 5, 1);
            if let Some((id, type_uti)) = attachment {
                let mut info = Vec::new();
                put_bytes(&mut info, 1, id.as_bytes());
                put_bytes(&mut info, 2, type_uti.as_bytes());
                put_bytes(&mut run, 12, &info);
            }
            put_bytes(&mut note, 5, &run);
        }

        let mut document = Vec::new();
        put_varint_field(&mut document, 2, 0);
        put_bytes(&mut document, 3, &note);
        let mut store = Vec::new();
        put_bytes(&mut store, 2, &document);
        store
    }

    /// Encodes and gzips, as Apple Notes stores bodies.
    pub fn gzip(&self) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&self.encode())
            .expect("writing to a Vec cannot fail");
        encoder.finish().expect("writing to a Vec cannot fail")
    }
}
