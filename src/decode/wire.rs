//! Protobuf wire-format reader.
//!
//! Reads just enough of the wire format for the note schema: varints,
//! length-delimited fields and fixed-width fields (which are skipped by the
//! caller). Group wire types are rejected. A length prefix that runs past the
//! end of the buffer yields the bytes that are present and marks the field
//! truncated, so callers can keep whatever prefix of the data is usable.

use thiserror::Error;

/// Errors while reading wire-format fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintOverflow { offset: usize },

    #[error("invalid field number {number} at byte {offset}")]
    InvalidFieldNumber { number: u64, offset: usize },

    #[error("unsupported wire type {wire_type} for field {number} at byte {offset}")]
    UnsupportedWireType {
        number: u32,
        wire_type: u8,
        offset: usize,
    },
}

/// Value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Bytes(&'a [u8]),
    Fixed32(u32),
}

/// One decoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub number: u32,
    pub value: WireValue<'a>,
    /// The length prefix promised more bytes than the buffer holds.
    pub truncated: bool,
}

/// Sequential reader over the fields of one message.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Reads the next field, or `None` at the end of the buffer.
    pub fn next_field(&mut self) -> Result<Option<Field<'a>>, WireError> {
        if self.is_empty() {
            return Ok(None);
        }

        let offset = self.pos;
        let key = self.read_varint()?;
        let number = key >> 3;
        if number == 0 || number > u64::from(u32::MAX >> 3) {
            return Err(WireError::InvalidFieldNumber { number, offset });
        }
        let number = number as u32;
        let wire_type = (key & 0x7) as u8;

        let mut truncated = false;
        let value = match wire_type {
            0 => WireValue::Varint(self.read_varint()?),
            1 => WireValue::Fixed64(u64::from_le_bytes(self.take_array()?)),
            2 => {
                let declared = self.read_varint()?;
                let available = self.buf.len() - self.pos;
                let len = match usize::try_from(declared) {
                    Ok(len) if len <= available => len,
                    _ => {
                        truncated = true;
                        available
                    }
                };
                let bytes = &self.buf[self.pos..self.pos + len];
                self.pos += len;
                WireValue::Bytes(bytes)
            }
            5 => WireValue::Fixed32(u32::from_le_bytes(self.take_array()?)),
            other => {
                return Err(WireError::UnsupportedWireType {
                    number,
                    wire_type: other,
                    offset,
                });
            }
        };

        Ok(Some(Field {
            number,
            value,
            truncated,
        }))
    }

    fn read_varint(&mut self) -> Result<u64, WireError> {
        let start = self.pos;
        let mut result = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or(WireError::UnexpectedEof { offset: start })?;
            self.pos += 1;
            result |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(WireError::VarintOverflow { offset: start })
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let end = self
            .pos
            .checked_add(N)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::UnexpectedEof { offset: self.pos })?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(out)
    }
}
