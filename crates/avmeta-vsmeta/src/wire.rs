//! Varint, key, and length-delimited primitives.

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Result};

/// Field numbers of the top-level document.
pub(crate) mod field {
    pub const KIND: u32 = 1;
    pub const TITLE: u32 = 2;
    pub const SORT_TITLE: u32 = 3;
    pub const TAGLINE: u32 = 4;
    pub const YEAR: u32 = 5;
    pub const RELEASE_DATE: u32 = 6;
    pub const LOCKED: u32 = 7;
    pub const SUMMARY: u32 = 8;
    pub const META_JSON: u32 = 9;
    pub const CREDITS: u32 = 10;
    pub const CLASSIFICATION: u32 = 11;
    pub const RATING: u32 = 12;
    pub const POSTER_DATA: u32 = 17;
    pub const POSTER_MD5: u32 = 18;
    pub const BACKDROP: u32 = 21;
}

/// Field numbers inside the credits group.
pub(crate) mod credits {
    pub const CAST: u32 = 1;
    pub const DIRECTOR: u32 = 2;
    pub const GENRE: u32 = 3;
    pub const WRITER: u32 = 4;
}

/// Field numbers inside the backdrop group.
pub(crate) mod backdrop {
    pub const DATA: u32 = 1;
    pub const MD5: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireType {
    Varint,
    LengthDelimited,
}

impl WireType {
    fn bits(self) -> u64 {
        match self {
            Self::Varint => 0,
            Self::LengthDelimited => 2,
        }
    }
}

pub(crate) fn put_varint(buf: &mut BytesMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

pub(crate) fn put_key(buf: &mut BytesMut, field: u32, wire_type: WireType) {
    put_varint(buf, (u64::from(field) << 3) | wire_type.bits());
}

pub(crate) fn put_uint(buf: &mut BytesMut, field: u32, value: u64) {
    put_key(buf, field, WireType::Varint);
    put_varint(buf, value);
}

pub(crate) fn put_bytes(buf: &mut BytesMut, field: u32, data: &[u8]) {
    put_key(buf, field, WireType::LengthDelimited);
    put_varint(buf, data.len() as u64);
    buf.put_slice(data);
}

pub(crate) fn put_str(buf: &mut BytesMut, field: u32, value: &str) {
    put_bytes(buf, field, value.as_bytes());
}

/// Cursor over an encoded buffer.
pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub(crate) fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = *self.data.get(self.pos).ok_or(Error::BufferUnderflow {
                need: self.pos - start + 1,
                have: self.data.len() - start,
            })?;
            self.pos += 1;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(Error::VarintOverflow(start))
    }

    /// Read a field key, returning the field number and wire type.
    pub(crate) fn read_key(&mut self) -> Result<(u32, WireType)> {
        let key = self.read_varint()?;
        let field = (key >> 3) as u32;
        match key & 0x7 {
            0 => Ok((field, WireType::Varint)),
            2 => Ok((field, WireType::LengthDelimited)),
            other => Err(Error::UnsupportedWireType {
                field,
                wire_type: other as u8,
            }),
        }
    }

    pub(crate) fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varint()? as usize;
        let have = self.data.len() - self.pos;
        if len > have {
            return Err(Error::BufferUnderflow { need: len, have });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn read_string(&mut self, field: u32) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8(field))
    }

    /// Skip the value of a field the caller does not understand.
    pub(crate) fn skip(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::LengthDelimited => self.read_bytes().map(|_| ()),
        }
    }
}
