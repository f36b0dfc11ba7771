//! Parsing `.vsmeta` files back into a [`VsMeta`] document.
//!
//! Fields this crate does not model (the TV show group, backdrop
//! timestamps written by Video Station itself) are skipped. Artwork MD5s are
//! not verified; the base64 payload is decoded as-is.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::document::{Credits, Image, MediaKind, VsMeta};
use crate::error::{Error, Result};
use crate::wire::{backdrop, credits, field, WireReader, WireType};

/// Decode a complete sidecar.
pub fn decode(data: &[u8]) -> Result<VsMeta> {
    let mut reader = WireReader::new(data);

    let (first, wire_type) = reader.read_key()?;
    if first != field::KIND || wire_type != WireType::Varint {
        return Err(Error::invalid_header(format!(
            "expected kind field, found field {first}"
        )));
    }
    let kind_value = reader.read_varint()?;
    let kind = MediaKind::from_u64(kind_value)
        .ok_or_else(|| Error::invalid_header(format!("unknown media kind {kind_value}")))?;

    let mut doc = VsMeta {
        kind,
        ..Default::default()
    };

    while !reader.is_empty() {
        let (number, wire_type) = reader.read_key()?;
        match (number, wire_type) {
            (field::TITLE, WireType::LengthDelimited) => doc.title = reader.read_string(number)?,
            (field::SORT_TITLE, WireType::LengthDelimited) => {
                doc.sort_title = reader.read_string(number)?
            }
            (field::TAGLINE, WireType::LengthDelimited) => {
                doc.tagline = reader.read_string(number)?
            }
            (field::YEAR, WireType::Varint) => doc.year = Some(reader.read_varint()? as u32),
            (field::RELEASE_DATE, WireType::LengthDelimited) => {
                doc.release_date = reader.read_string(number)?
            }
            (field::LOCKED, WireType::Varint) => doc.locked = reader.read_varint()? != 0,
            (field::SUMMARY, WireType::LengthDelimited) => {
                doc.summary = reader.read_string(number)?
            }
            (field::META_JSON, WireType::LengthDelimited) => {
                doc.meta_json = reader.read_string(number)?
            }
            (field::CREDITS, WireType::LengthDelimited) => {
                decode_credits(reader.read_bytes()?, &mut doc.credits)?
            }
            (field::CLASSIFICATION, WireType::LengthDelimited) => {
                doc.classification = reader.read_string(number)?
            }
            (field::RATING, WireType::Varint) => {
                let tenths = reader.read_varint()? as i64;
                doc.rating = (tenths >= 0).then(|| tenths as f32 / 10.0);
            }
            (field::POSTER_DATA, WireType::LengthDelimited) => {
                doc.poster = Some(decode_image(reader.read_bytes()?)?)
            }
            (field::BACKDROP, WireType::LengthDelimited) => {
                doc.backdrop = decode_backdrop(reader.read_bytes()?)?
            }
            (_, other) => reader.skip(other)?,
        }
    }

    Ok(doc)
}

fn decode_credits(data: &[u8], out: &mut Credits) -> Result<()> {
    let mut reader = WireReader::new(data);
    while !reader.is_empty() {
        let (number, wire_type) = reader.read_key()?;
        let list = match (number, wire_type) {
            (credits::CAST, WireType::LengthDelimited) => &mut out.cast,
            (credits::DIRECTOR, WireType::LengthDelimited) => &mut out.directors,
            (credits::GENRE, WireType::LengthDelimited) => &mut out.genres,
            (credits::WRITER, WireType::LengthDelimited) => &mut out.writers,
            (_, other) => {
                reader.skip(other)?;
                continue;
            }
        };
        list.push(reader.read_string(field::CREDITS)?);
    }
    Ok(())
}

fn decode_backdrop(data: &[u8]) -> Result<Option<Image>> {
    let mut reader = WireReader::new(data);
    let mut image = None;
    while !reader.is_empty() {
        match reader.read_key()? {
            (backdrop::DATA, WireType::LengthDelimited) => {
                image = Some(decode_image(reader.read_bytes()?)?)
            }
            (_, other) => reader.skip(other)?,
        }
    }
    Ok(image)
}

fn decode_image(text: &[u8]) -> Result<Image> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(Image::new(STANDARD.decode(compact)?))
}
