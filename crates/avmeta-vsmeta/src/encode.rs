//! Deterministic `.vsmeta` serialization.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{Bytes, BytesMut};
use md5::{Digest, Md5};

use crate::document::{Credits, Image, VsMeta};
use crate::wire::{self, backdrop, credits, field, WireType};

/// Column width of the base64 artwork text, matching MIME line wrapping.
const BASE64_LINE_WIDTH: usize = 76;

/// Serialize a document.
///
/// Text fields are written in document order; empty optional fields are
/// left out. The output depends only on the document, never on the clock.
///
/// # Examples
///
/// ```
/// use avmeta_vsmeta::{encode, VsMeta};
///
/// let bytes = encode(&VsMeta::movie("ABC-123 Title"));
/// assert_eq!(&bytes[..2], &[0x08, 0x01]);
/// ```
pub fn encode(doc: &VsMeta) -> Bytes {
    let mut buf = BytesMut::with_capacity(estimate_size(doc));

    wire::put_uint(&mut buf, field::KIND, doc.kind.as_u64());
    wire::put_str(&mut buf, field::TITLE, &doc.title);
    wire::put_str(&mut buf, field::SORT_TITLE, &doc.sort_title);
    wire::put_str(&mut buf, field::TAGLINE, &doc.tagline);

    if let Some(year) = doc.year {
        wire::put_uint(&mut buf, field::YEAR, u64::from(year));
    }
    if !doc.release_date.is_empty() {
        wire::put_str(&mut buf, field::RELEASE_DATE, &doc.release_date);
    }
    wire::put_uint(&mut buf, field::LOCKED, u64::from(doc.locked));
    if !doc.summary.is_empty() {
        wire::put_str(&mut buf, field::SUMMARY, &doc.summary);
    }
    if !doc.meta_json.is_empty() {
        wire::put_str(&mut buf, field::META_JSON, &doc.meta_json);
    }
    if !doc.credits.is_empty() {
        wire::put_bytes(&mut buf, field::CREDITS, &encode_credits(&doc.credits));
    }
    if !doc.classification.is_empty() {
        wire::put_str(&mut buf, field::CLASSIFICATION, &doc.classification);
    }
    wire::put_uint(&mut buf, field::RATING, rating_value(doc.rating));

    if let Some(poster) = doc.poster.as_ref().filter(|p| !p.is_empty()) {
        let (text, digest) = encode_image(poster);
        wire::put_str(&mut buf, field::POSTER_DATA, &text);
        wire::put_str(&mut buf, field::POSTER_MD5, &digest);
    }

    if let Some(backdrop_image) = doc.backdrop.as_ref().filter(|b| !b.is_empty()) {
        let (text, digest) = encode_image(backdrop_image);
        let mut group = BytesMut::with_capacity(text.len() + 48);
        wire::put_str(&mut group, backdrop::DATA, &text);
        wire::put_str(&mut group, backdrop::MD5, &digest);
        wire::put_bytes(&mut buf, field::BACKDROP, &group);
    }

    buf.freeze()
}

fn encode_credits(group: &Credits) -> BytesMut {
    let mut buf = BytesMut::new();
    for (tag, names) in [
        (credits::CAST, &group.cast),
        (credits::DIRECTOR, &group.directors),
        (credits::GENRE, &group.genres),
        (credits::WRITER, &group.writers),
    ] {
        for name in names {
            wire::put_str(&mut buf, tag, name);
        }
    }
    buf
}

/// Ratings are stored as tenths; unknown is `-1` in two's complement.
fn rating_value(rating: Option<f32>) -> u64 {
    match rating {
        Some(r) if r.is_finite() && r >= 0.0 => (r * 10.0).round() as u64,
        _ => -1i64 as u64,
    }
}

/// Base64 text (76-column lines, each newline-terminated) and the hex MD5 of
/// that text.
pub(crate) fn encode_image(image: &Image) -> (String, String) {
    let encoded = STANDARD.encode(&image.data);
    let mut text = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH + 1);
    for line in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
        // base64 output is pure ASCII
        text.extend(line.iter().map(|&b| b as char));
        text.push('\n');
    }
    let digest = hex::encode(Md5::digest(text.as_bytes()));
    (text, digest)
}

fn estimate_size(doc: &VsMeta) -> usize {
    let image_len = |image: &Option<Image>| image.as_ref().map_or(0, |i| i.len() * 4 / 3 + 128);
    256 + doc.title.len() * 3
        + doc.summary.len()
        + doc.meta_json.len()
        + image_len(&doc.poster)
        + image_len(&doc.backdrop)
}
