//! Full-document layout checks against a reference sidecar.
//!
//! `fixtures/full.vsmeta` was assembled field by field from the community
//! documented Video Station layout, independently of this crate's encoder.

use avmeta_vsmeta::{decode, encode, Credits, Image, MediaKind, VsMeta};

const FULL: &[u8] = include_bytes!("fixtures/full.vsmeta");

fn full_document() -> VsMeta {
    VsMeta {
        kind: MediaKind::Movie,
        title: "ABC-123 Title".into(),
        sort_title: "ABC-123".into(),
        tagline: "ABC-123 Title".into(),
        year: Some(2021),
        release_date: "2021-05-12".into(),
        locked: true,
        summary: "Line one\nLine two".into(),
        meta_json: r#"{"avmeta":{"number":"ABC-123"}}"#.into(),
        credits: Credits {
            cast: vec!["Actor A".into(), "Actor B".into()],
            directors: vec!["Director".into()],
            genres: vec!["Drama".into()],
            writers: vec!["Writer".into()],
        },
        classification: "XXX".into(),
        rating: Some(7.5),
        poster: Some(Image::new((0u8..64).collect())),
        backdrop: Some(Image::new(vec![0xA5; 100])),
    }
}

fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[test]
fn test_encode_matches_reference() {
    let encoded = encode(&full_document());
    assert_eq!(encoded.len(), FULL.len());
    assert_eq!(&encoded[..], FULL);
}

#[test]
fn test_decode_reference() {
    assert_eq!(decode(FULL).unwrap(), full_document());
}

#[test]
fn test_reference_section_order() {
    // summary, meta JSON, credits, classification, rating
    let summary = position(FULL, b"\x42\x11Line one\nLine two").unwrap();
    let meta = position(FULL, b"\x4A\x1F{\"avmeta\"").unwrap();
    let credits = position(FULL, b"\x52\x2B\x0A\x07Actor A").unwrap();
    let classification = position(FULL, b"\x5A\x03XXX").unwrap();
    let rating = position(FULL, b"\x60\x4B").unwrap();
    assert!(summary < meta && meta < credits && credits < classification);
    assert!(classification < rating);

    // poster text then its digest, then the backdrop group
    let poster = position(FULL, &[0x8A, 0x01]).unwrap();
    let poster_md5 = position(FULL, &[0x92, 0x01, 0x20]).unwrap();
    let backdrop = position(FULL, &[0xAA, 0x01]).unwrap();
    assert!(rating < poster && poster < poster_md5 && poster_md5 < backdrop);

    // backdrop group: 175 bytes holding data (0x0A, 138 bytes) then digest
    // (0x12, 32 hex chars), and it is the last field
    assert_eq!(&FULL[backdrop..backdrop + 7], &[0xAA, 0x01, 0xAF, 0x01, 0x0A, 0x8A, 0x01]);
    assert_eq!(FULL.len() - backdrop, 4 + 175);
    assert_eq!(&FULL[FULL.len() - 34..FULL.len() - 32], &[0x12, 0x20]);
}
