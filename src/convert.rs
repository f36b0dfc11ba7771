//! Mapping a normalized [`MediaRecord`] onto the VSMeta document model.
//!
//! The container has tags for the headline fields only. Everything else the
//! record knows is carried in the meta JSON blob under an `avmeta` key, so a
//! sidecar can be traced back to the NFO it was built from.

use avmeta_vsmeta::{Credits, Image, VsMeta};
use serde::Serialize;

use crate::metadata::{Actor, MediaRecord};

/// Local artwork bytes to embed. `None` leaves the field out of the sidecar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artwork {
    pub poster: Option<Image>,
    pub backdrop: Option<Image>,
}

#[derive(Serialize)]
struct MetaEnvelope<'a> {
    avmeta: Meta<'a>,
}

/// Field order here is the order in the serialized JSON.
#[derive(Serialize)]
struct Meta<'a> {
    number: &'a str,
    studio: &'a str,
    maker: &'a str,
    label: &'a str,
    set: &'a str,
    runtime: &'a str,
    country: &'a str,
    month: &'a str,
    website: &'a str,
    cover: &'a str,
    poster: &'a str,
    fanart: &'a str,
    actors: &'a [Actor],
    tags: &'a [String],
    source: &'a str,
}

impl<'a> From<&'a MediaRecord> for Meta<'a> {
    fn from(record: &'a MediaRecord) -> Self {
        Self {
            number: &record.number,
            studio: &record.studio,
            maker: &record.maker,
            label: &record.label,
            set: &record.set,
            runtime: &record.runtime,
            country: &record.country,
            month: &record.month,
            website: &record.website,
            cover: &record.cover,
            poster: &record.poster,
            fanart: &record.fanart,
            actors: &record.actors,
            tags: &record.tags,
            source: &record.source,
        }
    }
}

/// Build the sidecar document for `record`.
pub fn to_vsmeta(record: &MediaRecord, artwork: &Artwork) -> VsMeta {
    let meta_json = serde_json::to_string(&MetaEnvelope {
        avmeta: Meta::from(record),
    })
    .unwrap_or_default();

    let directors = if record.director.is_empty() {
        Vec::new()
    } else {
        vec![record.director.clone()]
    };

    VsMeta {
        tagline: record.title.clone(),
        sort_title: record.sort_title.clone(),
        year: record.year.parse().ok(),
        release_date: record.release.clone(),
        summary: record.plot.clone(),
        meta_json,
        credits: Credits {
            cast: record.actors.iter().map(|a| a.name.clone()).collect(),
            directors,
            genres: record.genres.clone(),
            writers: Vec::new(),
        },
        classification: record.mpaa.clone(),
        poster: artwork.poster.clone().filter(|img| !img.is_empty()),
        backdrop: artwork.backdrop.clone().filter(|img| !img.is_empty()),
        ..VsMeta::movie(record.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MediaRecord {
        MediaRecord {
            title: "ABC-123 Some Thing".into(),
            sort_title: "ABC-123".into(),
            number: "ABC-123".into(),
            studio: "Studio".into(),
            maker: "Studio".into(),
            director: "Director".into(),
            release: "2021-05-12".into(),
            premiered: "2021-05-12".into(),
            year: "2021".into(),
            month: "05".into(),
            plot: "Line one\nLine two".into(),
            mpaa: "XXX".into(),
            country: "JP".into(),
            poster: "/videos/poster.jpg".into(),
            fanart: "/videos/fanart.jpg".into(),
            actors: vec![Actor::new("Actor A", "a.jpg"), Actor::new("Actor B", "")],
            tags: vec!["Drama".into()],
            genres: vec!["Drama".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_fields() {
        let doc = to_vsmeta(&record(), &Artwork::default());
        assert_eq!(doc.title, "ABC-123 Some Thing");
        assert_eq!(doc.tagline, doc.title);
        assert_eq!(doc.sort_title, "ABC-123");
        assert_eq!(doc.year, Some(2021));
        assert_eq!(doc.release_date, "2021-05-12");
        assert_eq!(doc.summary, "Line one\nLine two");
        assert_eq!(doc.classification, "XXX");
        assert!(doc.locked);
        assert_eq!(doc.rating, None);
        assert_eq!(doc.credits.cast, vec!["Actor A", "Actor B"]);
        assert_eq!(doc.credits.directors, vec!["Director"]);
        assert_eq!(doc.credits.genres, vec!["Drama"]);
        assert!(doc.credits.writers.is_empty());
        assert!(doc.poster.is_none());
        assert!(doc.backdrop.is_none());
    }

    #[test]
    fn test_meta_json() {
        let doc = to_vsmeta(&record(), &Artwork::default());
        let json: serde_json::Value = serde_json::from_str(&doc.meta_json).unwrap();
        let meta = &json["avmeta"];
        assert_eq!(meta["number"], "ABC-123");
        assert_eq!(meta["country"], "JP");
        assert_eq!(meta["month"], "05");
        assert_eq!(meta["fanart"], "/videos/fanart.jpg");
        assert_eq!(meta["actors"][0]["name"], "Actor A");
        assert_eq!(meta["actors"][0]["thumb"], "a.jpg");
        assert_eq!(meta["tags"][0], "Drama");
        assert_eq!(meta["source"], "");

        // field order is fixed
        assert!(doc.meta_json.starts_with(r#"{"avmeta":{"number":"ABC-123","studio":"#));
    }

    #[test]
    fn test_missing_year_and_director() {
        let record = MediaRecord {
            year: String::new(),
            director: String::new(),
            ..record()
        };
        let doc = to_vsmeta(&record, &Artwork::default());
        assert_eq!(doc.year, None);
        assert!(doc.credits.directors.is_empty());
    }

    #[test]
    fn test_artwork_embedded() {
        let artwork = Artwork {
            poster: Some(Image::new(vec![1, 2, 3])),
            backdrop: Some(Image::new(Vec::new())),
        };
        let doc = to_vsmeta(&record(), &artwork);
        assert_eq!(doc.poster, Some(Image::new(vec![1, 2, 3])));
        assert!(doc.backdrop.is_none());
    }

    #[test]
    fn test_deterministic() {
        let a = avmeta_vsmeta::encode(&to_vsmeta(&record(), &Artwork::default()));
        let b = avmeta_vsmeta::encode(&to_vsmeta(&record(), &Artwork::default()));
        assert_eq!(a, b);
    }
}
