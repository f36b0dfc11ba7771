//! Decoding `<movie>` NFO documents into a [`MediaRecord`].
//!
//! Free-text elements (title, studio, maker, director, plot, outline, tag,
//! genre) keep their raw inner content, so embedded markup such as `<br>`
//! survives until normalization; only a lone CDATA wrapper is removed. All
//! other elements are unescaped.

use std::borrow::Cow;

use quick_xml::escape::{unescape, EscapeError};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::record::{Actor, MediaRecord, NormalizeError};

/// Name of the document element.
const ROOT: &[u8] = b"movie";

/// Errors raised while reading an NFO document.
#[derive(Debug, thiserror::Error)]
pub enum NfoError {
    #[error("not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] EscapeError),

    #[error("no <movie> element found")]
    MissingRoot,

    #[error("expected <movie> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("document ended inside <{0}>")]
    UnexpectedEof(&'static str),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl MediaRecord {
    /// Decode an NFO file's bytes and normalize the result.
    ///
    /// # Errors
    ///
    /// Fails on invalid UTF-8, malformed XML, a root element other than
    /// `<movie>`, or a document without a `<num>` identifier.
    pub fn from_nfo(data: &[u8]) -> Result<Self, NfoError> {
        let text = std::str::from_utf8(data)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == ROOT => {
                    return Ok(read_movie(&mut reader)?.normalize()?);
                }
                Event::Empty(e) if e.name().as_ref() == ROOT => {
                    return Ok(MediaRecord::default().normalize()?);
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(NfoError::UnexpectedRoot(
                        String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ));
                }
                Event::Eof => return Err(NfoError::MissingRoot),
                _ => {}
            }
        }
    }
}

fn read_movie(reader: &mut Reader<&[u8]>) -> Result<MediaRecord, NfoError> {
    let mut record = MediaRecord::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"actor" {
                    record.actors.push(read_actor(reader)?);
                    continue;
                }
                let raw = reader.read_text(e.name())?;
                assign(&mut record, e.name().as_ref(), &raw)?;
            }
            Event::End(_) => return Ok(record),
            Event::Eof => return Err(NfoError::UnexpectedEof("movie")),
            _ => {}
        }
    }
}

fn read_actor(reader: &mut Reader<&[u8]>) -> Result<Actor, NfoError> {
    let mut actor = Actor::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let raw = reader.read_text(e.name())?;
                match e.name().as_ref() {
                    b"name" => actor.name = plain(&raw)?,
                    b"thumb" => actor.thumb = plain(&raw)?,
                    _ => {}
                }
            }
            Event::End(_) => return Ok(actor),
            Event::Eof => return Err(NfoError::UnexpectedEof("actor")),
            _ => {}
        }
    }
}

fn assign(record: &mut MediaRecord, name: &[u8], raw: &str) -> Result<(), NfoError> {
    match name {
        b"title" => record.title = inner(raw),
        b"sorttitle" => record.sort_title = plain(raw)?,
        b"num" => record.number = plain(raw)?,
        b"studio" => record.studio = inner(raw),
        b"maker" => record.maker = inner(raw),
        b"director" => record.director = inner(raw),
        b"release" => record.release = plain(raw)?,
        b"premiered" => record.premiered = plain(raw)?,
        b"year" => record.year = plain(raw)?,
        b"plot" => record.plot = inner(raw),
        b"outline" => record.outline = inner(raw),
        b"runtime" => record.runtime = plain(raw)?,
        b"mpaa" => record.mpaa = plain(raw)?,
        b"country" => record.country = plain(raw)?,
        b"poster" => record.poster = plain(raw)?,
        b"thumb" => record.thumb = plain(raw)?,
        b"fanart" => record.fanart = plain(raw)?,
        b"tag" => record.tags.push(inner(raw)),
        b"genre" => record.genres.push(inner(raw)),
        b"set" => record.set = plain(raw)?,
        b"label" => record.label = plain(raw)?,
        b"cover" => record.cover = plain(raw)?,
        b"website" => record.website = plain(raw)?,
        _ => {}
    }
    Ok(())
}

/// Raw inner content, trimmed. A lone CDATA section is unwrapped.
fn inner(raw: &str) -> String {
    let raw = raw.trim();
    cdata(raw).unwrap_or(raw).trim().to_string()
}

/// Character data of a plain element: CDATA unwrapped, entities resolved.
fn plain(raw: &str) -> Result<String, NfoError> {
    let raw = raw.trim();
    if let Some(section) = cdata(raw) {
        return Ok(section.trim().to_string());
    }
    let text: Cow<'_, str> = unescape(raw)?;
    Ok(text.trim().to_string())
}

fn cdata(raw: &str) -> Option<&str> {
    raw.strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .filter(|section| !section.contains("]]>"))
}
