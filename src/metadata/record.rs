//! The canonical [`MediaRecord`] and the invariants every entry point ends in.

use std::collections::BTreeMap;

use serde::Serialize;

use super::text::{get_month, get_year, intro_filter};

/// Content rating written when the source has none.
pub const DEFAULT_RATING: &str = "XXX";

/// Country written when the source has none.
pub const DEFAULT_COUNTRY: &str = "JP";

/// Placeholder used for `{actor}` when a record has no cast.
pub const UNKNOWN_ACTOR: &str = "Unknown actor";

/// A performer credited on a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub name: String,
    /// Headshot URL; may be empty.
    pub thumb: String,
}

impl Actor {
    pub fn new(name: impl Into<String>, thumb: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thumb: thumb.into(),
        }
    }
}

/// Errors raised while enforcing record invariants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The identifier used to name the sidecar is missing.
    #[error("metadata has no identifier number")]
    MissingNumber,

    /// The identifier cannot be used as a file name inside the video's
    /// directory.
    #[error("identifier number {0:?} is not a plain file name")]
    UnsafeNumber(String),
}

/// Whether `number` names a file in the current directory and nothing else.
fn is_plain_file_stem(number: &str) -> bool {
    !matches!(number, "." | "..") && !number.contains(['/', '\\', '\0'])
}

/// Canonical, encoder-ready metadata for one title.
///
/// Built fresh per item by [`MediaRecord::from_nfo`] or
/// [`MediaRecord::from_scraper`], and never shared between items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub title: String,
    pub sort_title: String,
    /// Identifier; the stem of the produced sidecar file name.
    pub number: String,
    pub studio: String,
    pub maker: String,
    pub director: String,
    /// Release date, `YYYY-MM-DD` when the source is well formed.
    pub release: String,
    pub premiered: String,
    /// Derived from `release`; empty when it has no 4-digit run.
    pub year: String,
    /// Derived from `release`; empty unless it contains a full date.
    pub month: String,
    pub plot: String,
    pub outline: String,
    pub runtime: String,
    pub mpaa: String,
    pub country: String,
    /// Local poster path once the pipeline has rewritten it, else the source URL.
    pub poster: String,
    pub thumb: String,
    /// Local fan-art path once the pipeline has rewritten it, else the source URL.
    pub fanart: String,
    pub cover: String,
    pub website: String,
    pub actors: Vec<Actor>,
    pub tags: Vec<String>,
    /// Always equal to `tags` after normalization.
    pub genres: Vec<String>,
    pub set: String,
    pub label: String,
    /// Name of the scraper site; empty for records read from an NFO file.
    pub source: String,
}

impl MediaRecord {
    /// Enforce the invariants shared by every entry point.
    pub(crate) fn normalize(mut self) -> Result<Self, NormalizeError> {
        for field in [
            &mut self.title,
            &mut self.sort_title,
            &mut self.number,
            &mut self.studio,
            &mut self.maker,
            &mut self.director,
            &mut self.release,
            &mut self.premiered,
            &mut self.runtime,
            &mut self.mpaa,
            &mut self.country,
            &mut self.poster,
            &mut self.thumb,
            &mut self.fanart,
            &mut self.cover,
            &mut self.website,
            &mut self.set,
            &mut self.label,
            &mut self.source,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }

        if self.number.is_empty() {
            return Err(NormalizeError::MissingNumber);
        }
        if !is_plain_file_stem(&self.number) {
            return Err(NormalizeError::UnsafeNumber(self.number));
        }

        self.release = self.release.replace('/', "-");
        if self.release.is_empty() {
            self.release = self.premiered.replace('/', "-");
        }
        if self.premiered.is_empty() {
            self.premiered = self.release.clone();
        }
        self.year = get_year(&self.release);
        self.month = get_month(&self.release);

        self.plot = intro_filter(&self.plot);
        self.outline = if self.outline.trim().is_empty() {
            self.plot.clone()
        } else {
            intro_filter(&self.outline)
        };

        if self.sort_title.is_empty() {
            self.sort_title = self.number.clone();
        }
        if self.maker.is_empty() {
            self.maker = self.studio.clone();
        } else if self.studio.is_empty() {
            self.studio = self.maker.clone();
        }
        if self.mpaa.is_empty() {
            self.mpaa = DEFAULT_RATING.to_string();
        }
        if self.country.is_empty() {
            self.country = DEFAULT_COUNTRY.to_string();
        }

        self.actors = std::mem::take(&mut self.actors)
            .into_iter()
            .filter_map(|actor| {
                let name = actor.name.trim();
                (!name.is_empty()).then(|| Actor::new(name, actor.thumb.trim()))
            })
            .collect();

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len() + self.genres.len());
        for tag in self.tags.iter().chain(self.genres.iter()) {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        self.genres = tags.clone();
        self.tags = tags;

        Ok(self)
    }

    /// Substitution map for naming templates (`{number}`, `{title}`, ...).
    ///
    /// `{actor}` is the first credited actor, `{actors}` the comma-joined cast.
    pub fn placeholders(&self) -> BTreeMap<&'static str, String> {
        let names: Vec<&str> = self.actors.iter().map(|a| a.name.as_str()).collect();

        BTreeMap::from([
            (
                "{actor}",
                names.first().copied().unwrap_or(UNKNOWN_ACTOR).to_string(),
            ),
            ("{actors}", names.join(",")),
            ("{number}", self.number.clone()),
            ("{release}", self.release.clone()),
            ("{year}", self.year.clone()),
            ("{month}", self.month.clone()),
            ("{studio}", self.studio.clone()),
            ("{title}", self.title.clone()),
        ])
    }

    /// Expand every known placeholder in `template`. Unknown braces are kept.
    pub fn render(&self, template: &str) -> String {
        self.placeholders()
            .iter()
            .fold(template.to_string(), |out, (key, value)| out.replace(key, value))
    }
}
