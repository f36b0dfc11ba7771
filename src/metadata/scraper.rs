//! Building a [`MediaRecord`] from a site scraper's capability set.
//!
//! Scrapers themselves live outside this crate. Anything implementing
//! [`Scraper`] can be normalized; the normalizer never sees a concrete site
//! type.

use super::record::{Actor, MediaRecord, NormalizeError, DEFAULT_COUNTRY, DEFAULT_RATING};
use super::text::{intro_filter, title_with_number};

/// Getters every supported metadata site exposes for one title.
pub trait Scraper {
    /// Identifier, e.g. `ABC-123`.
    fn number(&self) -> String;
    fn studio(&self) -> String;
    fn director(&self) -> String;
    /// Release date; `/` separators are accepted.
    fn release(&self) -> String;
    /// Synopsis; may contain HTML line breaks.
    fn intro(&self) -> String;
    fn runtime(&self) -> String;
    /// Cast in the order the site lists it, with headshot URLs.
    fn actors(&self) -> Vec<Actor>;
    fn tags(&self) -> Vec<String>;
    fn series(&self) -> String;
    fn cover(&self) -> String;
    /// Page the metadata was scraped from.
    fn uri(&self) -> String;
    /// Raw title, with or without the identifier.
    fn title(&self) -> String;
}

impl MediaRecord {
    /// Build a record from scraper output.
    ///
    /// The title always starts with the identifier exactly once, the synopsis
    /// has its HTML line breaks normalized, and rating and country take their
    /// fixed defaults.
    pub fn from_scraper(scraper: &dyn Scraper, site: &str) -> Result<Self, NormalizeError> {
        let number = scraper.number().trim().to_string();
        let studio = scraper.studio();
        let release = scraper.release().replace('/', "-");
        let intro = intro_filter(&scraper.intro());
        let tags = scraper.tags();

        MediaRecord {
            title: title_with_number(&number, &scraper.title()),
            sort_title: number.clone(),
            number,
            maker: studio.clone(),
            studio,
            director: scraper.director(),
            premiered: release.clone(),
            release,
            outline: intro.clone(),
            plot: intro,
            runtime: scraper.runtime(),
            mpaa: DEFAULT_RATING.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            actors: scraper.actors(),
            genres: tags.clone(),
            tags,
            set: scraper.series(),
            cover: scraper.cover(),
            website: scraper.uri(),
            source: site.to_string(),
            ..Default::default()
        }
        .normalize()
    }
}
