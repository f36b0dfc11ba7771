//! Metadata normalization.
//!
//! Two sources feed the same canonical [`MediaRecord`]:
//!
//! - [`nfo`] decodes `<movie>` NFO documents found next to videos.
//! - [`scraper`] adapts anything implementing [`Scraper`].
//!
//! Both finish with the same normalization pass, so downstream code never
//! needs to know where a record came from.

pub mod nfo;
mod record;
pub mod scraper;
mod text;

pub use nfo::NfoError;
pub use record::{Actor, MediaRecord, NormalizeError, DEFAULT_COUNTRY, DEFAULT_RATING, UNKNOWN_ACTOR};
pub use scraper::Scraper;
pub use text::{get_month, get_year, intro_filter, title_with_number};
