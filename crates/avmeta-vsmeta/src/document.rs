//! In-memory representation of a `.vsmeta` document.

/// What kind of entry a sidecar describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    /// A standalone movie.
    #[default]
    Movie,
    /// A TV show episode. Decoded for inspection only; the show group is
    /// skipped and never written.
    TvShow,
}

impl MediaKind {
    /// Wire value of the kind field.
    pub fn as_u64(self) -> u64 {
        match self {
            Self::Movie => 1,
            Self::TvShow => 2,
        }
    }

    /// Parse a wire value, returning `None` for unknown kinds.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Movie),
            2 => Some(Self::TvShow),
            _ => None,
        }
    }
}

/// People and genre lists, stored in their own group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credits {
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub genres: Vec<String>,
    pub writers: Vec<String>,
}

impl Credits {
    /// True when no list has an entry.
    pub fn is_empty(&self) -> bool {
        self.cast.is_empty()
            && self.directors.is_empty()
            && self.genres.is_empty()
            && self.writers.is_empty()
    }
}

/// Embedded artwork, held as raw image file bytes.
///
/// The container stores the base64 text of these bytes plus the MD5 of that
/// text; both are derived during encoding.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("len", &self.data.len())
            .finish()
    }
}

/// A complete `.vsmeta` document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VsMeta {
    pub kind: MediaKind,
    pub title: String,
    pub sort_title: String,
    pub tagline: String,
    pub year: Option<u32>,
    /// Release date as `YYYY-MM-DD`; empty when unknown.
    pub release_date: String,
    /// Locked entries are not overwritten by Video Station's own lookups.
    pub locked: bool,
    pub summary: String,
    /// Free-form JSON blob; empty to omit.
    pub meta_json: String,
    pub credits: Credits,
    pub classification: String,
    /// Rating on a 0-10 scale, stored with one decimal of precision.
    pub rating: Option<f32>,
    pub poster: Option<Image>,
    pub backdrop: Option<Image>,
}

impl VsMeta {
    /// A locked movie document with the given title.
    pub fn movie(title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Movie,
            title: title.into(),
            locked: true,
            ..Default::default()
        }
    }
}
