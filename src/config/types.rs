use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,

    #[serde(default)]
    pub artwork: ArtworkConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Maximum number of items converted at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Lowercase extensions recognized as videos (without the dot)
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// Lowercase extension of metadata files (without the dot)
    #[serde(default = "default_metadata_extension")]
    pub metadata_extension: String,
}

fn default_concurrency() -> usize {
    2
}

fn default_video_extensions() -> Vec<String> {
    avmeta_common::paths::video_extensions()
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_metadata_extension() -> String {
    avmeta_common::paths::metadata_extension().to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            video_extensions: default_video_extensions(),
            metadata_extension: default_metadata_extension(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtworkConfig {
    /// Download missing poster/fanart images referenced by the NFO
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Embed local poster/fanart bytes in the sidecar
    #[serde(default = "default_true")]
    pub embed: bool,

    #[serde(default = "default_poster_file")]
    pub poster_file: String,

    #[serde(default = "default_fanart_file")]
    pub fanart_file: String,

    /// HTTP request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header sent with every request; some image hosts require one
    #[serde(default)]
    pub referer: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_poster_file() -> String {
    "poster.jpg".to_string()
}

fn default_fanart_file() -> String {
    "fanart.jpg".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("avmeta/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            embed: true,
            poster_file: default_poster_file(),
            fanart_file: default_fanart_file(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            referer: None,
        }
    }
}
