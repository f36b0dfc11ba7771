mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    prepare_extensions(&mut config.convert);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./avmeta.toml", "~/.config/avmeta/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Extensions are matched lowercased and without a leading dot.
fn prepare_extensions(convert: &mut ConvertConfig) {
    for ext in convert.video_extensions.iter_mut() {
        *ext = ext.trim_start_matches('.').to_ascii_lowercase();
    }
    convert.metadata_extension = convert
        .metadata_extension
        .trim_start_matches('.')
        .to_ascii_lowercase();
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.convert.concurrency == 0 {
        anyhow::bail!("convert.concurrency must be at least 1");
    }

    if config.convert.video_extensions.iter().all(|ext| ext.is_empty()) {
        anyhow::bail!("convert.video_extensions cannot be empty");
    }

    if config.convert.metadata_extension.is_empty() {
        anyhow::bail!("convert.metadata_extension cannot be empty");
    }

    if config.artwork.timeout_secs == 0 {
        anyhow::bail!("artwork.timeout_secs must be greater than 0");
    }

    if config.artwork.poster_file.trim().is_empty() || config.artwork.fanart_file.trim().is_empty()
    {
        anyhow::bail!("artwork.poster_file and artwork.fanart_file cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.convert.concurrency, 2);
        assert_eq!(config.convert.video_extensions.len(), 8);
        assert!(config.convert.video_extensions.contains(&"rmvb".to_string()));
        assert_eq!(config.convert.metadata_extension, "nfo");
        assert!(config.artwork.enabled);
        assert!(config.artwork.embed);
        assert_eq!(config.artwork.poster_file, "poster.jpg");
        assert_eq!(config.artwork.fanart_file, "fanart.jpg");
        assert_eq!(config.artwork.timeout_secs, 30);
        assert!(config.artwork.user_agent.starts_with("avmeta/"));
        assert!(config.artwork.referer.is_none());
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let file = write_config(
            r#"
[convert]
concurrency = 8
video_extensions = [".MKV", "mp4"]

[artwork]
enabled = false
referer = "https://www.example.com/"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.convert.concurrency, 8);
        assert_eq!(config.convert.video_extensions, vec!["mkv", "mp4"]);
        assert_eq!(config.convert.metadata_extension, "nfo");
        assert!(!config.artwork.enabled);
        assert!(config.artwork.embed);
        assert_eq!(
            config.artwork.referer.as_deref(),
            Some("https://www.example.com/")
        );
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let file = write_config("[convert]\nconcurrency = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = write_config("[artwork]\ntimeout_secs = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_extensions() {
        let file = write_config("[convert]\nvideo_extensions = []\n");
        assert!(load_config(file.path()).is_err());

        let file = write_config("[convert]\nmetadata_extension = \"\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_artwork_names() {
        let file = write_config("[artwork]\nposter_file = \"\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[convert\nconcurrency = 2");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_custom_path() {
        let err = load_config_or_default(Some(Path::new("/nonexistent/avmeta.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
