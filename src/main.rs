mod cli;

use avmeta::{
    config,
    metadata::MediaRecord,
    pipeline::{Pipeline, PipelineContext},
    scanner::{self, MatchRules},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "avmeta=debug,avmeta_vsmeta=debug".to_string()
        } else {
            "avmeta=info,avmeta_vsmeta=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Nfo {
            dir,
            concurrency,
            no_artwork,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(convert_dir(
                root_or_cwd(dir)?,
                cli.config.as_deref(),
                concurrency,
                no_artwork,
            ))
        }
        Commands::Scan { dir, format } => {
            scan_dir(&root_or_cwd(dir)?, cli.config.as_deref(), format.as_deref())
        }
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("avmeta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn root_or_cwd(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

async fn convert_dir(
    root: PathBuf,
    config_path: Option<&Path>,
    concurrency: Option<usize>,
    no_artwork: bool,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(concurrency) = concurrency {
        config.convert.concurrency = concurrency;
    }
    if no_artwork {
        config.artwork.enabled = false;
    }
    config::validate_config(&config)?;

    let outcome = scanner::scan(&root, &MatchRules::from(&config.convert))
        .with_context(|| format!("Failed to scan {:?}", root))?;
    for failure in &outcome.failures {
        tracing::error!(path = %failure.path.display(), "Scan failed: {}", failure.message);
    }

    let pipeline = Pipeline::new(PipelineContext::from_config(&config)?);
    let report = pipeline.run(outcome.triples).await;

    println!(
        "Converted {} of {} ({} failed)",
        report.succeeded, report.discovered, report.failed
    );

    Ok(())
}

fn scan_dir(root: &Path, config_path: Option<&Path>, format: Option<&str>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let outcome = scanner::scan(root, &MatchRules::from(&config.convert))
        .with_context(|| format!("Failed to scan {:?}", root))?;

    for triple in &outcome.triples {
        let Some(template) = format else {
            println!("{} -> {}", triple.nfo.display(), triple.video.display());
            continue;
        };

        let parsed = std::fs::read(&triple.nfo)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| MediaRecord::from_nfo(&bytes).map_err(anyhow::Error::from));
        match parsed {
            Ok(record) => println!("{}", record.render(template)),
            Err(e) => tracing::error!(path = %triple.nfo.display(), "Cannot read NFO: {}", e),
        }
    }

    for failure in &outcome.failures {
        tracing::error!(path = %failure.path.display(), "Scan failed: {}", failure.message);
    }

    println!(
        "{} pairing(s), {} unreadable path(s)",
        outcome.triples.len(),
        outcome.failures.len()
    );

    Ok(())
}

fn inspect_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let data = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let doc = avmeta_vsmeta::decode(&data).with_context(|| format!("Failed to decode {:?}", file))?;

    if json {
        let meta: serde_json::Value =
            serde_json::from_str(&doc.meta_json).unwrap_or(serde_json::Value::Null);
        let value = serde_json::json!({
            "kind": format!("{:?}", doc.kind),
            "title": doc.title,
            "sort_title": doc.sort_title,
            "tagline": doc.tagline,
            "year": doc.year,
            "release_date": doc.release_date,
            "locked": doc.locked,
            "summary": doc.summary,
            "meta": meta,
            "cast": doc.credits.cast,
            "directors": doc.credits.directors,
            "genres": doc.credits.genres,
            "writers": doc.credits.writers,
            "classification": doc.classification,
            "rating": doc.rating,
            "poster_bytes": doc.poster.as_ref().map(|img| img.len()),
            "backdrop_bytes": doc.backdrop.as_ref().map(|img| img.len()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("File: {}", file.display());
        println!("Kind: {:?}", doc.kind);
        println!("Title: {}", doc.title);
        println!("Sort title: {}", doc.sort_title);
        if let Some(year) = doc.year {
            println!("Year: {}", year);
        }
        if !doc.release_date.is_empty() {
            println!("Release: {}", doc.release_date);
        }
        println!("Classification: {}", doc.classification);
        match doc.rating {
            Some(rating) => println!("Rating: {:.1}", rating),
            None => println!("Rating: unknown"),
        }
        println!("Cast: {}", doc.credits.cast.join(", "));
        println!("Directors: {}", doc.credits.directors.join(", "));
        println!("Genres: {}", doc.credits.genres.join(", "));
        println!(
            "Poster: {}",
            doc.poster
                .as_ref()
                .map(|img| format!("{} bytes", img.len()))
                .unwrap_or_else(|| "none".to_string())
        );
        println!(
            "Backdrop: {}",
            doc.backdrop
                .as_ref()
                .map(|img| format!("{} bytes", img.len()))
                .unwrap_or_else(|| "none".to_string())
        );
        if !doc.summary.is_empty() {
            println!("\n{}", doc.summary);
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    println!("  Concurrency: {}", config.convert.concurrency);
    println!(
        "  Video extensions: {}",
        config.convert.video_extensions.join(", ")
    );
    println!("  Metadata extension: {}", config.convert.metadata_extension);
    println!("  Artwork download: {}", config.artwork.enabled);
    println!("  Artwork embed: {}", config.artwork.embed);
    println!("  HTTP timeout: {}s", config.artwork.timeout_secs);
}
