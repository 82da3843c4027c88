//! sitemap-config CLI
//!
//! Aggregates sitemap URL configuration from the declared sources and
//! exposes it for inspection, export, and hot-reload watching.

use anyhow::Result;
use arc_swap::ArcSwap;
use clap::Parser;
use flate2::Compression;
use flate2::write::GzEncoder;
use sitemap_config::aggregator::ConfigAggregator;
use sitemap_config::cli::{Cli, Command, ExportArgs, ListArgs, ListFormat};
use sitemap_config::config::{Config, ConfigLoader};
use sitemap_config::exclusion::ExclusionRules;
use sitemap_config::sitemap::{render_sitemap, write_sitemap_file};
use sitemap_config::sources::build_providers;
use sitemap_config::types::UrlList;
use sitemap_config::watcher::{WatchPaths, start_watcher};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // An explicit config path is handed to the loader via its env var.
    // SAFETY: This is safe at program startup before any other threads
    // are spawned.
    if let Some(config_path) = &cli.config {
        unsafe {
            std::env::set_var("SITEMAP_CONFIG_PATH", config_path);
        }
    }
    let loader = ConfigLoader::load()?;

    match cli.command {
        Command::List(args) => run_list(&loader, &args),
        Command::Check => run_check(&loader),
        Command::Export(args) => run_export(&loader, &args),
        Command::Watch => run_watch(loader).await,
    }
}

/// Build the aggregator from the loader's declared sources.
fn build_aggregator(loader: &ConfigLoader) -> ConfigAggregator {
    let base_dir = loader.base_dir();
    ConfigAggregator::new(build_providers(&loader.config().sources, &base_dir))
}

/// Run the list command
fn run_list(loader: &ConfigLoader, args: &ListArgs) -> Result<()> {
    let aggregator = build_aggregator(loader);
    let list = aggregator.get_by_key(&args.key)?;

    match args.format {
        ListFormat::Text => match &list {
            UrlList::Excluded(urls) => {
                for entry in urls {
                    match &entry.resource {
                        Some(resource) => println!("{}\t({})", entry.pattern, resource),
                        None => println!("{}", entry.pattern),
                    }
                }
            }
            UrlList::Custom(urls) => {
                for entry in urls {
                    println!("{}", entry.loc);
                }
            }
        },
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&list)?),
        ListFormat::Yaml => print!("{}", serde_yaml::to_string(&list)?),
    }

    Ok(())
}

/// Run the check command
fn run_check(loader: &ConfigLoader) -> Result<()> {
    let aggregator = build_aggregator(loader);
    if aggregator.provider_count() == 0 {
        println!("No sources configured.");
        return Ok(());
    }

    let mut failures = 0usize;
    for provider in aggregator.providers() {
        match provider.url_config() {
            Ok(config) => println!(
                "ok    {} ({} excluded, {} custom)",
                provider.name(),
                config.excluded_urls.len(),
                config.custom_urls.len()
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL  {}: {}", provider.name(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} sources failed", failures, aggregator.provider_count());
    }
    Ok(())
}

/// Export the merged, exclusion-filtered custom URLs as sitemap XML.
fn export_sitemap(
    config: &Config,
    aggregator: &ConfigAggregator,
    output: Option<&PathBuf>,
    gzip: bool,
    include_excluded: bool,
) -> Result<()> {
    let merged = aggregator.collect()?;
    let total = merged.custom_urls.len();

    let urls = if include_excluded {
        merged.custom_urls
    } else {
        let rules = ExclusionRules::compile(&merged.excluded_urls)?;
        rules.filter(merged.custom_urls)
    };
    let dropped = total - urls.len();

    let gzip = gzip || config.output.gzip;
    match output {
        Some(path) if path.as_os_str() == "-" => {
            if gzip {
                let stdout = std::io::stdout();
                let mut encoder = GzEncoder::new(stdout.lock(), Compression::default());
                encoder.write_all(render_sitemap(&urls).as_bytes())?;
                encoder.finish()?;
            } else {
                print!("{}", render_sitemap(&urls));
            }
        }
        Some(path) => {
            write_sitemap_file(path, &urls, gzip)?;
            info!("Exported {} URLs to {} ({} excluded)", urls.len(), path.display(), dropped);
        }
        None => {
            config.ensure_output_dir()?;
            write_sitemap_file(&config.output.path, &urls, gzip)?;
            info!(
                "Exported {} URLs to {} ({} excluded)",
                urls.len(),
                config.output.path.display(),
                dropped
            );
        }
    }
    Ok(())
}

/// Run the export command
fn run_export(loader: &ConfigLoader, args: &ExportArgs) -> Result<()> {
    let aggregator = build_aggregator(loader);
    export_sitemap(
        loader.config(),
        &aggregator,
        args.output.as_ref(),
        args.gzip,
        args.include_excluded,
    )
}

/// Run the watch command: export once, then re-export whenever the
/// config or a fragment file changes. A config change rebuilds the
/// provider set and swaps the aggregator atomically.
async fn run_watch(loader: ConfigLoader) -> Result<()> {
    let mut config = loader.config().clone();
    let aggregator = Arc::new(ArcSwap::from_pointee(build_aggregator(&loader)));

    // Initial export so watchers start from a current file.
    export_sitemap(&config, &aggregator.load(), None, false, false)?;

    let base_dir = loader.base_dir();
    let config_file = loader
        .sources_origin()
        .map(PathBuf::from)
        .or_else(|| loader.paths.project_file.clone().filter(|p| p.exists()));
    let fragment_files = config
        .sources
        .iter()
        .filter_map(|spec| spec.file_path(&base_dir))
        .collect();

    let watch_paths = WatchPaths {
        config_file,
        fragment_files,
    };
    let debounce = Duration::from_millis(config.watch.debounce_ms);
    let mut handle = start_watcher(watch_paths, debounce)?;
    info!("Watching for configuration changes (ctrl-c to stop)");

    while let Some(event) = handle.wait_for_change().await {
        if !event.requires_reload() {
            continue;
        }
        if event.requires_rebuild() {
            // Re-load configuration from disk using a fresh loader;
            // keep the current aggregator when the reload fails.
            match ConfigLoader::load() {
                Ok(new_loader) => {
                    config = new_loader.config().clone();
                    aggregator.store(Arc::new(build_aggregator(&new_loader)));
                    info!("Configuration reloaded");
                }
                Err(e) => {
                    warn!("Config reload failed: {}. Keeping current config.", e);
                }
            }
        }
        if let Err(e) = export_sitemap(&config, &aggregator.load(), None, false, false) {
            warn!("Re-export failed: {}", e);
        }
    }

    Ok(())
}
