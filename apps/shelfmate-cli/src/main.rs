use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use shelfmate_core::catalog::{CatalogLoader, DEFAULT_MAX_ITEMS};
use shelfmate_core::config::{resolve_with_base, Config, DEFAULT_CATALOG_PATH, DEFAULT_RECOMMENDATIONS, DEFAULT_SAMPLE_SIZE};
use shelfmate_engine::ContentRecommender;

mod cli;
mod presenter;

use cli::{Args, Command};
use presenter::Presenter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// The `--catalog` path (or `SHELFMATE_CATALOG`) wins over `catalog.path`;
/// either is expanded and resolved against `base`.
fn resolve_catalog_path(flag: Option<&Path>, configured: String, base: &Path) -> PathBuf {
    let raw = flag.map(|p| p.to_string_lossy().into_owned()).unwrap_or(configured);
    resolve_with_base(base, raw)
}

fn build_recommender(books: Vec<shelfmate_core::types::Book>) -> anyhow::Result<ContentRecommender> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Building similarity matrix for {} books", books.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    let recommender = ContentRecommender::build(books);
    pb.finish_and_clear();
    Ok(recommender?)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let configured: String = config.get_or("catalog.path", DEFAULT_CATALOG_PATH.to_string());
    let catalog_path = resolve_catalog_path(args.catalog.as_deref(), configured, &std::env::current_dir()?);
    let max_items = if args.all { None } else { Some(args.max_items.unwrap_or_else(|| config.get_or("catalog.max_items", DEFAULT_MAX_ITEMS))) };
    let default_k: usize = config.get_or("recommend.default_k", DEFAULT_RECOMMENDATIONS);
    let sample_size: usize = config.get_or("presenter.sample_size", DEFAULT_SAMPLE_SIZE);
    tracing::debug!(catalog = %catalog_path.display(), ?max_items, default_k, sample_size, "resolved settings");

    if !catalog_path.exists() {
        eprintln!("❌ Catalog not found: {}", catalog_path.display());
        eprintln!("   Pass --catalog <PATH> or set catalog.path in config.toml");
        std::process::exit(1);
    }

    let catalog = CatalogLoader::new()
        .with_max_items(max_items)
        .load_csv(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let stats = catalog.stats;
    let recommender = build_recommender(catalog.books)?;
    let presenter = Presenter::new(&recommender, stats, default_k, sample_size);

    let mut stdout = io::stdout().lock();
    let mut rng = rand::thread_rng();
    match args.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            presenter.run(&mut io::stdin().lock(), &mut stdout, &mut rng)?;
        }
        Command::Query { title, k, scores, json } => {
            let k = k.unwrap_or(default_k);
            if json {
                match recommender.recommend_scored(&title, k) {
                    Ok(hits) => writeln!(stdout, "{}", serde_json::to_string_pretty(&hits)?)?,
                    Err(e) => { eprintln!("{}", e); std::process::exit(1); }
                }
            } else if !presenter.write_answer(&mut stdout, &title, k, scores)? {
                std::process::exit(1);
            }
        }
        Command::Sample { count } => {
            presenter.write_sample(&mut stdout, &mut rng, count.unwrap_or(sample_size))?;
        }
    }
    Ok(())
}
