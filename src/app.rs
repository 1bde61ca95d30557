use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use log::{LevelFilter, debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::Client;

use crate::config::{Config, EnsureOutcome};
use crate::dates::parse_date;
use crate::fetcher::build_client;
use crate::format::format_output;
use crate::hymns::get_troparia;
use crate::listing::get_all_saints;
use crate::logger::init_logger;
use crate::models::{OutputDocument, SaintEntry, Selection};

pub struct Options {
    pub date: Option<String>,
    pub output: Option<PathBuf>,
    pub random: bool,
    pub config: Option<PathBuf>,
    pub init_config: bool,
    pub log_level: LevelFilter,
}

pub async fn run(opts: Options) -> Result<()> {
    // 0) Initialize logger
    init_logger(opts.log_level)?;
    debug!("Logger initialized");

    // 1) --init-config only writes the template
    if opts.init_config {
        let outcome: EnsureOutcome = Config::ensure_user_config()?;
        if outcome.created {
            info!("Config file created at {}", outcome.path.display());
        } else {
            info!("Config file already exists at {}", outcome.path.display());
        }
        return Ok(());
    }

    // 2) Load config (defaults when there is no file)
    let cfg = Config::load(opts.config.as_deref())?;

    // 3) Validate the date before touching the network
    let day = match opts.date.as_deref() {
        Some(input) => parse_date(input)?,
        None => Local::now().date_naive(),
    };

    // 4) Scrape and render
    let client = build_client(&cfg)?;
    let post = build_post(&client, &cfg, day, opts.random, &mut rand::thread_rng()).await?;

    // 5) File or stdout
    match opts.output {
        Some(path) => {
            write_output(&path, &post)?;
            info!("Saved to {}", path.display());
        }
        None => println!("{post}"),
    }

    Ok(())
}

/// Fetch the saints for `day`, pick one, fetch its hymns and render the post.
pub async fn build_post<R: Rng + ?Sized>(
    client: &Client,
    cfg: &Config,
    day: NaiveDate,
    random: bool,
    rng: &mut R,
) -> Result<String> {
    info!("Fetching saint for {}...", day.format("%B %d, %Y"));

    let saints = get_all_saints(client, cfg, day).await?;

    let (saint, selection) =
        pick_saint(&saints, random, rng).ok_or_else(|| anyhow!("No saints to choose from"))?;
    match selection {
        Selection::Top => info!("Top saint: {}", saint.name),
        Selection::Random => info!("Random saint: {}", saint.name),
        Selection::OnlyOne => info!("Only one saint today, using: {}", saint.name),
    }

    let hymns = get_troparia(client, cfg, &saint.detail_path).await?;

    let doc = OutputDocument {
        saint: saint.clone(),
        hymns,
        life_url: cfg.site_url(&saint.detail_path),
        date: day,
    };

    Ok(format_output(&doc, &cfg.hashtags))
}

/// The first entry is the day's top saint. With `random`, any other entry is
/// picked uniformly; a day with a single saint falls back to the top one.
pub fn pick_saint<'a, R: Rng + ?Sized>(
    saints: &'a [SaintEntry],
    random: bool,
    rng: &mut R,
) -> Option<(&'a SaintEntry, Selection)> {
    let (top, rest) = saints.split_first()?;

    if !random {
        return Some((top, Selection::Top));
    }

    Some(match rest.choose(rng) {
        Some(saint) => (saint, Selection::Random),
        None => (top, Selection::OnlyOne),
    })
}

fn write_output(path: &Path, post: &str) -> Result<()> {
    fs::write(path, format!("{post}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))
}
