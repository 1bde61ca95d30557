use log::{debug, warn};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::Config;
use crate::fetcher::fetch_page;
use crate::models::HymnPair;
use crate::normalize::{clean_chant_text, stripped_text};

static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// `/saints/lives/2024/03/05/100683-...` -> `/saints/troparia/2024/03/05/100683-...`
pub fn troparia_path(detail_path: &str) -> String {
    detail_path.replace("/saints/lives/", "/saints/troparia/")
}

/// Fetch the troparia page that belongs to a saint's life page.
pub async fn get_troparia(client: &Client, cfg: &Config, detail_path: &str) -> anyhow::Result<HymnPair> {
    if detail_path.is_empty() {
        warn!("No life link, skipping troparion and kontakion");
        return Ok(HymnPair::default());
    }

    let url = Url::parse(&cfg.site_url(&troparia_path(detail_path)))?;
    let document = fetch_page(client, &url).await?;
    let hymns = parse_hymns(&document);

    if hymns.troparion.is_empty() {
        debug!("No troparion on {}", url);
    }
    if hymns.kontakion.is_empty() {
        debug!("No kontakion on {}", url);
    }

    Ok(hymns)
}

/// Each hymn sits in its own `<article>`: an `<h2>` label followed by a
/// `<p>` body. Only the first troparion and the first kontakion are kept.
pub fn parse_hymns(document: &Html) -> HymnPair {
    let mut hymns = HymnPair::default();

    for article in document.select(&ARTICLE) {
        let Some(h2) = article.select(&HEADING).next() else { continue };
        let label = stripped_text(h2).to_lowercase();

        let text = article
            .select(&BODY)
            .next()
            .map(|p| clean_chant_text(&stripped_text(p)))
            .unwrap_or_default();

        if label.contains("troparion") && hymns.troparion.is_empty() {
            hymns.troparion = text;
        } else if label.contains("kontakion") && hymns.kontakion.is_empty() {
            hymns.kontakion = text;
        }
    }

    hymns
}
