use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::Config;
use crate::error::SaintError;
use crate::fetcher::fetch_page;
use crate::models::SaintEntry;
use crate::normalize::{clean_name, stripped_text};

static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article[class]").unwrap());
static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2.name").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static THUMBNAIL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("figure.thumbnail").unwrap());
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

static SAINT_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bsaint\b").unwrap());
static LIFE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/saints/lives/\d{4}/\d{2}/\d{2}/\d+-.+").unwrap());
static ICON_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/icons/(xsm|sm|md)/").unwrap());

pub fn listing_url(cfg: &Config, day: NaiveDate) -> Result<Url, url::ParseError> {
    Url::parse(&cfg.site_url(&format!(
        "/saints/lives/{}/{:02}/{:02}",
        day.year(),
        day.month(),
        day.day()
    )))
}

/// Fetch the lives page for `day` and return every saint on it, top saint
/// first. An empty page is a [`SaintError::NoData`].
pub async fn get_all_saints(
    client: &Client,
    cfg: &Config,
    day: NaiveDate,
) -> anyhow::Result<Vec<SaintEntry>> {
    let url = listing_url(cfg, day)?;
    let document = fetch_page(client, &url).await?;

    let saints = parse_saints(&document, &cfg.images_base_url);
    if saints.is_empty() {
        return Err(SaintError::NoData {
            url: url.to_string(),
        }
        .into());
    }

    debug!("Found {} saints on {}", saints.len(), url);
    Ok(saints)
}

pub fn parse_saints(document: &Html, images_base: &Url) -> Vec<SaintEntry> {
    document
        .select(&ARTICLE)
        .filter(|article| article.value().classes().any(|c| SAINT_CLASS.is_match(c)))
        .map(|article| parse_saint_article(article, images_base))
        .collect()
}

fn parse_saint_article(article: ElementRef, images_base: &Url) -> SaintEntry {
    let name = article
        .select(&NAME)
        .next()
        .map(|h2| clean_name(&stripped_text(h2)))
        .unwrap_or_default();

    let detail_path = article
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| LIFE_HREF.is_match(href))
        .unwrap_or_default()
        .to_string();

    let icon_url = article
        .select(&THUMBNAIL)
        .next()
        .and_then(|figure| figure.select(&IMG).next())
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(|src| normalize_icon_url(src, images_base))
        .unwrap_or_default();

    if name.is_empty() {
        warn!("Saint entry without a name");
    }
    if detail_path.is_empty() {
        warn!("No life link found for '{}'", name);
    }

    SaintEntry {
        name,
        detail_path,
        icon_url,
    }
}

/// Ask for the large rendition of an icon and make its URL absolute.
///
/// Listing thumbnails point at `/icons/xsm/`, `/icons/sm/` or `/icons/md/`;
/// the same file exists under `/icons/lg/`. Sources come either
/// protocol-relative (`//images.oca.org/...`) or root-relative (`/icons/...`).
pub fn normalize_icon_url(src: &str, images_base: &Url) -> String {
    let upgraded = ICON_SIZE.replace_all(src, "/icons/lg/");

    if upgraded.starts_with("http") {
        upgraded.into_owned()
    } else if upgraded.starts_with("//") {
        format!("https:{upgraded}")
    } else {
        images_base
            .join(&upgraded)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", images_base.as_str().trim_end_matches('/'), upgraded))
    }
}
