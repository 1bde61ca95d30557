use reqwest::StatusCode;
use thiserror::Error;

/// Fatal failures of a run. Anything not listed here (a missing icon, an
/// empty kontakion, ...) degrades the post instead of failing it.
#[derive(Error, Debug)]
pub enum SaintError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: StatusCode },
    #[error("could not find any saint on {url}")]
    NoData { url: String },
    #[error("could not parse date '{input}'. Use YYYY-MM-DD, MM/DD/YYYY or MM/DD/YY")]
    DateParse { input: String },
}
