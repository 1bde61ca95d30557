use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Deserialize;
use serde_yaml::Deserializer;
use url::Url;

const APP_PREFIX: &str = "daily_saint";
const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_HASHTAGS: &str = "#Christian #OrthodoxChristian #Orthodox #Orthostr #Saint";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_url: Url,
    pub images_base_url: Url,
    pub hashtags: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse("https://www.oca.org").unwrap(),
            images_base_url: Url::parse("https://images.oca.org").unwrap(),
            hashtags: DEFAULT_HASHTAGS.to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 13.5; rv:116.0) Gecko/20100101 Firefox/116.0".to_string(),
        }
    }
}

pub struct EnsureOutcome {
    pub path: PathBuf,
    pub created: bool,
}

impl Config {
    /// Write the commented template to the XDG config dir unless a config
    /// file is already there.
    pub fn ensure_user_config() -> Result<EnsureOutcome> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX);

        if let Some(path) = xdg_dirs.find_config_file(CONFIG_FILE) {
            return Ok(EnsureOutcome {
                path,
                created: false,
            });
        }

        let config_path = xdg_dirs
            .place_config_file(CONFIG_FILE)
            .context("Cannot create configuration directory")?;
        let mut config_file = File::create(&config_path)
            .with_context(|| format!("Failed to create {}", config_path.display()))?;

        write!(
            &mut config_file,
            r#"# daily_saint config (YAML)
# Every key is optional; the values below are the defaults.

base_url: "https://www.oca.org"
images_base_url: "https://images.oca.org"
hashtags: "{DEFAULT_HASHTAGS}"

# HTTP request timeout, in seconds
timeout_secs: 10

# user_agent: "daily_saint"
"#
        )?;

        Ok(EnsureOutcome {
            path: config_path,
            created: true,
        })
    }

    /// Load the config from `explicit` if given, else from the XDG config dir,
    /// falling back to the defaults when no file exists there.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                match xdg::BaseDirectories::with_prefix(APP_PREFIX).find_config_file(CONFIG_FILE) {
                    Some(path) => path,
                    None => {
                        debug!("No config file found, using defaults");
                        return Ok(Config::default());
                    }
                }
            }
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Config::from_yaml_str(&raw, &path)?;
        debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// `path` appended to `base_url` as text, so a base such as
    /// `https://mirror.example/oca` keeps its path prefix.
    pub fn site_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub fn from_yaml_str(raw: &str, origin: &Path) -> Result<Config> {
        // An empty or comment-only file means "all defaults".
        if raw.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Config::default());
        }

        let deserialized = Deserializer::from_str(raw);
        let config: Config = serde_path_to_error::deserialize(deserialized).map_err(|e| {
            anyhow!(
                "Invalid YAML in {} at `{}`: {}",
                origin.display(),
                e.path(),
                e.inner()
            )
        })?;

        if config.timeout_secs == 0 {
            return Err(anyhow!(
                "Invalid config in {}: timeout_secs must be greater than zero",
                origin.display()
            ));
        }

        Ok(config)
    }
}
