use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV file with `title` and `genres` columns
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// TMDB API key; enrichment is disabled when unset
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Timeout applied to every TMDB request
    #[serde(default = "default_tmdb_timeout_secs")]
    pub tmdb_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations shown when the caller does not pick one
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Upper bound for the recommendation count selector
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.csv")
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_count() -> usize {
    5
}

fn default_max_count() -> usize {
    20
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_count == 0 {
            anyhow::bail!("MAX_COUNT must be at least 1");
        }
        if self.default_count == 0 || self.default_count > self.max_count {
            anyhow::bail!(
                "DEFAULT_COUNT must be between 1 and MAX_COUNT ({})",
                self.max_count
            );
        }
        Ok(())
    }

    /// API key with blank values treated as absent
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
