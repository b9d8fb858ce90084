use anyhow::{Context, Result, ensure};
use leaderboard::config::DEFAULT_PAGE_SIZE;
use leaderboard::dto::common::MAX_PAGE_SIZE;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: String,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page_size = match var("PAGE_SIZE") {
            Some(size) => size.parse().context("PAGE_SIZE must be a number")?,
            None => DEFAULT_PAGE_SIZE,
        };
        ensure!(
            (1..=MAX_PAGE_SIZE).contains(&page_size),
            "PAGE_SIZE must be between 1 and {}, got {}",
            MAX_PAGE_SIZE,
            page_size
        );

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match var("PORT") {
                Some(port) => port.parse().context("PORT must be a number")?,
                None => 8080,
            },
            data_dir: var("DATA_DIR").context("Cannot load DATA_DIR env variable")?,
            page_size,
        })
    }
}
