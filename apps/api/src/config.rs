use anyhow::{bail, Context, Result};

use crate::layout::font_metrics::PaperSize;

/// Application configuration loaded from environment variables.
/// Nothing is strictly required; without `DATABASE_URL` documents are kept in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub paper: PaperSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            paper: parse_paper(&std::env::var("PAGE_SIZE").unwrap_or_else(|_| "a4".to_string()))?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_paper(raw: &str) -> Result<PaperSize> {
    match PaperSize::parse(raw) {
        Some(paper) => Ok(paper),
        None => bail!("PAGE_SIZE must be 'a4' or 'letter', got '{raw}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paper() {
        assert_eq!(parse_paper("A4").unwrap(), PaperSize::A4);
        assert_eq!(parse_paper("letter").unwrap(), PaperSize::Letter);
        assert!(parse_paper("tabloid").is_err());
    }
}
