//! CORS origins for the navigation permission UI.
//!
//! `ALLOWED_ORIGINS` is a comma-separated list. Unset or blank falls back
//! to the local development origins.

use std::env;

use tracing::warn;

const DEV_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks, trailing slashes
/// and repeats.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for origin in raw.split(',').map(|s| s.trim().trim_end_matches('/')) {
        if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }
    origins
}

impl CorsConfig {
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(raw) => Self::from_list(&raw),
            Err(_) => Self::default(),
        }
    }

    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = parse_origins(raw);
        if allowed_origins.is_empty() {
            warn!("ALLOWED_ORIGINS has no usable origin; using development defaults");
            return Self::default();
        }
        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_cleans_the_list() {
        assert_eq!(
            parse_origins(" https://desk.example.edu/ ,, https://desk.example.edu,http://localhost:5173"),
            vec!["https://desk.example.edu", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_blank_list_keeps_dev_origins() {
        assert_eq!(CorsConfig::from_list(" , "), CorsConfig::default());
        assert_eq!(CorsConfig::default().allowed_origins.len(), 2);
    }
}
