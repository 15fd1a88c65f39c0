// Startup configuration: where the pictures live, which deck to play and which
// mask colours count as dangers. Defaults play the built-in deck from ./assets.

use crate::error::Error;
use crate::types::Color;
use std::env;
use std::path::PathBuf;

pub const ENV_ASSETS: &str = "MASK_QUIZ_ASSETS";
pub const ENV_DECK: &str = "MASK_QUIZ_DECK";
pub const ENV_PALETTE: &str = "MASK_QUIZ_PALETTE";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub asset_dir: PathBuf,       // <asset_dir>/<identifier>.png
    pub deck_path: Option<PathBuf>, // None = built-in deck
    pub palette: Vec<Color>,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            deck_path: None,
            palette: vec![Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW],
            window_title: "Mask Quiz".into(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the MASK_QUIZ_* environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut cfg = Self::default();

        if let Some(dir) = lookup(ENV_ASSETS).filter(|s| !s.trim().is_empty()) {
            cfg.asset_dir = PathBuf::from(dir.trim());
        }
        if let Some(deck) = lookup(ENV_DECK).filter(|s| !s.trim().is_empty()) {
            cfg.deck_path = Some(PathBuf::from(deck.trim()));
        }
        if let Some(palette) = lookup(ENV_PALETTE) {
            cfg.palette = parse_palette(&palette)?;
        }

        Ok(cfg)
    }
}

/// "#FF0000, #00FF00" -> [red, green]. Empty entries are skipped.
pub fn parse_palette(s: &str) -> Result<Vec<Color>, Error> {
    let colors = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Color::from_hex(part)
                .ok_or_else(|| Error::Config(format!("{ENV_PALETTE}: bad colour '{part}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if colors.is_empty() {
        return Err(Error::Config(format!("{ENV_PALETTE}: no colours given")));
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.palette.len(), 4);
        assert_eq!(cfg.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn env_overrides_everything() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (ENV_ASSETS, "/tmp/pics"),
            (ENV_DECK, "deck.json"),
            (ENV_PALETTE, "#FF00FF, 00FFFF"),
        ]))
        .expect("valid env");

        assert_eq!(cfg.asset_dir, PathBuf::from("/tmp/pics"));
        assert_eq!(cfg.deck_path, Some(PathBuf::from("deck.json")));
        assert_eq!(cfg.palette, vec![Color::rgb(255, 0, 255), Color::rgb(0, 255, 255)]);
    }

    #[test]
    fn bad_palette_is_a_config_error() {
        assert!(matches!(parse_palette("#FF0000,purple"), Err(Error::Config(_))));
        assert!(matches!(parse_palette(" , "), Err(Error::Config(_))));
    }
}
