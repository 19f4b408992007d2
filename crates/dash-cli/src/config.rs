use anyhow::{Context, Result};
use dash_sim::SimConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerCfg,
    pub sim: SimConfig,
    pub link: LinkCfg,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggerCfg {
    pub level: String,
}

impl Default for LoggerCfg {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinkCfg {
    /// Where `link send` connects.
    pub url: String,
    /// Where `link serve` listens.
    pub bind: String,
}

impl Default for LinkCfg {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8000/ws".into(),
            bind: "127.0.0.1:8000".into(),
        }
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.logger.level, "info");
        assert_eq!(cfg.sim.telemetry_interval_ms, 5_000);
        assert_eq!(cfg.sim.notification_interval_ms, 30_000);
        assert_eq!(cfg.sim.rng_seed, None);
        assert_eq!(cfg.link.url, "ws://127.0.0.1:8000/ws");
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
            [sim]
            telemetry_interval_ms = 1000
            rng_seed = 42

            [link]
            url = "wss://fleet.example.com/ws"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sim.telemetry_interval_ms, 1_000);
        assert_eq!(cfg.sim.notification_interval_ms, 30_000);
        assert_eq!(cfg.sim.rng_seed, Some(42));
        assert_eq!(cfg.link.url, "wss://fleet.example.com/ws");
        assert_eq!(cfg.link.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let cfg = parse_config(include_str!("../../../configs/default.toml")).unwrap();
        assert_eq!(cfg.sim.telemetry_interval_ms, 5_000);
    }

    #[test]
    fn test_bad_type_is_an_error() {
        assert!(parse_config("[sim]\ntelemetry_interval_ms = \"fast\"").is_err());
    }
}
