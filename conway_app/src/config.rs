// config.rs - Front-end configuration loaded from environment variables
//
// Every variable is optional; unset ones keep the engine defaults.
//
// - `CONWAY_WIDTH` -- board columns (default 50)
// - `CONWAY_HEIGHT` -- board rows (default 25)
// - `CONWAY_WORKERS` -- threads per generation (default: available CPUs)
// - `CONWAY_INTERVAL_MS` -- update period, snapped to 10 ms steps in 10..=1000 (default 100)
// - `CONWAY_STOP_ON_CYCLE` -- pause when the board repeats (default `false`)
// - `CONWAY_SAVE_FILE` -- file name prefilled for save/load (default `board.gol`)

use std::path::PathBuf;
use std::str::FromStr;

use conway::SimulationConfig;

use crate::error::AppError;

pub const DEFAULT_SAVE_FILE: &str = "board.gol";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub save_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = SimulationConfig::default();
        let simulation = SimulationConfig {
            width: parse_or(&lookup, "CONWAY_WIDTH", defaults.width)?,
            height: parse_or(&lookup, "CONWAY_HEIGHT", defaults.height)?,
            workers: parse_or(&lookup, "CONWAY_WORKERS", defaults.workers)?,
            interval_ms: parse_or(&lookup, "CONWAY_INTERVAL_MS", defaults.interval_ms)?,
            stop_on_cycle: parse_or(&lookup, "CONWAY_STOP_ON_CYCLE", defaults.stop_on_cycle)?,
        }
        .validate()?;

        let save_file = lookup("CONWAY_SAVE_FILE").map_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE), PathBuf::from);

        Ok(Self { simulation, save_file })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {key} {raw:?}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!((config.simulation.width, config.simulation.height), (50, 25));
        assert_eq!(config.simulation.interval_ms, 100);
        assert_eq!(config.save_file, PathBuf::from("board.gol"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CONWAY_WIDTH", "80"),
            ("CONWAY_HEIGHT", " 40 "),
            ("CONWAY_WORKERS", "3"),
            ("CONWAY_INTERVAL_MS", "5"),
            ("CONWAY_STOP_ON_CYCLE", "true"),
            ("CONWAY_SAVE_FILE", "glider.gol"),
        ]))
        .unwrap();
        assert_eq!((config.simulation.width, config.simulation.height), (80, 40));
        assert_eq!(config.simulation.workers, 3);
        assert_eq!(config.simulation.interval_ms, 10);
        assert!(config.simulation.stop_on_cycle);
        assert_eq!(config.save_file, PathBuf::from("glider.gol"));
    }

    #[test]
    fn interval_override_is_snapped_to_step() {
        let config = AppConfig::from_lookup(lookup(&[("CONWAY_INTERVAL_MS", "37")])).unwrap();
        assert_eq!(config.simulation.interval_ms, 40);
    }

    #[test]
    fn bad_values_are_reported() {
        let err = AppConfig::from_lookup(lookup(&[("CONWAY_WIDTH", "wide")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("CONWAY_WIDTH")));

        let err = AppConfig::from_lookup(lookup(&[("CONWAY_HEIGHT", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Life(_)));
    }
}
