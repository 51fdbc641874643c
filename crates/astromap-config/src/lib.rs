use astromap::astrocartography::ProjectionSettings;
use astromap::chart::HouseSystem;
use astromap::places::PlaceSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default lookup, relative to the working directory and to a crate inside the workspace.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] =
    ["configs/astromap.toml", "../../configs/astromap.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct AstromapSettings {
    pub projection: ProjectionSettings,
    pub places: PlaceSettings,
    pub house_system: HouseSystem,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AstromapSettings {
    fn default() -> Self {
        Self {
            projection: ProjectionSettings::default(),
            places: PlaceSettings::default(),
            house_system: HouseSystem::default(),
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ChartToml {
    house_system: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct LoggingToml {
    filter: String,
}

impl Default for LoggingToml {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RootConfigToml {
    projection: ProjectionSettings,
    places: PlaceSettings,
    chart: ChartToml,
    logging: LoggingToml,
}

/// First readable file among `DEFAULT_CONFIG_PATHS`, with the path it came from.
pub fn read_config_text() -> Option<(PathBuf, String)> {
    DEFAULT_CONFIG_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (PathBuf::from(p), text))
    })
}

/// Load settings from `path`, or from the default lookup when `path` is `None`.
///
/// An explicit path must exist. With no explicit path and no file found the
/// defaults are returned.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<AstromapSettings> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", p.display()))?,
        None => match read_config_text() {
            Some((_, text)) => text,
            None => return Ok(AstromapSettings::default()),
        },
    };
    parse_settings(&text)
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(text: &str) -> anyhow::Result<AstromapSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse astromap config: {e}"))?;
    let RootConfigToml {
        projection,
        places,
        chart,
        logging,
    } = root;

    projection
        .validate()
        .map_err(|e| anyhow::anyhow!("[projection] {e}"))?;
    places.validate().map_err(|e| anyhow::anyhow!("[places] {e}"))?;
    if places.top_n == 0 {
        anyhow::bail!("[places] top_n must be at least 1");
    }

    let house_system = match chart.house_system {
        Some(name) => name
            .parse::<HouseSystem>()
            .map_err(|e| anyhow::anyhow!("[chart] house_system: {e}"))?,
        None => HouseSystem::default(),
    };

    let log_filter = logging.filter.trim().to_string();
    if log_filter.is_empty() {
        anyhow::bail!("[logging] filter must not be empty");
    }

    Ok(AstromapSettings {
        projection,
        places,
        house_system,
        log_filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_settings("").unwrap(), AstromapSettings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = parse_settings(
            r#"
            [projection]
            step_deg = 2.5

            [chart]
            house_system = "whole_sign"
            "#,
        )
        .unwrap();
        assert_eq!(settings.projection.step_deg, 2.5);
        assert_eq!(settings.projection.max_latitude, 85.0);
        assert!(settings.projection.parallel);
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
        assert_eq!(settings.places, PlaceSettings::default());
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = parse_settings("[projection]\nstep_deg = 0.0").unwrap_err();
        assert!(err.to_string().contains("step_deg"), "{err}");

        let err = parse_settings("[places]\ninfluence_radius_km = -5.0").unwrap_err();
        assert!(err.to_string().contains("influence_radius_km"), "{err}");

        let err = parse_settings("[chart]\nhouse_system = \"koch\"").unwrap_err();
        assert!(err.to_string().contains("house_system"), "{err}");

        let err = parse_settings("[places]\ntop_n = 0").unwrap_err();
        assert!(err.to_string().contains("top_n"), "{err}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_settings("[projection\nstep_deg = 1").is_err());
        assert!(parse_settings("[projection]\nstep_deg = \"fine\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/astromap.toml");
        assert!(load_settings(Some(missing)).is_err());
    }

    #[test]
    fn sample_config_parses() {
        // Run from the crate directory, so the default lookup finds the workspace file.
        let settings = load_settings(None).unwrap();
        assert_eq!(settings, AstromapSettings::default());
    }
}
