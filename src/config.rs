use crate::{error::Error, road_map::TestSelection};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything one run needs, resolved once at process start and passed by
/// reference into the engines.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Canonical path of the road-map file.
    pub road_map_path: PathBuf,
    /// Prefix prepended to every target to form the request URL.
    pub base_url: String,
    /// When present, only the listed 1-based entries execute.
    pub selection: Option<TestSelection>,
}

impl RunConfig {
    /// Resolves the run configuration: appends `.json` to the road-map
    /// path when missing, canonicalizes it, takes the base URL from the
    /// command line or the co-located config file, and parses the test
    /// case list.
    pub fn resolve(
        road_map_arg: &str,
        base_url: Option<String>,
        testcases: Option<&str>,
    ) -> Result<Self, Error> {
        let mut raw = String::from(road_map_arg);
        if !raw.to_lowercase().ends_with(".json") {
            raw.push_str(".json");
        }
        let road_map_path =
            fs::canonicalize(&raw).map_err(|_| Error::RoadMapUnreadable(PathBuf::from(&raw)))?;
        log::debug!("road map resolved to {}", road_map_path.display());

        let base_url = match base_url {
            Some(url) => url,
            None => config_value(&road_map_path, "base_url")?.unwrap_or_default(),
        };

        let selection = testcases.map(TestSelection::parse).transpose()?;

        Ok(RunConfig {
            road_map_path,
            base_url,
            selection,
        })
    }

    pub fn is_selected(&self, index: usize) -> bool {
        match &self.selection {
            Some(selection) => selection.contains(index),
            None => true,
        }
    }
}

/// Looks up a key in the road map's co-located config file
/// (`foo.json` -> `foo.conf.json`), if one exists.
fn config_value(road_map_path: &Path, key: &str) -> Result<Option<String>, Error> {
    let config_path = sibling_config_path(road_map_path);
    if !config_path.exists() {
        return Ok(None);
    }
    log::debug!("reading config file {}", config_path.display());

    let contents = fs::read_to_string(&config_path)?;
    let config: Value =
        serde_json::from_str(&contents).map_err(|_| Error::ConfigMalformed(config_path))?;

    match config.get(key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Ok(Some(other.to_string())),
        None => Ok(None),
    }
}

fn sibling_config_path(road_map_path: &Path) -> PathBuf {
    let stem = road_map_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    road_map_path.with_file_name(format!("{}.conf.json", stem))
}
