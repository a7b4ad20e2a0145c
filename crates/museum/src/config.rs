use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};
use toml::{value::Table, Value};

use crate::{
    date,
    error::{Error, Result},
};

/// Name of the configuration file at the root of a site.
pub const CONFIG_FILE: &str = "museum.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Configuration for the site itself.
    pub site: SiteConfig,
    /// The overall range covered by the timeline.
    pub timeline: TimelineConfig,

    /// Any remaining configuration, e.g. for renderers.
    rest: Table,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| "Failed to open config file")?
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read config file")?;

        Config::from_str(&buffer)
    }

    /// Load `museum.toml` from a site root, or fall back to the defaults when there is none.
    pub fn discover(root: impl AsRef<Path>) -> Result<Config> {
        let config_location = root.as_ref().join(CONFIG_FILE);

        if config_location.exists() {
            Config::load(config_location)
        } else {
            tracing::debug!("no {CONFIG_FILE} found, using the default configuration");
            Ok(Config::default())
        }
    }

    /// Deserialize a top-level table that is not part of the site configuration.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let Some(value) = self.rest.get(key) else {
            anyhow::bail!("Missing configuration table: {key}");
        };

        value
            .clone()
            .try_into()
            .with_context(|| format!("Invalid configuration for {key}"))
    }

    /// Renderer tables from the `[output]` section, in name order.
    pub fn outputs(&self) -> Vec<(String, Table)> {
        let Some(Value::Table(outputs)) = self.rest.get("output") else {
            return Vec::new();
        };

        outputs
            .iter()
            .map(|(name, value)| {
                let table = match value {
                    Value::Table(table) => table.clone(),
                    _ => Table::default(),
                };

                (name.clone(), table)
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            timeline: TimelineConfig::default(),
            rest: Table::default(),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let Value::Table(mut table) = raw else {
            return Err(D::Error::custom("museum.toml must always be a toml table"));
        };

        let site: SiteConfig = table
            .remove("site")
            .map(|site| site.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let timeline: TimelineConfig = table
            .remove("timeline")
            .map(|timeline| timeline.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let config = Config {
            site,
            timeline,
            rest: table,
        };

        Ok(config)
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.rest.len() + 2))?;
        map.serialize_entry("site", &self.site)?;
        map.serialize_entry("timeline", &self.timeline)?;
        for (key, value) in &self.rest {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Title shown in the header and the page titles.
    pub title: String,
    pub subtitle: String,
    /// Quote shown below the hero.
    pub quote: String,
    /// Path the site is deployed under. Relative asset paths are prefixed with it.
    pub base_path: String,
    /// Relative path to the journey data file.
    pub data: PathBuf,
    /// Relative path to a directory copied verbatim into the output.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Relative path to the directory the renderers write into.
    pub build_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::from("Museum of Failure"),
            subtitle: String::from("Gallery of Trying"),
            quote: String::from("Work Harder. Be Better."),
            base_path: String::from("/"),
            data: PathBuf::from("journeys.json"),
            static_dir: PathBuf::from("public"),
            build_dir: PathBuf::from("dist"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimelineConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Closing day of the first exhibition, mentioned on the home page when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_exhibition_end: Option<NaiveDate>,
}

impl TimelineConfig {
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (date::midnight(self.start), date::midnight(self.end))
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 9, 21).expect("timeline start is a valid date"),
            end: NaiveDate::from_ymd_opt(2026, 9, 21).expect("timeline end is a valid date"),
            first_exhibition_end: None,
        }
    }
}
