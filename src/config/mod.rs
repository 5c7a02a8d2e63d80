use std::path::Path;

use config::{Config, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod validator;

use crate::adapters::registry::Registry;
use crate::adapters::simulator::{SimulatorOptions, DEFAULT_RECORD_COUNT};
use crate::cli::Cli;
use crate::domain::api_object::{ApiCategory, ApiObject};
use crate::domain::form::FormDesign;
use crate::domain::source::DataSource;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub simulator: SimulatorSettings,
    #[serde(default)]
    pub sources: Vec<DataSource>,
    #[serde(default)]
    pub categories: Vec<ApiCategory>,
    #[serde(default)]
    pub objects: Vec<ApiObject>,
    #[serde(default)]
    pub forms: Vec<FormDesign>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorSettings {
    #[serde(default = "default_records")]
    pub records: usize,
    #[serde(default)]
    pub randomize: bool,
}

fn default_records() -> usize {
    DEFAULT_RECORD_COUNT
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            records: DEFAULT_RECORD_COUNT,
            randomize: false,
        }
    }
}

impl From<&SimulatorSettings> for SimulatorOptions {
    fn from(settings: &SimulatorSettings) -> Self {
        SimulatorOptions {
            records: settings.records,
            randomize: settings.randomize,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load settings for a CLI invocation: config file, then per-entity
    /// directories, then CLI overrides, then validation.
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let root = cli
            .config
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let built = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .set_default("simulator.records", DEFAULT_RECORD_COUNT as i64)?
            .set_default("simulator.randomize", false)?
            .build()?;
        let mut settings: Settings = built.try_deserialize()?;

        settings.load_entity_dirs(root)?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("patchbay");
        let built = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("simulator.records", DEFAULT_RECORD_COUNT as i64)?
            .set_default("simulator.randomize", false)?
            .build()?;
        let mut settings: Settings = built.try_deserialize()?;

        settings.load_entity_dirs(root)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!("Configuration validation failed:\n{}", messages.join("\n"))
        })
    }

    /// CLI > env vars > config file.
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(records) = cli.records {
            self.simulator.records = records;
        }
        if cli.randomize {
            self.simulator.randomize = true;
        }
    }

    fn load_entity_dirs(&mut self, root: &str) -> Result<(), anyhow::Error> {
        load_entities_from_dir(&format!("{root}/config/sources"), &mut self.sources)?;
        load_entities_from_dir(&format!("{root}/config/categories"), &mut self.categories)?;
        load_entities_from_dir(&format!("{root}/config/objects"), &mut self.objects)?;
        load_entities_from_dir(&format!("{root}/config/forms"), &mut self.forms)?;
        Ok(())
    }

    /// Move the loaded entities into a registry, keeping configured ids.
    pub fn into_registry(self) -> Registry {
        Registry::from_entities(self.sources, self.categories, self.objects, self.forms)
    }

    /// Merge another Settings into this one. `other` wins on simulator
    /// settings; entity lists merge by id, with `other` overriding.
    pub fn merge(&mut self, other: Settings) {
        self.simulator = other.simulator;
        merge_by_id(&mut self.sources, other.sources, |s| s.id.clone());
        merge_by_id(&mut self.categories, other.categories, |c| c.id.clone());
        merge_by_id(&mut self.objects, other.objects, |o| o.id.clone());
        merge_by_id(&mut self.forms, other.forms, |f| f.id.clone());
    }
}

/// Items from `other` override same-id items in `base`; new ids append.
fn merge_by_id<T>(base: &mut Vec<T>, other: Vec<T>, key: impl Fn(&T) -> String) {
    use std::collections::HashMap;

    let mut index_of: HashMap<String, usize> = HashMap::new();
    for (i, item) in base.iter().enumerate() {
        index_of.insert(key(item), i);
    }
    for item in other {
        match index_of.get(&key(&item)) {
            Some(&i) => base[i] = item,
            None => base.push(item),
        }
    }
}

/// Read every JSON/YAML/TOML file under `path` into `target`. Unknown
/// extensions are skipped; unreadable glob entries are logged and skipped.
fn load_entities_from_dir<T: DeserializeOwned>(
    path: &str,
    target: &mut Vec<T>,
) -> Result<(), anyhow::Error> {
    let pattern = format!("{path}/*");
    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Failed to read glob entry: {}", e);
                continue;
            }
        };
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext,
            None => continue,
        };
        if !matches!(ext, "json" | "yaml" | "yml" | "toml") {
            continue;
        }
        let content = std::fs::read_to_string(&path)?;
        let entity: T = match ext {
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        target.push(entity);
    }
    Ok(())
}
