use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use crate::errors::ConfigError;

/// One experimental condition. Defined once in configuration and only read afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub target_ec: f64,
    pub color: String,
}

impl Group {
    pub fn new(name: &str, target_ec: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            target_ec,
            color: color.to_string(),
        }
    }
}

// Top-level configuration: the group table plus discovery/parsing settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_groups")]
    pub groups: Vec<Group>,
    #[serde(default = "default_environment_extension")]
    pub environment_extension: String,
    #[serde(default = "default_growth_extension")]
    pub growth_extension: String,
    // Tried in order; the first keyword with a matching workbook wins
    #[serde(default = "default_growth_keywords")]
    pub growth_keywords: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    // chrono formats tried after RFC 3339
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
}

fn default_groups() -> Vec<Group> {
    vec![
        Group::new("송도고", 1.0, "#FF6347"),
        Group::new("하늘고", 2.0, "#2E8B57"),
        Group::new("아라고", 4.0, "#4682B4"),
        Group::new("동산고", 8.0, "#FFD700"),
    ]
}

fn default_environment_extension() -> String {
    ".csv".to_string()
}

fn default_growth_extension() -> String {
    ".xlsx".to_string()
}

fn default_growth_keywords() -> Vec<String> {
    vec!["생육결과데이터".to_string(), "생육".to_string()]
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_timestamp_formats() -> Vec<String> {
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y.%m.%d %H:%M:%S",
        "%Y.%m.%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
    ]
    .iter()
    .map(|f| f.to_string())
    .collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            groups: default_groups(),
            environment_extension: default_environment_extension(),
            growth_extension: default_growth_extension(),
            growth_keywords: default_growth_keywords(),
            delimiter: default_delimiter(),
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

impl PipelineConfig {
    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// The delimiter as the single byte the CSV reader expects. [`PipelineConfig::validate`]
    /// rejects anything else; an unvalidated config falls back to comma.
    pub fn delimiter_byte(&self) -> u8 {
        match self.delimiter.as_bytes() {
            [b] => *b,
            _ => b',',
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groups.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one group is required".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "group names must not be blank".to_string(),
                });
            }
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("duplicate group name '{}'", group.name),
                });
            }
            if !group.target_ec.is_finite() {
                return Err(ConfigError::Invalid {
                    message: format!("group '{}' has a non-finite target EC", group.name),
                });
            }
        }
        if !(self.delimiter.len() == 1 && self.delimiter.is_ascii()) {
            return Err(ConfigError::Invalid {
                message: format!("delimiter must be a single ASCII character, got '{}'", self.delimiter),
            });
        }
        if self.growth_keywords.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one growth workbook keyword is required".to_string(),
            });
        }
        Ok(())
    }
}

// Load the configuration from a JSON file; missing keys fall back to the defaults
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
    }

    let file = File::open(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let config: PipelineConfig = serde_json::from_reader(reader).map_err(|e| {
        ConfigError::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    config.validate()?;
    Ok(config)
}
