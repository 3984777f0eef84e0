use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DnpGenError, Result};

/// Config file names, in lookup order within a directory
pub const CONFIG_FILES: &[&str] = &["config.toml", "config.yaml", "config.yml"];

/// Sub-directory of the user config dir searched last
const USER_CONFIG_DIR: &str = "dnpgen";

/// Optional wrapper table used by older YAML configs (`app: { ... }`)
const LEGACY_ROOT_KEY: &str = "app";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# dnpgen configuration file

# External SIGEXT tool used to regenerate <node>.SIG from the model file.
# Failures are logged and the existing .SIG file is used instead.
sigext_path = 'C:\CWave\bin\SIGEXT.exe'
sigext_flags = ""

[classification]
# Regular expressions tested against the bare point name (without @GV.).
# A dual-capable point is an OUTPUT if any expression matches, INPUT otherwise.
# Tags AO / DO are always outputs and skip these lists.
analog_output_regex = [
    'LIT.*_H_H',
    'LIT.*_L_L',
    '_SP($|_)',
]
digital_output_regex = [
    '_RST',
    '_CMD',
    '_WD',
    '_MAN',
    '_OUT',
    '_PULSE',
]

[spares]
# Placeholder written to the opposite list for every mapped point
ai = "@GV.SPARE_AI"
ao = "@GV.SPARE_AO"
di = "@GV.SPARE_DI"
do = "@GV.SPARE_DO"
# Append the consuming point's name, e.g. @GV.SPARE_AO(FT041)
annotate = true
"#;

/// On-disk format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension (TOML unless `.yaml`/`.yml`)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SIGEXT executable
    #[serde(default)]
    pub sigext_path: String,

    /// Extra whitespace-separated flags passed to SIGEXT
    #[serde(default)]
    pub sigext_flags: String,

    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub spares: SparesConfig,

    /// Loaded file had its settings under an `app` table
    #[serde(skip)]
    legacy_root: bool,
}

/// Output-direction patterns per family. A missing list is empty: every
/// dual-capable point of that family is then an input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub analog_output_regex: Vec<String>,

    #[serde(default)]
    pub digital_output_regex: Vec<String>,
}

/// Spare placeholder names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparesConfig {
    #[serde(default = "default_spare_ai")]
    pub ai: String,

    #[serde(default = "default_spare_ao")]
    pub ao: String,

    #[serde(default = "default_spare_di")]
    pub di: String,

    #[serde(rename = "do", default = "default_spare_do")]
    pub do_: String,

    /// Annotate spares with the point that consumed the slot
    #[serde(default = "default_annotate")]
    pub annotate: bool,
}

fn default_spare_ai() -> String {
    "@GV.SPARE_AI".to_string()
}

fn default_spare_ao() -> String {
    "@GV.SPARE_AO".to_string()
}

fn default_spare_di() -> String {
    "@GV.SPARE_DI".to_string()
}

fn default_spare_do() -> String {
    "@GV.SPARE_DO".to_string()
}

fn default_annotate() -> bool {
    true
}

impl Default for SparesConfig {
    fn default() -> Self {
        Self {
            ai: default_spare_ai(),
            ao: default_spare_ao(),
            di: default_spare_di(),
            do_: default_spare_do(),
            annotate: default_annotate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sigext_path: String::new(),
            sigext_flags: String::new(),
            classification: ClassificationConfig::default(),
            spares: SparesConfig::default(),
            legacy_root: false,
        }
    }
}

impl Config {
    /// Load config from an explicit file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DnpGenError::ConfigNotFound {
                searched: vec![path.to_path_buf()],
            });
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content, ConfigFormat::from_path(path)).map_err(|message| {
            DnpGenError::ConfigParse {
                path: path.to_path_buf(),
                message,
            }
        })
    }

    /// Parse config text. Accepts the settings either at top level or
    /// nested under an `app` table.
    pub fn parse(content: &str, format: ConfigFormat) -> std::result::Result<Self, String> {
        match format {
            ConfigFormat::Toml => {
                let mut table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
                let (root, legacy_root) = match table.remove(LEGACY_ROOT_KEY) {
                    Some(toml::Value::Table(app)) if table.is_empty() => (app, true),
                    Some(other) => {
                        table.insert(LEGACY_ROOT_KEY.to_string(), other);
                        (table, false)
                    }
                    None => (table, false),
                };
                let mut config: Self = toml::Value::Table(root)
                    .try_into()
                    .map_err(|e: toml::de::Error| e.to_string())?;
                config.legacy_root = legacy_root;
                Ok(config)
            }
            ConfigFormat::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| e.to_string())?;
                let (root, legacy_root) = match value {
                    serde_yaml::Value::Null => return Ok(Self::default()),
                    serde_yaml::Value::Mapping(mut map) => {
                        let is_wrapped = map.len() == 1 && map.contains_key(LEGACY_ROOT_KEY);
                        if is_wrapped {
                            (map.remove(LEGACY_ROOT_KEY).unwrap_or_default(), true)
                        } else {
                            (serde_yaml::Value::Mapping(map), false)
                        }
                    }
                    other => (other, false),
                };
                let mut config: Self = serde_yaml::from_value(root).map_err(|e| e.to_string())?;
                config.legacy_root = legacy_root;
                Ok(config)
            }
        }
    }

    /// Whether the settings were nested under an `app` table when loaded
    pub fn has_legacy_root(&self) -> bool {
        self.legacy_root
    }

    /// Save config, keeping the format implied by the file extension and
    /// the `app` wrapper if the loaded file had one
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = match (ConfigFormat::from_path(path), self.legacy_root) {
            (ConfigFormat::Toml, false) => toml::to_string_pretty(self)?,
            (ConfigFormat::Toml, true) => {
                let mut wrapper = toml::Table::new();
                wrapper.insert(LEGACY_ROOT_KEY.to_string(), toml::Value::try_from(self)?);
                toml::to_string_pretty(&wrapper)?
            }
            (ConfigFormat::Yaml, false) => serde_yaml::to_string(self)?,
            (ConfigFormat::Yaml, true) => {
                let mut wrapper = serde_yaml::Mapping::new();
                wrapper.insert(
                    serde_yaml::Value::String(LEGACY_ROOT_KEY.to_string()),
                    serde_yaml::to_value(self)?,
                );
                serde_yaml::to_string(&wrapper)?
            }
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Directories searched for a config file, in order:
    /// executable dir, current dir, user config dir
    pub fn search_dirs(exe_dir: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
        let mut dirs_list = Vec::new();
        if let Some(dir) = exe_dir {
            dirs_list.push(dir.to_path_buf());
        }
        if !dirs_list.iter().any(|d| d == cwd) {
            dirs_list.push(cwd.to_path_buf());
        }
        if let Some(dir) = dirs::config_dir() {
            dirs_list.push(dir.join(USER_CONFIG_DIR));
        }
        dirs_list
    }

    /// Find the first existing config file in `search_dirs`
    pub fn discover(search_dirs: &[PathBuf]) -> Result<PathBuf> {
        let mut searched = Vec::new();
        for dir in search_dirs {
            for name in CONFIG_FILES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(candidate);
                }
                searched.push(candidate);
            }
        }
        Err(DnpGenError::ConfigNotFound { searched })
    }

    /// Initialize config with default template (rich comments)
    pub fn init(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILES[0]);
        fs::create_dir_all(dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sigext_path" => self.sigext_path = value.to_string(),
            "sigext_flags" => self.sigext_flags = value.to_string(),
            "spares.ai" => self.spares.ai = value.to_string(),
            "spares.ao" => self.spares.ao = value.to_string(),
            "spares.di" => self.spares.di = value.to_string(),
            "spares.do" => self.spares.do_ = value.to_string(),
            "spares.annotate" => {
                self.spares.annotate = value.trim().parse().map_err(|_| {
                    DnpGenError::InvalidConfigValue {
                        key: key.to_string(),
                        message: format!("expected true or false, got '{}'", value),
                    }
                })?;
            }
            "classification.analog_output_regex" => {
                self.classification.analog_output_regex = parse_string_list(value);
            }
            "classification.digital_output_regex" => {
                self.classification.digital_output_regex = parse_string_list(value);
            }
            _ => {
                return Err(DnpGenError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("sigext_path".to_string(), self.sigext_path.clone()),
            ("sigext_flags".to_string(), self.sigext_flags.clone()),
            (
                "classification.analog_output_regex".to_string(),
                format!("{:?}", self.classification.analog_output_regex),
            ),
            (
                "classification.digital_output_regex".to_string(),
                format!("{:?}", self.classification.digital_output_regex),
            ),
            ("spares.ai".to_string(), self.spares.ai.clone()),
            ("spares.ao".to_string(), self.spares.ao.clone()),
            ("spares.di".to_string(), self.spares.di.clone()),
            ("spares.do".to_string(), self.spares.do_.clone()),
            (
                "spares.annotate".to_string(),
                self.spares.annotate.to_string(),
            ),
        ]
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();

    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
