use crate::core::error::{ConfigError, NautusError, NautusResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for nautus
/// Searched in order: nautus.toml, .nautus.toml, .config/nautus.toml
///
/// Every section is optional; a project without any config file behaves
/// exactly like one with the defaults written by `nautus init`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NautusConfig {
  #[serde(default)]
  pub scripts: ScriptsConfig,
  #[serde(default)]
  pub bin: BinConfig,
  #[serde(default)]
  pub shell: ShellConfig,
}

/// Where scripts live and what happens when a lifecycle script is missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
  /// Script directory, relative to the project root (default: "nautus/scripts")
  #[serde(default = "default_scripts_dir")]
  pub dir: PathBuf,

  /// Behaviour when the script behind a CLI verb is not defined
  #[serde(default)]
  pub missing: MissingPolicy,
}

fn default_scripts_dir() -> PathBuf {
  PathBuf::from("nautus").join("scripts")
}

impl Default for ScriptsConfig {
  fn default() -> Self {
    Self {
      dir: default_scripts_dir(),
      missing: MissingPolicy::default(),
    }
  }
}

/// Policy for a top-level verb whose script does not exist
///
/// Nested `script` lookups always fail; this only governs `nautus build`,
/// `nautus test`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
  /// Report the missing script and exit with 1
  #[default]
  Fail,
  /// Print a warning and exit with 0
  Skip,
}

/// Local binary search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinConfig {
  /// Directories (relative to the project root and each of its ancestors)
  /// searched for locally installed executables
  #[serde(default = "default_bin_dirs")]
  pub dirs: Vec<PathBuf>,
}

fn default_bin_dirs() -> Vec<PathBuf> {
  vec![PathBuf::from("node_modules").join(".bin")]
}

impl Default for BinConfig {
  fn default() -> Self {
    Self { dirs: default_bin_dirs() }
  }
}

/// Shell used by the `cmd` capability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
  /// Shell program (default: `sh` on unix, `cmd` on windows)
  #[serde(default)]
  pub program: Option<String>,

  /// Arguments placed before the command string (default: `-c` / `/C`)
  #[serde(default)]
  pub args: Option<Vec<String>>,
}

impl ShellConfig {
  /// Resolve the shell program and its leading arguments for this platform
  pub fn invocation(&self) -> (String, Vec<String>) {
    let (default_program, default_args) = if cfg!(windows) {
      ("cmd", vec!["/C".to_string()])
    } else {
      ("sh", vec!["-c".to_string()])
    };

    let program = self.program.clone().unwrap_or_else(|| default_program.to_string());
    let args = self.args.clone().unwrap_or(default_args);
    (program, args)
  }

  fn validate(&self) -> NautusResult<()> {
    if let Some(program) = &self.program
      && program.trim().is_empty()
    {
      return Err(NautusError::Config(ConfigError::InvalidValue {
        field: "shell.program".to_string(),
        value: program.clone(),
      }));
    }
    Ok(())
  }
}

impl NautusConfig {
  /// Find config file in search order: nautus.toml, .nautus.toml, .config/nautus.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("nautus.toml"),
      path.join(".nautus.toml"),
      path.join(".config").join("nautus.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> NautusResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: NautusConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Save config to nautus.toml (default location)
  pub fn save(&self, path: &Path) -> NautusResult<()> {
    let config_path = path.join("nautus.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  fn validate(&self) -> NautusResult<()> {
    if self.scripts.dir.as_os_str().is_empty() {
      return Err(NautusError::Config(ConfigError::InvalidValue {
        field: "scripts.dir".to_string(),
        value: String::new(),
      }));
    }

    if let Some(empty) = self.bin.dirs.iter().find(|d| d.as_os_str().is_empty()) {
      return Err(NautusError::Config(ConfigError::InvalidValue {
        field: "bin.dirs".to_string(),
        value: empty.display().to_string(),
      }));
    }

    self.shell.validate()
  }
}
