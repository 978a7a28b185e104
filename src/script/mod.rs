//! Script definitions and lookup
//!
//! A script is one callable unit per lifecycle name. Two kinds exist:
//!
//! - **Registered scripts**: Rust closures or types implementing [`Script`],
//!   added to a [`ScriptRegistry`] by whoever embeds the host
//! - **File scripts**: `@<Name>.toml` step lists in the project's script
//!   directory (see [`file`])
//!
//! [`ScriptCatalog`] resolves a name by checking the registry first and the
//! script directory second.

pub mod file;
pub mod templates;

pub use file::FileScript;

use crate::core::error::{NautusResult, ScriptError};
use crate::host::{Capabilities, ScriptResult};
use crate::release::ReleaseContext;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A named unit of lifecycle logic
///
/// Scripts are stateless between invocations; everything they need arrives
/// through the capability set and the release context.
pub trait Script {
  fn run(&self, caps: &mut dyn Capabilities, release: &ReleaseContext) -> ScriptResult;

  /// One-line summary shown by `nautus list`
  fn description(&self) -> Option<&str> {
    None
  }
}

impl<F> Script for F
where
  F: Fn(&mut dyn Capabilities, &ReleaseContext) -> ScriptResult,
{
  fn run(&self, caps: &mut dyn Capabilities, release: &ReleaseContext) -> ScriptResult {
    self(caps, release)
  }
}

/// File name of a script definition: `@<Name>.toml`
pub fn file_name(name: &str) -> String {
  format!("@{}.toml", name)
}

/// Reject names that cannot map to a single file in the script directory
pub fn validate_name(name: &str) -> NautusResult<()> {
  let invalid = name.is_empty()
    || name.starts_with('@')
    || name.starts_with('.')
    || name.contains(|c: char| c == '/' || c == '\\' || c.is_whitespace() || c.is_control());

  if invalid {
    return Err(ScriptError::InvalidName { name: name.to_string() }.into());
  }
  Ok(())
}

/// Programmatically registered scripts
#[derive(Default, Clone)]
pub struct ScriptRegistry {
  scripts: BTreeMap<String, Rc<dyn Script>>,
}

impl ScriptRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a script under `name`, replacing any previous one
  pub fn register(&mut self, name: impl Into<String>, script: impl Script + 'static) -> &mut Self {
    self.scripts.insert(name.into(), Rc::new(script));
    self
  }

  /// Register a closure as a script
  pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
  where
    F: Fn(&mut dyn Capabilities, &ReleaseContext) -> ScriptResult + 'static,
  {
    self.register(name, f)
  }

  pub fn get(&self, name: &str) -> Option<Rc<dyn Script>> {
    self.scripts.get(name).cloned()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.scripts.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.scripts.keys().map(String::as_str)
  }
}

/// Where a script definition comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ScriptSource {
  Registered,
  File(PathBuf),
}

/// A defined script as reported by `nautus list`
#[derive(Debug, Clone, Serialize)]
pub struct ScriptEntry {
  pub name: String,
  pub source: ScriptSource,
  pub description: Option<String>,
  /// Set when a definition file fails to parse
  pub problem: Option<String>,
}

/// Name → script lookup over the registry and the script directory
#[derive(Clone)]
pub struct ScriptCatalog {
  registry: ScriptRegistry,
  dir: PathBuf,
}

impl ScriptCatalog {
  pub fn new(dir: impl Into<PathBuf>, registry: ScriptRegistry) -> Self {
    Self {
      registry,
      dir: dir.into(),
    }
  }

  /// Script directory
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Definition file for `name` (whether or not it exists)
  pub fn file_path(&self, name: &str) -> PathBuf {
    self.dir.join(file_name(name))
  }

  /// True if `resolve` would find a definition
  pub fn is_defined(&self, name: &str) -> bool {
    validate_name(name).is_ok() && (self.registry.contains(name) || self.file_path(name).is_file())
  }

  /// Resolve a script name to its callable unit
  pub fn resolve(&self, name: &str) -> NautusResult<Rc<dyn Script>> {
    validate_name(name)?;

    if let Some(script) = self.registry.get(name) {
      return Ok(script);
    }

    let path = self.file_path(name);
    if path.is_file() {
      let script = FileScript::load(name, &path)?;
      return Ok(Rc::new(script));
    }

    Err(
      ScriptError::NotFound {
        name: name.to_string(),
        dir: self.dir.clone(),
      }
      .into(),
    )
  }

  /// All defined scripts, sorted by name
  pub fn list(&self) -> NautusResult<Vec<ScriptEntry>> {
    let mut entries: BTreeMap<String, ScriptEntry> = BTreeMap::new();

    if self.dir.is_dir() {
      for entry in std::fs::read_dir(&self.dir)? {
        let path = entry?.path();
        let Some(name) = path
          .file_name()
          .and_then(|n| n.to_str())
          .and_then(|n| n.strip_prefix('@'))
          .and_then(|n| n.strip_suffix(".toml"))
        else {
          continue;
        };
        if validate_name(name).is_err() || !path.is_file() {
          continue;
        }

        let (description, problem) = match FileScript::load(name, &path) {
          Ok(script) => (script.description().map(str::to_string), None),
          Err(e) => (None, Some(e.to_string())),
        };
        entries.insert(
          name.to_string(),
          ScriptEntry {
            name: name.to_string(),
            source: ScriptSource::File(path),
            description,
            problem,
          },
        );
      }
    }

    for name in self.registry.names() {
      let description = self
        .registry
        .get(name)
        .and_then(|s| s.description().map(str::to_string));
      entries.insert(
        name.to_string(),
        ScriptEntry {
          name: name.to_string(),
          source: ScriptSource::Registered,
          description,
          problem: None,
        },
      );
    }

    Ok(entries.into_values().collect())
  }
}
