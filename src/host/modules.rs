//! The module bag handed to scripts
//!
//! Scripts get a fixed set of utility handles instead of resolving their own
//! dependencies:
//!
//! - **fs**: filesystem access relative to the project root
//! - **fse**: extended helpers (ensure/empty/copy directories, JSON files, move)
//! - **path**: path utilities relative to the project root
//! - **style**: terminal styling
//! - **http**: blocking HTTP client
//!
//! Helpers return `anyhow::Result` with the failing path or URL as context.

use crate::ui::Styler;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Names of the handles in the module bag, in declaration order
pub const MODULES: [&str; 5] = ["fs", "fse", "path", "style", "http"];

/// Read-only bundle of utility handles
#[derive(Debug, Clone)]
pub struct Modules {
  pub fs: Fs,
  pub fse: FsExtra,
  pub path: PathUtils,
  pub style: Styler,
  pub http: Http,
}

impl Modules {
  pub fn new(root: &Path) -> Self {
    Self {
      fs: Fs::new(root),
      fse: FsExtra::new(root),
      path: PathUtils::new(root),
      style: Styler::detect(),
      http: Http::new(),
    }
  }

  /// Names of the available handles
  pub fn names(&self) -> &'static [&'static str] {
    &MODULES
  }
}

fn resolve_in(root: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}

/// Basic filesystem access; relative paths are resolved against the project root
#[derive(Debug, Clone)]
pub struct Fs {
  root: PathBuf,
}

impl Fs {
  fn new(root: &Path) -> Self {
    Self { root: root.to_path_buf() }
  }

  pub fn exists(&self, path: impl AsRef<Path>) -> bool {
    resolve_in(&self.root, path.as_ref()).exists()
  }

  pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
    let path = resolve_in(&self.root, path.as_ref());
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
  }

  pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = resolve_in(&self.root, path.as_ref());
    std::fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
  }

  pub fn remove_file(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = resolve_in(&self.root, path.as_ref());
    std::fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))
  }

  /// Entry names of a directory, sorted
  pub fn read_dir(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = resolve_in(&self.root, path.as_ref());
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&path).with_context(|| format!("Failed to list {}", path.display()))? {
      names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
  }
}

/// Extended filesystem helpers
#[derive(Debug, Clone)]
pub struct FsExtra {
  root: PathBuf,
}

impl FsExtra {
  fn new(root: &Path) -> Self {
    Self { root: root.to_path_buf() }
  }

  /// Create a directory and all parents if missing
  pub fn ensure_dir(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = resolve_in(&self.root, path.as_ref());
    std::fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(path)
  }

  /// Remove everything inside a directory, creating it if missing
  pub fn empty_dir(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = self.ensure_dir(path)?;
    for entry in std::fs::read_dir(&path).with_context(|| format!("Failed to list {}", path.display()))? {
      let entry_path = entry?.path();
      let removed = if entry_path.is_dir() {
        std::fs::remove_dir_all(&entry_path)
      } else {
        std::fs::remove_file(&entry_path)
      };
      removed.with_context(|| format!("Failed to remove {}", entry_path.display()))?;
    }
    Ok(())
  }

  /// Recursively copy a file or directory; returns the number of files copied
  pub fn copy(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<u64> {
    let from = resolve_in(&self.root, from.as_ref());
    let to = resolve_in(&self.root, to.as_ref());
    copy_recursive(&from, &to)
  }

  /// Move a file or directory, falling back to copy + remove across devices
  pub fn move_path(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let from = resolve_in(&self.root, from.as_ref());
    let to = resolve_in(&self.root, to.as_ref());
    if let Some(parent) = to.parent() {
      std::fs::create_dir_all(parent)?;
    }
    if std::fs::rename(&from, &to).is_ok() {
      return Ok(());
    }
    copy_recursive(&from, &to)?;
    let removed = if from.is_dir() {
      std::fs::remove_dir_all(&from)
    } else {
      std::fs::remove_file(&from)
    };
    removed.with_context(|| format!("Failed to remove {} after copying", from.display()))
  }

  pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
    let path = resolve_in(&self.root, path.as_ref());
    let content = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {}", path.display()))
  }

  pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = resolve_in(&self.root, path.as_ref());
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
  }
}

fn copy_recursive(from: &Path, to: &Path) -> Result<u64> {
  if from.is_dir() {
    std::fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;
    let mut copied = 0;
    for entry in std::fs::read_dir(from).with_context(|| format!("Failed to list {}", from.display()))? {
      let entry = entry?;
      copied += copy_recursive(&entry.path(), &to.join(entry.file_name()))?;
    }
    Ok(copied)
  } else {
    if let Some(parent) = to.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(from, to).with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    Ok(1)
  }
}

/// Path utilities anchored at the project root
#[derive(Debug, Clone)]
pub struct PathUtils {
  root: PathBuf,
}

impl PathUtils {
  fn new(root: &Path) -> Self {
    Self { root: root.to_path_buf() }
  }

  /// Project root (working directory of every script)
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Resolve a path against the project root
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    resolve_in(&self.root, path.as_ref())
  }

  /// Join segments onto the project root
  pub fn join<I, S>(&self, parts: I) -> PathBuf
  where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
  {
    parts.into_iter().fold(self.root.clone(), |acc, part| acc.join(part))
  }

  /// Path of `path` relative to the project root
  pub fn relative(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
    pathdiff::diff_paths(self.resolve(path), &self.root)
  }

  /// Forward-slash rendering, independent of platform
  pub fn to_slash(&self, path: impl AsRef<Path>) -> String {
    #[cfg(target_os = "windows")]
    {
      path.as_ref().to_string_lossy().replace('\\', "/")
    }
    #[cfg(not(target_os = "windows"))]
    {
      path.as_ref().to_string_lossy().to_string()
    }
  }
}

/// Blocking HTTP client, built on first use
#[derive(Debug, Clone, Default)]
pub struct Http {
  client: OnceLock<reqwest::blocking::Client>,
}

impl Http {
  fn new() -> Self {
    Self::default()
  }

  fn client(&self) -> Result<&reqwest::blocking::Client> {
    if let Some(client) = self.client.get() {
      return Ok(client);
    }
    let client = reqwest::blocking::Client::builder()
      .user_agent(concat!("nautus/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;
    Ok(self.client.get_or_init(|| client))
  }

  /// GET a URL and return the body as text
  pub fn get_text(&self, url: &str) -> Result<String> {
    let response = self
      .client()?
      .get(url)
      .send()
      .with_context(|| format!("GET {} failed", url))?
      .error_for_status()
      .with_context(|| format!("GET {} returned an error status", url))?;
    response.text().with_context(|| format!("Failed to read body of {}", url))
  }

  /// GET a URL and decode the body as JSON
  pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
    let response = self
      .client()?
      .get(url)
      .send()
      .with_context(|| format!("GET {} failed", url))?
      .error_for_status()
      .with_context(|| format!("GET {} returned an error status", url))?;
    response.json().with_context(|| format!("Failed to decode JSON from {}", url))
  }

  /// POST a JSON body and decode the JSON response
  pub fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
    let response = self
      .client()?
      .post(url)
      .json(body)
      .send()
      .with_context(|| format!("POST {} failed", url))?
      .error_for_status()
      .with_context(|| format!("POST {} returned an error status", url))?;
    response.json().with_context(|| format!("Failed to decode JSON from {}", url))
  }

  /// Download a URL to a file; returns the number of bytes written
  pub fn download(&self, url: &str, dest: &Path) -> Result<u64> {
    let mut response = self
      .client()?
      .get(url)
      .send()
      .with_context(|| format!("GET {} failed", url))?
      .error_for_status()
      .with_context(|| format!("GET {} returned an error status", url))?;
    if let Some(parent) = dest.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    response
      .copy_to(&mut file)
      .with_context(|| format!("Failed to download {} to {}", url, dest.display()))
  }
}
