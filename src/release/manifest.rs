//! Version bumps in package manifests
//!
//! Supports `package.json` (npm) and `Cargo.toml` (cargo). JSON keys keep their
//! original order; TOML is edited in place so comments and formatting survive.

use super::ReleaseContext;
use crate::core::error::{NautusError, NautusResult, ResultExt};
use serde::Serialize;
use std::path::Path;

/// Result of a manifest bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
  pub previous: String,
  pub next: String,
}

/// Bump the version stored in a manifest according to the release context
pub fn bump_manifest(manifest_path: &Path, release: &ReleaseContext) -> NautusResult<VersionChange> {
  let content = std::fs::read_to_string(manifest_path)
    .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

  let is_toml = manifest_path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

  let bumped = if is_toml {
    bump_toml(&content, release)
  } else {
    bump_json(&content, release)
  };
  let (updated, change) = bumped.with_context(|| format!("Failed to bump version in {}", manifest_path.display()))?;

  std::fs::write(manifest_path, updated).with_context(|| format!("Failed to write {}", manifest_path.display()))?;

  Ok(change)
}

fn bump_json(content: &str, release: &ReleaseContext) -> NautusResult<(String, VersionChange)> {
  let mut doc: serde_json::Value = serde_json::from_str(content)?;

  let previous = doc
    .get("version")
    .and_then(|v| v.as_str())
    .ok_or_else(|| NautusError::message("No string \"version\" field in manifest"))?
    .to_string();
  let next = release.bump(&previous)?;

  doc["version"] = serde_json::Value::String(next.clone());

  // package.json convention: 4-space indentation
  let mut buf = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
  doc.serialize(&mut ser)?;
  let mut out = String::from_utf8(buf)?;
  out.push('\n');

  Ok((out, VersionChange { previous, next }))
}

fn bump_toml(content: &str, release: &ReleaseContext) -> NautusResult<(String, VersionChange)> {
  let mut doc: toml_edit::DocumentMut = content.parse()?;

  // [package] first, then [workspace.package] for virtual manifests
  let table = if doc.get("package").is_some_and(|p| p.is_table()) {
    doc.get_mut("package").and_then(|p| p.as_table_mut())
  } else {
    doc
      .get_mut("workspace")
      .and_then(|w| w.as_table_mut())
      .and_then(|w| w.get_mut("package"))
      .and_then(|p| p.as_table_mut())
  };
  let table = table.ok_or_else(|| NautusError::message("No [package] section in manifest"))?;

  let previous = table
    .get("version")
    .and_then(|v| v.as_str())
    .ok_or_else(|| NautusError::message("No version field in [package]"))?
    .to_string();
  let next = release.bump(&previous)?;

  table["version"] = toml_edit::value(next.clone());

  Ok((doc.to_string(), VersionChange { previous, next }))
}
