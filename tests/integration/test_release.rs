//! Tests for the `release` verb and version bumps

use crate::helpers::*;
use anyhow::Result;

const BUMP: &str = "[[steps]]\nbump = \"package.json\"\n";

#[test]
fn test_release_defaults_to_minor() -> Result<()> {
  let project = TestProject::new()?;
  project.write("package.json", "{\n    \"name\": \"demo\",\n    \"version\": \"1.2.3\"\n}\n")?;
  project.script("Release", BUMP)?;

  let output = project.run(&["release"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  assert!(project.read_file("package.json")?.contains("\"version\": \"1.3.0\""));
  assert!(stdout(&output).contains("from 1.2.3 to 1.3.0"));
  Ok(())
}

#[test]
fn test_release_major_and_patch() -> Result<()> {
  let project = TestProject::new()?;
  project.write("package.json", "{\"version\": \"1.2.3\"}")?;
  project.script("Release", BUMP)?;

  project.run(&["release", "major"])?;
  assert!(project.read_file("package.json")?.contains("\"2.0.0\""));

  project.run(&["release", "patch"])?;
  assert!(project.read_file("package.json")?.contains("\"2.0.1\""));
  Ok(())
}

#[test]
fn test_bump_preserves_key_order() -> Result<()> {
  let project = TestProject::new()?;
  project.write(
    "package.json",
    "{\"name\": \"demo\", \"version\": \"0.1.0\", \"scripts\": {\"b\": \"2\", \"a\": \"1\"}}",
  )?;
  project.script("Release", BUMP)?;

  project.run(&["release", "patch"])?;
  let content = project.read_file("package.json")?;
  let name = content.find("\"name\"").expect("name");
  let version = content.find("\"version\"").expect("version");
  let b = content.find("\"b\"").expect("b");
  let a = content.find("\"a\"").expect("a");
  assert!(name < version && version < b && b < a);
  assert!(content.contains("\n    \"name\""));
  assert!(content.ends_with("}\n"));
  Ok(())
}

#[test]
fn test_bump_cargo_manifest() -> Result<()> {
  let project = TestProject::new()?;
  project.write(
    "Cargo.toml",
    "[package]\nname = \"demo\" # keep\nversion = \"0.4.1\"\nedition = \"2021\"\n",
  )?;
  project.script("Release", "[[steps]]\nbump = \"Cargo.toml\"\n")?;

  let output = project.run(&["release", "minor"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  let content = project.read_file("Cargo.toml")?;
  assert!(content.contains("version = \"0.5.0\""));
  assert!(content.contains("# keep"));
  Ok(())
}

#[test]
fn test_bump_missing_manifest_is_an_error() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Release", BUMP)?;

  let output = project.run(&["release"])?;
  assert_eq!(code(&output), 1);
  Ok(())
}

#[test]
fn test_invalid_release_type_rejected() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Release", "")?;

  let output = project.run(&["release", "huge"])?;
  assert_ne!(code(&output), 0);
  assert!(!project.file_exists("package.json"));
  Ok(())
}
