//! Tests for the `list` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_list_shows_descriptions() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "description = \"Compile everything\"\n")?;
  project.script("Broken", "steps = 1\n")?;

  let output = project.run(&["list"])?;
  assert_eq!(code(&output), 0);
  let out = stdout(&output);
  assert!(out.contains("Build"));
  assert!(out.contains("Compile everything"));
  assert!(out.contains("invalid"));
  Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Test", "description = \"Run tests\"\n")?;

  let output = project.run(&["list", "--json"])?;
  assert_eq!(code(&output), 0);
  let entries: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(entries[0]["name"], "Test");
  assert_eq!(entries[0]["description"], "Run tests");
  assert_eq!(entries[0]["source"]["kind"], "file");
  Ok(())
}

#[test]
fn test_list_empty_project() -> Result<()> {
  let project = TestProject::new()?;
  let output = project.run(&["list"])?;
  assert_eq!(code(&output), 0);
  assert!(stdout(&output).contains("nautus init"));
  Ok(())
}
