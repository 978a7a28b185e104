//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_scaffolds_default_scripts() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let output = run_nautus(temp.path(), &["init"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));

  for name in ["@Build.toml", "@Run.toml", "@Test.toml", "@Release.toml"] {
    assert!(temp.path().join("nautus/scripts").join(name).is_file(), "{} missing", name);
  }
  assert!(temp.path().join("nautus.toml").is_file());
  Ok(())
}

#[test]
fn test_default_build_script_asks_to_be_edited() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  run_nautus(temp.path(), &["init"])?;

  let output = run_nautus(temp.path(), &["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("No build script defined, please edit ./nautus/scripts/@Build.toml"));
  Ok(())
}

#[test]
fn test_default_release_script_does_nothing() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  run_nautus(temp.path(), &["init"])?;

  let output = run_nautus(temp.path(), &["release", "patch"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  Ok(())
}

#[test]
fn test_init_keeps_edited_scripts() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\ninfo = \"custom build\"\n")?;

  let output = project.run(&["init"])?;
  assert_eq!(code(&output), 0);
  assert!(stdout(&output).contains("Kept"));
  assert_eq!(project.read_file("nautus/scripts/@Build.toml")?, "[[steps]]\ninfo = \"custom build\"\n");

  project.run(&["init", "--force"])?;
  assert!(project.read_file("nautus/scripts/@Build.toml")?.contains("No build script defined"));
  Ok(())
}

#[test]
fn test_unknown_directory_fails() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let output = run_nautus(temp.path(), &["-C", "does-not-exist", "build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Project directory not found"));
  Ok(())
}
