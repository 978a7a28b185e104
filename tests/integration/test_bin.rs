//! Tests for running locally installed binaries

#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_bin_runs_local_executable() -> Result<()> {
  let project = TestProject::new()?;
  let tool = project.write("node_modules/.bin/greet", "#!/bin/sh\necho \"hello $1\" > greeting.txt\nexit 0\n")?;
  make_executable(&tool)?;
  project.script("Build", "[[steps]]\nbin = \"greet\"\nargs = [\"{release_type}\"]\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  assert_eq!(project.read_file("greeting.txt")?, "hello minor\n");
  Ok(())
}

#[test]
fn test_bin_found_in_ancestor() -> Result<()> {
  let project = TestProject::new()?;
  let tool = project.write("node_modules/.bin/fail-with-5", "#!/bin/sh\nexit 5\n")?;
  make_executable(&tool)?;
  let app = project.path.join("packages").join("app");
  std::fs::create_dir_all(app.join("nautus").join("scripts"))?;
  std::fs::write(
    app.join("nautus").join("scripts").join("@Test.toml"),
    "[[steps]]\nbin = \"fail-with-5\"\nsilent = true\n",
  )?;

  let output = run_nautus(&app, &["test"])?;
  assert_eq!(code(&output), 5);
  Ok(())
}

#[test]
fn test_missing_bin_is_reported() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\nbin = \"rollup\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Local binary 'rollup' not found"));
  Ok(())
}

#[test]
fn test_configured_bin_dir() -> Result<()> {
  let project = TestProject::new()?;
  project.write("nautus.toml", "[bin]\ndirs = [\"tools\"]\n")?;
  let tool = project.write("tools/ok", "#!/bin/sh\nexit 0\n")?;
  make_executable(&tool)?;
  project.script("Build", "[[steps]]\nbin = \"ok\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  Ok(())
}
