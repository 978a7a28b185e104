//! Tests for scripts calling other scripts

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_nested_scripts_run_in_order() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Lint", "[[steps]]\ninfo = \"lint ran\"\n")?;
  project.script("Compile", "[[steps]]\ninfo = \"compile ran\"\n")?;
  project.script(
    "Build",
    r#"[[steps]]
info = "build start"

[[steps]]
script = "Lint"

[[steps]]
script = "Compile"

[[steps]]
info = "build end"
"#,
  )?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));

  let out = stdout(&output);
  let order: Vec<usize> = ["build start", "lint ran", "compile ran", "build end"]
    .iter()
    .map(|line| out.find(line).expect(line))
    .collect();
  assert!(order.windows(2).all(|w| w[0] < w[1]), "out of order: {}", out);
  Ok(())
}

#[test]
fn test_exit_in_nested_script_stops_the_caller() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Check", "[[steps]]\nexit = 7\n")?;
  project.script("Release", "[[steps]]\nscript = \"Check\"\n\n[[steps]]\ninfo = \"published\"\n")?;

  let output = project.run(&["release"])?;
  assert_eq!(code(&output), 7);
  assert!(!stdout(&output).contains("published"));
  Ok(())
}

#[test]
fn test_nested_missing_script_fails_even_when_skipping() -> Result<()> {
  let project = TestProject::new()?;
  project.write("nautus.toml", "[scripts]\nmissing = \"skip\"\n")?;
  project.script("Build", "[[steps]]\nscript = \"Generate\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Script 'Generate' is not defined"));
  Ok(())
}

#[test]
fn test_cycle_is_reported() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\nscript = \"Test\"\n")?;
  project.script("Test", "[[steps]]\nscript = \"Build\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Build -> Test -> Build"));
  Ok(())
}

#[test]
fn test_release_type_reaches_nested_scripts() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Notes", "[[steps]]\ninfo = \"{script} sees {release_type}\"\n")?;
  project.script("Release", "[[steps]]\nscript = \"Notes\"\n")?;

  let output = project.run(&["release", "major"])?;
  assert_eq!(code(&output), 0);
  assert!(stdout(&output).contains("Notes sees major"));
  Ok(())
}
