//! Tests for the lifecycle verbs and exit code propagation

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_missing_script_fails() -> Result<()> {
  let project = TestProject::new()?;
  let output = project.run(&["test"])?;

  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Script 'Test' is not defined"));
  Ok(())
}

#[test]
fn test_missing_script_skipped_by_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write("nautus.toml", "[scripts]\nmissing = \"skip\"\n")?;

  let output = project.run(&["test"])?;
  assert_eq!(code(&output), 0);
  assert!(stderr(&output).contains("skipping"));
  Ok(())
}

#[test]
fn test_info_and_warn_reach_the_console() -> Result<()> {
  let project = TestProject::new()?;
  project.script(
    "Build",
    "[[steps]]\ninfo = \"building {script} for {release_type}\"\n\n[[steps]]\nwarn = \"careful\"\n",
  )?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("building Build for minor"));
  assert!(stderr(&output).contains("careful"));
  Ok(())
}

#[test]
fn test_exit_code_is_exact() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\nexit = 42\n\n[[steps]]\ninfo = \"after exit\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 42);
  assert!(!stdout(&output).contains("after exit"));
  Ok(())
}

#[test]
fn test_exit_code_beyond_a_byte_is_rejected() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\nexit = 256\n")?;
  project.script("Test", "[[steps]]\nexit = -1\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("exit code 256 is outside 0..=255"));

  assert_eq!(code(&project.run(&["test"])?), 1);
  Ok(())
}

#[test]
fn test_error_exits_with_one() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Test", "[[steps]]\nerror = \"3 tests failed\"\n\n[[steps]]\ninfo = \"after error\"\n")?;

  let output = project.run(&["test"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("3 tests failed"));
  assert!(!stdout(&output).contains("after error"));
  Ok(())
}

#[test]
fn test_invalid_definition_is_reported() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\ninfo = \"a\"\nwarn = \"b\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("more than one action"));
  Ok(())
}

#[test]
fn test_run_named_script() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Deploy", "[[steps]]\ninfo = \"deploying\"\n")?;

  let output = project.run(&["run", "Deploy"])?;
  assert_eq!(code(&output), 0);
  assert!(stdout(&output).contains("deploying"));

  let output = project.run(&["run", "../Deploy"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("Invalid script name"));
  Ok(())
}

#[test]
fn test_run_is_preceded_by_prep() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Prep", "[[steps]]\ninfo = \"prep step\"\n")?;
  project.script("Run", "[[steps]]\ninfo = \"run step\"\n")?;

  let output = project.run(&["run"])?;
  assert_eq!(code(&output), 0);
  let out = stdout(&output);
  let prep = out.find("prep step").expect("prep output");
  let run = out.find("run step").expect("run output");
  assert!(prep < run);
  Ok(())
}

#[test]
fn test_os_filter_skips_other_platforms() -> Result<()> {
  let project = TestProject::new()?;
  project.script(
    "Build",
    r#"[[steps]]
info = "only on windows"
os = "windows"

[[steps]]
info = "only on linux"
os = "linux"

[[steps]]
info = "only on mac"
os = "mac"

[[steps]]
info = "running on {os}"
"#,
  )?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0);
  let out = stdout(&output);
  let visible = ["windows", "linux", "mac"]
    .iter()
    .filter(|os| out.contains(&format!("only on {}", os)))
    .count();
  assert!(visible <= 1);
  assert!(out.contains("running on "));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_cmd_failure_policies() -> Result<()> {
  let project = TestProject::new()?;
  project.script(
    "Build",
    r#"[[steps]]
cmd = "exit 3"
on_failure = "ignore"

[[steps]]
cmd = "echo captured"
echo = true

[[steps]]
cmd = "exit 4"
"#,
  )?;
  project.script("Test", "[[steps]]\ncmd = \"exit 4\"\non_failure = \"error\"\n")?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 4);
  assert!(stdout(&output).contains("captured"));
  assert!(stderr(&output).contains("continuing"));

  let output = project.run(&["test"])?;
  assert_eq!(code(&output), 1);
  assert!(stderr(&output).contains("failed with exit code 4"));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_spawn_sees_nautus_environment() -> Result<()> {
  let project = TestProject::new()?;
  project.script(
    "Build",
    r#"[[steps]]
spawn = "sh"
args = ["-c", "printf '%s %s' \"$NAUTUS_SCRIPT\" \"$NAUTUS_RELEASE_TYPE\" > env.txt"]
"#,
  )?;

  let output = project.run(&["build"])?;
  assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
  assert_eq!(project.read_file("env.txt")?, "Build minor");
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_spawn_failure_propagates_child_code() -> Result<()> {
  let project = TestProject::new()?;
  project.script("Build", "[[steps]]\nspawn = \"sh\"\nargs = [\"-c\", \"exit 13\"]\n")?;
  project.script("Test", "[[steps]]\nspawn = \"definitely-not-installed-xyz\"\n")?;

  assert_eq!(code(&project.run(&["build"])?), 13);
  assert_eq!(code(&project.run(&["test"])?), 127);
  Ok(())
}
