//! Default script definitions written by `nautus init`

use crate::core::error::{NautusResult, ResultExt};
use crate::script::file_name;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = r#"# nautus script
#
# Each [[steps]] entry runs in order and takes exactly one action:
#   cmd = "..."        run through the shell (echo = true prints its stdout)
#   spawn = "prog"     run a program directly (args = [...], silent = true)
#   bin = "tool"       run a locally installed binary (node_modules/.bin)
#   script = "Name"    run another script and wait for it
#   info / warn = ".." print a message
#   error = "..."      print an error and stop with exit code 1
#   exit = 0           stop with the given exit code
#   bump = "file"      bump the version in package.json or Cargo.toml
#
# Optional keys: os = "windows" | "linux" | "mac", on_failure = "exit" | "error" | "ignore"
# Placeholders: {release_type} {os} {root} {script}
"#;

/// Name and body of each default script
fn defaults() -> [(&'static str, String); 4] {
  [
    ("Build", placeholder("Build", "Build the project")),
    ("Run", placeholder("Run", "Start the project")),
    ("Test", placeholder("Test", "Run the test suite")),
    ("Release", release()),
  ]
}

fn placeholder(name: &str, description: &str) -> String {
  format!(
    "{header}\ndescription = \"{description}\"\n\n[[steps]]\nerror = \"No {lower} script defined, please edit ./nautus/scripts/{file}\"\n",
    header = HEADER,
    description = description,
    lower = name.to_lowercase(),
    file = file_name(name),
  )
}

fn release() -> String {
  format!(
    r#"{header}
description = "Publish a new version"

# [[steps]]
# script = "Build"
#
# [[steps]]
# bump = "package.json"
#
# [[steps]]
# spawn = "npm"
# args = ["publish"]
"#,
    header = HEADER
  )
}

/// What `write_templates` did with each file
#[derive(Debug, Default)]
pub struct TemplateReport {
  pub written: Vec<PathBuf>,
  pub kept: Vec<PathBuf>,
}

/// Write the default scripts into `dir`, keeping existing files unless `force`
pub fn write_templates(dir: &Path, force: bool) -> NautusResult<TemplateReport> {
  fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

  let mut report = TemplateReport::default();
  for (name, body) in defaults() {
    let path = dir.join(file_name(name));
    if path.exists() && !force {
      report.kept.push(path);
      continue;
    }
    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    report.written.push(path);
  }
  Ok(report)
}
