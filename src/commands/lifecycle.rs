//! Lifecycle verbs: `build`, `test`, `run` and `release`

use crate::core::config::MissingPolicy;
use crate::core::context::ProjectContext;
use crate::core::error::print_error;
use crate::host::{ExitOutcome, ScriptHost};
use crate::ui::console;
use tracing::debug;

/// Script that runs before `Run` when it exists
pub const PREP: &str = "Prep";

/// A CLI verb backed by a script of the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
  Build,
  Test,
  Run,
  Release,
}

impl Lifecycle {
  pub fn script_name(self) -> &'static str {
    match self {
      Lifecycle::Build => "Build",
      Lifecycle::Test => "Test",
      Lifecycle::Run => "Run",
      Lifecycle::Release => "Release",
    }
  }
}

/// Run the script behind a lifecycle verb and return the process exit code
///
/// A missing script follows `[scripts] missing` in nautus.toml.
pub fn run_lifecycle(ctx: &ProjectContext, lifecycle: Lifecycle) -> i32 {
  let name = lifecycle.script_name();
  let mut host = ScriptHost::new(ctx);

  if !host.is_defined(name) && ctx.config.scripts.missing == MissingPolicy::Skip {
    console::warn(&format!(
      "No {} script defined, skipping ({})",
      name.to_lowercase(),
      host.catalog().file_path(name).display()
    ));
    return 0;
  }

  console::script_banner(name);
  let outcome = if lifecycle == Lifecycle::Run && host.is_defined(PREP) {
    debug!("running {} before {}", PREP, name);
    host.run_with_hook(PREP, name)
  } else {
    host.run(name)
  };
  finish(outcome)
}

/// Run an arbitrary script by name; a missing script always fails
pub fn run_named(ctx: &ProjectContext, name: &str) -> i32 {
  let mut host = ScriptHost::new(ctx);
  console::script_banner(name);
  finish(host.run(name))
}

fn finish(outcome: ExitOutcome) -> i32 {
  if let ExitOutcome::Failed(err) = &outcome {
    print_error(err);
  }
  outcome.process_code()
}
