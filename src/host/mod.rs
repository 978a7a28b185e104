//! Script host: resolves a named script, binds a capability set to it and
//! turns its termination into an exit outcome
//!
//! # Flow
//!
//! ```text
//! ScriptHost::run("Release")
//!   -> invoke("Release")                  stack: [Release]
//!        catalog.resolve -> Rc<dyn Script>
//!        script.run(&mut HostCapabilities, &ReleaseContext)
//!          caps.script("Build")
//!            -> invoke("Build")           stack: [Release, Build]
//!          caps.exit(2) -> Halt::Exit(2)  unwinds through every `?`
//!   -> ExitOutcome::Exited(2)             state: Terminated
//! ```
//!
//! Only `main` turns the outcome into a process exit.

pub mod bin;
pub mod capabilities;
pub mod halt;
pub mod modules;
pub mod process;

pub use bin::LocalBinResolver;
pub use capabilities::{CAPABILITIES, Capabilities, HostCapabilities};
pub use halt::{ExitOutcome, Halt, ScriptResult};
pub use modules::{MODULES, Modules};
pub use process::{ChildEnv, CommandOutput, Os, ProcessRunner};

use crate::core::context::ProjectContext;
use crate::core::error::{NautusError, ScriptError};
use crate::release::ReleaseContext;
use crate::script::{ScriptCatalog, ScriptRegistry};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Lifecycle of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
  /// Ready to run a script
  Idle,
  /// A script is executing
  Running,
  /// A script halted through exit, error or a fault
  Terminated,
}

/// Executes scripts for one CLI invocation
pub struct ScriptHost {
  root: PathBuf,
  release: ReleaseContext,
  catalog: ScriptCatalog,
  pub(crate) modules: Modules,
  pub(crate) runner: ProcessRunner,
  pub(crate) bins: LocalBinResolver,
  stack: Vec<String>,
  state: HostState,
}

impl ScriptHost {
  /// Host for a project with file scripts only
  pub fn new(ctx: &ProjectContext) -> Self {
    Self::with_registry(ctx, ScriptRegistry::new())
  }

  /// Host for a project with additional programmatic scripts
  pub fn with_registry(ctx: &ProjectContext, registry: ScriptRegistry) -> Self {
    let root = ctx.root.clone();
    Self {
      catalog: ScriptCatalog::new(ctx.scripts_dir(), registry),
      modules: Modules::new(&root),
      runner: ProcessRunner::new(&root, ctx.config.shell.invocation()),
      bins: LocalBinResolver::new(&root, &ctx.config.bin.dirs),
      release: ctx.release,
      stack: Vec::new(),
      state: HostState::Idle,
      root,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn release(&self) -> &ReleaseContext {
    &self.release
  }

  pub fn state(&self) -> HostState {
    self.state
  }

  pub fn catalog(&self) -> &ScriptCatalog {
    &self.catalog
  }

  /// True if a script with this name can be resolved
  pub fn is_defined(&self, name: &str) -> bool {
    self.catalog.is_defined(name)
  }

  /// Run `name` as the top-level script and report how it ended
  pub fn run(&mut self, name: &str) -> ExitOutcome {
    self.run_top_level(None, name)
  }

  /// Run `name` with `hook` invoked first inside the same run; a halt in
  /// `hook` stops before `name` starts
  pub fn run_with_hook(&mut self, hook: &str, name: &str) -> ExitOutcome {
    self.run_top_level(Some(hook), name)
  }

  fn run_top_level(&mut self, hook: Option<&str>, name: &str) -> ExitOutcome {
    if self.state == HostState::Terminated {
      return ExitOutcome::Failed(NautusError::message(
        "Script host already terminated; a halted invocation cannot be resumed",
      ));
    }

    self.state = HostState::Running;
    let hooked = match hook {
      Some(hook) => self.invoke(hook),
      None => Ok(()),
    };
    let result = match hooked {
      Ok(()) => self.invoke(name),
      Err(halt) => Err(halt),
    };

    let outcome = ExitOutcome::from(result);
    self.state = if outcome.is_halted() {
      HostState::Terminated
    } else {
      HostState::Idle
    };

    debug!(script = name, ?hook, code = outcome.code(), state = ?self.state, "script finished");
    outcome
  }

  /// Resolve and execute one script, nested inside whatever is running
  pub(crate) fn invoke(&mut self, name: &str) -> ScriptResult {
    if self.stack.iter().any(|running| running == name) {
      let mut chain = self.stack.clone();
      chain.push(name.to_string());
      return Err(ScriptError::Cycle { chain }.into());
    }

    let script = self.catalog.resolve(name)?;
    trace!(script = name, depth = self.stack.len(), "invoking script");

    self.stack.push(name.to_string());
    let release = self.release;
    let result = {
      let mut caps = HostCapabilities::new(self, name);
      script.run(&mut caps, &release)
    };
    self.stack.pop();

    result
  }
}
