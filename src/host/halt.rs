//! Termination signal returned by scripts
//!
//! Scripts never exit the process themselves. `exit` and `error` hand back a
//! [`Halt`] that the script returns; it unwinds through every enclosing
//! script via `?` until the host turns it into an [`ExitOutcome`].

use crate::core::error::{NautusError, ScriptError};
use std::fmt;

/// Why a script stopped before completing normally
#[derive(Debug)]
#[must_use = "return the halt from the script so the host can stop"]
pub enum Halt {
  /// `exit(code)` was called
  Exit(i32),
  /// `error(..)` was called; the message has already been printed
  Error,
  /// The host could not carry out a request (lookup, definition, binary)
  Fault(NautusError),
}

impl fmt::Display for Halt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Halt::Exit(code) => write!(f, "exit({})", code),
      Halt::Error => write!(f, "error"),
      Halt::Fault(err) => write!(f, "{}", err),
    }
  }
}

impl From<NautusError> for Halt {
  fn from(err: NautusError) -> Self {
    Halt::Fault(err)
  }
}

impl From<ScriptError> for Halt {
  fn from(err: ScriptError) -> Self {
    Halt::Fault(NautusError::Script(err))
  }
}

/// Result of a script or a capability that may halt the invocation
pub type ScriptResult<T = ()> = Result<T, Halt>;

/// How a top-level `run` ended
#[derive(Debug)]
pub enum ExitOutcome {
  /// The script returned normally
  Completed,
  /// `exit(code)` ended the invocation
  Exited(i32),
  /// `error(..)` ended the invocation
  Errored,
  /// The host failed to resolve or execute something
  Failed(NautusError),
}

impl ExitOutcome {
  /// Process exit code for this outcome
  pub fn code(&self) -> i32 {
    match self {
      ExitOutcome::Completed => 0,
      ExitOutcome::Exited(code) => *code,
      ExitOutcome::Errored => 1,
      ExitOutcome::Failed(err) => err.exit_code().as_i32(),
    }
  }

  /// Code handed to the OS, which keeps only the low 8 bits
  ///
  /// A non-zero code that would truncate to 0 becomes 1 so a failure never
  /// reads as success.
  pub fn process_code(&self) -> i32 {
    let code = self.code();
    if code != 0 && code & 0xff == 0 { 1 } else { code }
  }

  /// True when the invocation ended through exit, error or a fault
  pub fn is_halted(&self) -> bool {
    !matches!(self, ExitOutcome::Completed)
  }
}

impl From<Halt> for ExitOutcome {
  fn from(halt: Halt) -> Self {
    match halt {
      Halt::Exit(code) => ExitOutcome::Exited(code),
      Halt::Error => ExitOutcome::Errored,
      Halt::Fault(err) => ExitOutcome::Failed(err),
    }
  }
}

impl From<ScriptResult> for ExitOutcome {
  fn from(result: ScriptResult) -> Self {
    match result {
      Ok(()) => ExitOutcome::Completed,
      Err(halt) => halt.into(),
    }
  }
}
