//! Error types for nautus with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Errors that reach the top-level handler are
//! printed with a suggestion whenever one exists.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for nautus failures
///
/// Scripts pick arbitrary codes through `exit`; these are only the codes the
/// host itself selects when something goes wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Script failure, lookup failure, config error
  Failure = 1,
  /// Program could not be launched (shell convention)
  NotLaunched = 127,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for nautus
#[derive(Debug)]
pub enum NautusError {
  /// Configuration errors
  Config(ConfigError),

  /// Script lookup and definition errors
  Script(ScriptError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl NautusError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    NautusError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    NautusError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      NautusError::Message { message, context, help } => NautusError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      NautusError::Io(err) => NautusError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Every host-selected failure exits with 1
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      NautusError::Config(e) => e.help_message(),
      NautusError::Script(e) => e.help_message(),
      NautusError::Message { help, .. } => help.clone(),
      NautusError::Io(_) => None,
    }
  }

  /// True when the error is an unresolvable script name
  pub fn is_not_found(&self) -> bool {
    matches!(self, NautusError::Script(ScriptError::NotFound { .. }))
  }
}

impl fmt::Display for NautusError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NautusError::Config(e) => write!(f, "{}", e),
      NautusError::Script(e) => write!(f, "{}", e),
      NautusError::Io(e) => write!(f, "I/O error: {}", e),
      NautusError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for NautusError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      NautusError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for NautusError {
  fn from(err: io::Error) -> Self {
    NautusError::Io(err)
  }
}

impl From<String> for NautusError {
  fn from(msg: String) -> Self {
    NautusError::message(msg)
  }
}

impl From<&str> for NautusError {
  fn from(msg: &str) -> Self {
    NautusError::message(msg)
  }
}

impl From<ScriptError> for NautusError {
  fn from(err: ScriptError) -> Self {
    NautusError::Script(err)
  }
}

impl From<ConfigError> for NautusError {
  fn from(err: ConfigError) -> Self {
    NautusError::Config(err)
  }
}

impl From<toml_edit::TomlError> for NautusError {
  fn from(err: toml_edit::TomlError) -> Self {
    NautusError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for NautusError {
  fn from(err: toml_edit::de::Error) -> Self {
    NautusError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for NautusError {
  fn from(err: toml_edit::ser::Error) -> Self {
    NautusError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for NautusError {
  fn from(err: serde_json::Error) -> Self {
    NautusError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for NautusError {
  fn from(err: semver::Error) -> Self {
    NautusError::message(format!("Invalid semver version: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for NautusError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    NautusError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Module bag helpers report through anyhow; flatten the chain at the boundary
impl From<anyhow::Error> for NautusError {
  fn from(err: anyhow::Error) -> Self {
    NautusError::message(format!("{:#}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Could not locate a project directory
  ProjectNotFound { path: PathBuf },

  /// Field holds a value nautus does not understand
  InvalidValue { field: String, value: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::ProjectNotFound { .. } => {
        Some("Pass an existing directory with `--dir`, or run `nautus init` inside your project.".to_string())
      }
      ConfigError::InvalidValue { field, .. } => Some(format!("Check the `{}` entry in nautus.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::ProjectNotFound { path } => {
        write!(f, "Project directory not found: {}", path.display())
      }
      ConfigError::InvalidValue { field, value } => {
        write!(f, "Invalid value for {}: '{}'", field, value)
      }
    }
  }
}

/// Script lookup, resolution and definition errors
#[derive(Debug)]
pub enum ScriptError {
  /// No script definition for this name
  NotFound { name: String, dir: PathBuf },

  /// Name cannot map to a script file
  InvalidName { name: String },

  /// No locally installed executable with this name
  BinaryNotFound { command: String, searched: Vec<PathBuf> },

  /// A script invoked itself, directly or through others
  Cycle { chain: Vec<String> },

  /// Script definition file is malformed
  Definition { path: PathBuf, reason: String },
}

impl ScriptError {
  fn help_message(&self) -> Option<String> {
    match self {
      ScriptError::NotFound { name, dir } => Some(format!(
        "Create {}/@{}.toml, or run `nautus init` to scaffold the default scripts.",
        dir.display(),
        name
      )),
      ScriptError::InvalidName { .. } => {
        Some("Script names are plain identifiers like `Build` or `Deploy`.".to_string())
      }
      ScriptError::BinaryNotFound { .. } => {
        Some("Install the package that provides it locally (e.g. `npm install --save-dev <pkg>`).".to_string())
      }
      ScriptError::Cycle { .. } => Some("Remove one of the `script` steps that closes the loop.".to_string()),
      ScriptError::Definition { .. } => None,
    }
  }
}

impl fmt::Display for ScriptError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScriptError::NotFound { name, .. } => write!(f, "Script '{}' is not defined", name),
      ScriptError::InvalidName { name } => write!(f, "Invalid script name: '{}'", name),
      ScriptError::BinaryNotFound { command, searched } => {
        write!(f, "Local binary '{}' not found", command)?;
        for dir in searched {
          write!(f, "\n  searched: {}", dir.display())?;
        }
        Ok(())
      }
      ScriptError::Cycle { chain } => write!(f, "Script cycle detected: {}", chain.join(" -> ")),
      ScriptError::Definition { path, reason } => {
        write!(f, "Invalid script definition {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for nautus
pub type NautusResult<T> = Result<T, NautusError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> NautusResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> NautusResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<NautusError>,
{
  fn context(self, ctx: impl Into<String>) -> NautusResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> NautusResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &NautusError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
