//! User-facing console output
//!
//! Info goes to stdout, warnings and errors to stderr, so a script's own
//! output can be piped without the host's diagnostics mixed in.

use super::style::Styler;

/// Print an informational message
pub fn info(message: &str) {
  println!("{}", format_info(message, &Styler::detect()));
}

/// Print a warning
pub fn warn(message: &str) {
  let styler = Styler::detect_stderr();
  eprintln!("{}  {}", styler.yellow("⚠️"), styler.yellow(message));
}

/// Print an error message (does not exit)
pub fn error(message: &str) {
  let styler = Styler::detect_stderr();
  eprintln!("❌ {}", styler.red(message));
}

/// Announce a script about to run
pub fn script_banner(name: &str) {
  let styler = Styler::detect();
  println!("{} {}", styler.dim("▶"), styler.bold(name));
}

/// Info line as printed by [`info`]
pub fn format_info(message: &str, styler: &Styler) -> String {
  format!("{} {}", styler.cyan("ℹ"), message)
}
