//! Terminal styling with `anstyle`
//!
//! Colors are emitted only when stdout is a terminal and `NO_COLOR` is unset.

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

/// Applies ANSI styles to text when color output is enabled
#[derive(Debug, Clone, Copy)]
pub struct Styler {
  enabled: bool,
}

impl Styler {
  /// Detect color support for stdout
  pub fn detect() -> Self {
    Self::for_stream(std::io::stdout().is_terminal())
  }

  /// Detect color support for stderr
  pub fn detect_stderr() -> Self {
    Self::for_stream(std::io::stderr().is_terminal())
  }

  fn for_stream(is_terminal: bool) -> Self {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    Self {
      enabled: !no_color && is_terminal,
    }
  }

  /// Styler with an explicit on/off switch
  pub fn new(enabled: bool) -> Self {
    Self { enabled }
  }

  pub fn enabled(&self) -> bool {
    self.enabled
  }

  /// Render text with an arbitrary style
  pub fn paint(&self, style: Style, text: &str) -> String {
    if self.enabled {
      format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
      text.to_string()
    }
  }

  pub fn bold(&self, text: &str) -> String {
    self.paint(Style::new().bold(), text)
  }

  pub fn dim(&self, text: &str) -> String {
    self.paint(Style::new().dimmed(), text)
  }

  pub fn red(&self, text: &str) -> String {
    self.paint(fg(AnsiColor::Red), text)
  }

  pub fn green(&self, text: &str) -> String {
    self.paint(fg(AnsiColor::Green), text)
  }

  pub fn yellow(&self, text: &str) -> String {
    self.paint(fg(AnsiColor::Yellow), text)
  }

  pub fn blue(&self, text: &str) -> String {
    self.paint(fg(AnsiColor::Blue), text)
  }

  pub fn cyan(&self, text: &str) -> String {
    self.paint(fg(AnsiColor::Cyan), text)
  }
}

fn fg(color: AnsiColor) -> Style {
  Style::new().fg_color(Some(Color::Ansi(color)))
}
