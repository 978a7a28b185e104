//! Terminal output: styled console messages for scripts and commands

pub mod console;
pub mod style;

pub use style::Styler;
