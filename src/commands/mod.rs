//! CLI commands for nautus
//!
//! ## Setup & Inspection
//! - **init**: Scaffold the default scripts and nautus.toml
//! - **list**: Show defined scripts
//!
//! ## Lifecycle
//! - **build**, **test**, **run**, **release**: run the matching script
//!
//! Commands take `&ProjectContext` so the project is loaded once in main.

pub mod init;
pub mod lifecycle;
pub mod list;

pub use init::run_init;
pub use lifecycle::{Lifecycle, run_lifecycle, run_named};
pub use list::run_list;
