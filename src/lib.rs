//! nautus - project lifecycle scripts behind one small CLI
//!
//! A project keeps its lifecycle logic (`Build`, `Run`, `Test`, `Release`, and
//! any name it likes) as scripts. The [`host::ScriptHost`] resolves a script
//! by name, hands it a fixed [`host::Capabilities`] set plus the
//! [`release::ReleaseContext`], and turns however it ends into an exit code.
//!
//! ```no_run
//! use nautus::core::context::ProjectContext;
//! use nautus::host::ScriptHost;
//! use nautus::release::ReleaseType;
//! use nautus::script::ScriptRegistry;
//!
//! let ctx = ProjectContext::build(std::path::Path::new("."), ReleaseType::Patch)?;
//! let mut registry = ScriptRegistry::new();
//! registry.register_fn("Hello", |caps, release| {
//!   caps.info(&format!("cutting a {} release", release.release_type()));
//!   if caps.spawn("git", &["diff", "--quiet"], true) != 0 {
//!     return Err(caps.error("working tree is dirty"));
//!   }
//!   caps.script("Build")
//! });
//!
//! let outcome = ScriptHost::with_registry(&ctx, registry).run("Hello");
//! std::process::exit(outcome.code());
//! # Ok::<(), nautus::core::error::NautusError>(())
//! ```

pub mod commands;
pub mod core;
pub mod host;
pub mod release;
pub mod script;
pub mod ui;

pub use crate::core::error::{NautusError, NautusResult};
pub use host::{Capabilities, ExitOutcome, Halt, ScriptHost, ScriptResult};
pub use release::{ReleaseContext, ReleaseType};
pub use script::{Script, ScriptRegistry};
