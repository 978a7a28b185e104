//! `nautus list`: show the scripts a project defines

use crate::core::context::ProjectContext;
use crate::core::error::NautusResult;
use crate::host::ScriptHost;
use crate::script::ScriptSource;
use crate::ui::Styler;

/// Print every defined script, as text or JSON
pub fn run_list(ctx: &ProjectContext, json: bool) -> NautusResult<()> {
  let host = ScriptHost::new(ctx);
  let entries = host.catalog().list()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  if entries.is_empty() {
    println!("No scripts defined in {}", host.catalog().dir().display());
    println!("💡 Run `nautus init` to create the default scripts.");
    return Ok(());
  }

  let styler = Styler::detect();
  let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);

  println!("📜 Scripts in {}\n", host.catalog().dir().display());
  for entry in &entries {
    let padded = format!("{:width$}", entry.name, width = width);
    let detail = match (&entry.problem, &entry.description, &entry.source) {
      (Some(problem), _, _) => styler.red(&format!("invalid: {}", problem)),
      (None, Some(description), _) => description.clone(),
      (None, None, ScriptSource::Registered) => styler.dim("(registered)"),
      (None, None, ScriptSource::File(_)) => String::new(),
    };
    println!("   {}  {}", styler.bold(&padded), detail);
  }
  Ok(())
}
