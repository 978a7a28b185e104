//! `nautus init`: scaffold a project

use crate::core::config::NautusConfig;
use crate::core::error::NautusResult;
use crate::script::templates::write_templates;
use std::path::Path;

/// Write the default scripts and nautus.toml into `root`
///
/// Existing files are kept unless `force` is set.
pub fn run_init(root: &Path, force: bool) -> NautusResult<()> {
  let config = match NautusConfig::find_config_path(root) {
    Some(_) => NautusConfig::load(root)?,
    None => NautusConfig::default(),
  };

  let scripts_dir = root.join(&config.scripts.dir);
  let report = write_templates(&scripts_dir, force)?;

  for path in &report.written {
    println!("   ✅ Created {}", display_relative(root, path));
  }
  for path in &report.kept {
    println!("   ⏭️  Kept {} (use --force to overwrite)", display_relative(root, path));
  }

  let config_path = root.join("nautus.toml");
  if force || !NautusConfig::exists(root) {
    config.save(root)?;
    println!("   ✅ Wrote {}", display_relative(root, &config_path));
  }

  println!();
  println!("🎉 Project ready. Edit the scripts in {}", display_relative(root, &scripts_dir));
  Ok(())
}

fn display_relative(root: &Path, path: &Path) -> String {
  pathdiff::diff_paths(path, root)
    .unwrap_or_else(|| path.to_path_buf())
    .display()
    .to_string()
}
