use crate::support::{print_json, yes_no};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use typewrite_core::EffectConfig;

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub path: PathBuf,
    pub created_parent: bool,
    pub overwritten: bool,
}

pub fn write_sample(path: impl AsRef<Path>, force: bool) -> Result<InitOutcome, String> {
    let path = path.as_ref().to_path_buf();

    if path.exists() && !path.is_file() {
        return Err(format!(
            "config path exists but is not a file: {}",
            path.display()
        ));
    }
    let overwritten = path.exists();
    if overwritten && !force {
        return Err(format!(
            "config already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    let mut created_parent = false;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                format!("failed to create directory {}: {e}", parent.display())
            })?;
            created_parent = true;
        }
    }

    let text = EffectConfig::sample()
        .to_toml_string()
        .map_err(|e| e.to_string())?;
    fs::write(&path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(InitOutcome {
        path,
        created_parent,
        overwritten,
    })
}

pub fn run(path: String, force: bool, json_output: bool) {
    let outcome = write_sample(&path, force).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        print_json(&json!({
            "path": outcome.path.display().to_string(),
            "createdParent": outcome.created_parent,
            "overwritten": outcome.overwritten,
        }));
        return;
    }

    println!("typewrite init {path}");
    println!();
    println!("  config: {}", outcome.path.display());
    println!("  created directory: {}", yes_no(outcome.created_parent));
    println!("  overwritten: {}", yes_no(outcome.overwritten));
}
