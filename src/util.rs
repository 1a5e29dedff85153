use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::errors::*;

pub fn remove_if_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Could not remove directory {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Could not remove {}", path.display()))?;
    }
    Ok(())
}

/// Removes `path` if present and creates it again, empty.
pub fn recreate_dir(path: &Path) -> Result<()> {
    remove_if_exists(path)?;
    fs::create_dir_all(path)
        .with_context(|| format!("Could not create directory {}", path.display()))?;
    Ok(())
}

/// Runs an external command in `cwd`, inheriting stdio so the tool's own
/// diagnostics stay visible. A non-zero exit status is an error.
pub fn run_cmd(program: &str, args: &[&str], cwd: &Path, envs: &[(&str, &str)]) -> Result<()> {
    debug!("running {} {:?} in {}", program, args, cwd.display());
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    let status = cmd
        .status()
        .with_context(|| format!("Could not execute {}", program))?;
    if !status.success() {
        debjdk_bail!("{} failed with {}", program, status);
    }
    Ok(())
}
