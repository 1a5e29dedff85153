use std::path::Path;

use git2::build::RepoBuilder;

use crate::errors::*;

/// Clones the upstream source tree used for license harvesting. Only the
/// requested branch is fetched; the clone is discarded with the working
/// directory after the run.
pub fn clone_upstream(repo: &str, branch: &str, target: &Path) -> Result<()> {
    debjdk_info!("Cloning {} (branch {})", repo, branch);
    RepoBuilder::new()
        .branch(branch)
        .clone(repo, target)
        .with_context(|| format!("Could not clone {}", repo))?;
    Ok(())
}
