use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_derive::Deserialize;
use toml;

use crate::errors::*;

/// Default upstream repository holding the license material.
pub const UPSTREAM_REPO: &str = "https://github.com/SAP/SapMachine.git";
/// Branch of the upstream repository that is cloned.
pub const UPSTREAM_BRANCH: &str = "sapmachine";
/// Base URL under which release assets are published.
pub const RELEASE_BASE: &str = "https://github.com/SAP/SapMachine/releases/download";

const DEFAULT_MAINTAINER_NAME: &str = "SapMachine";
const DEFAULT_MAINTAINER_EMAIL: &str = "sapmachine@sap.com";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub maintainer_name: Option<String>,
    pub maintainer_email: Option<String>,
    pub upstream_repo: String,
    pub upstream_branch: String,
    pub release_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            maintainer_name: None,
            maintainer_email: None,
            upstream_repo: UPSTREAM_REPO.to_string(),
            upstream_branch: UPSTREAM_BRANCH.to_string(),
            release_base: RELEASE_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn default_maintainer_name(&self) -> &str {
        match self.maintainer_name {
            Some(ref name) => name,
            None => DEFAULT_MAINTAINER_NAME,
        }
    }

    pub fn default_maintainer_email(&self) -> &str {
        match self.maintainer_email {
            Some(ref email) => email,
            None => DEFAULT_MAINTAINER_EMAIL,
        }
    }
}

pub fn parse_config(src: &Path) -> Result<Config> {
    let mut config_file = File::open(src)
        .with_context(|| format!("Could not open config file {}", src.display()))?;
    let mut content = String::new();
    config_file.read_to_string(&mut content)?;

    Ok(toml::from_str(&content)?)
}
