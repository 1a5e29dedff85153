use std::fmt;

use regex::Regex;

use crate::errors::*;

/// A SapMachine release tag, e.g. `sapmachine-21.0.2` or `sapmachine-21+35`.
///
/// The `sapmachine-` prefix is optional on input; the canonical tag name
/// always carries it. Everything derived from a tag (Debian version,
/// image directory name, asset URL) is a pure function of the tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    name: String,
    major: u32,
    version: String,
}

impl ReleaseTag {
    pub fn parse(tag: &str) -> Result<ReleaseTag> {
        let re = Regex::new(r"^(?:sapmachine-)?((\d+)(?:\.\d+)*(?:\+\d+)?(?:-[0-9A-Za-z.]+)?)$")
            .unwrap();
        let caps = match re.captures(tag) {
            Some(caps) => caps,
            None => debjdk_bail!("Not a valid release tag: {}", tag),
        };
        let version = caps[1].to_string();
        let major = caps[2]
            .parse::<u32>()
            .with_context(|| format!("Major version out of range in tag {}", tag))?;

        Ok(ReleaseTag {
            name: format!("sapmachine-{}", version),
            major,
            version,
        })
    }

    /// The canonical tag name, `sapmachine-<version>`.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    /// The upstream version string, without the tag prefix.
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Translates the upstream version into a Debian version. `+` and `-`
    /// both separate the build part upstream but are not usable here, so
    /// they map to `.`.
    pub fn deb_version(&self) -> String {
        self.version.replace('+', ".").replace('-', ".")
    }

    /// Name of the directory the archive is unpacked under. `dh_make`
    /// derives the source package name and version from it.
    pub fn image_dir_name(&self) -> String {
        format!("sapmachine-{}-jdk-{}", self.major, self.deb_version())
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
