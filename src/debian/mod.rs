use std::collections::HashMap;
use std::env::{self, VarError};
use std::fs;
use std::path::Path;

use chrono::Utc;
use itertools::Itertools;

use crate::config::Config;
use crate::errors::*;
use crate::tag::ReleaseTag;
use crate::template;
use crate::util;

pub mod copyright;

/// debhelper compat level written into the scaffold.
const COMPAT_LEVEL: &str = "10";

/// Retrieve one of a series of environment variables, and provide a friendly
/// error message for non-UTF-8 values.
fn get_envs(keys: &[&str]) -> Result<Option<String>> {
    for key in keys {
        match env::var(key) {
            Ok(val) => {
                return Ok(Some(val));
            }
            Err(e @ VarError::NotUnicode(_)) => {
                return Err(e)
                    .with_context(|| format!("Environment variable ${} not valid UTF-8", key));
            }
            Err(VarError::NotPresent) => {}
        }
    }
    Ok(None)
}

/// Determine the packager name and email address: the config file wins,
/// then the usual Debian environment variables, then the project defaults.
pub fn deb_author(config: &Config) -> Result<(String, String)> {
    let name = match config.maintainer_name {
        Some(ref name) => name.clone(),
        None => get_envs(&["DEBFULLNAME", "NAME"])?
            .unwrap_or_else(|| config.default_maintainer_name().to_string()),
    };
    let email = match config.maintainer_email {
        Some(ref email) => email.clone(),
        None => get_envs(&["DEBEMAIL", "EMAIL"])?
            .unwrap_or_else(|| config.default_maintainer_email().to_string()),
    };
    Ok((name, email))
}

/// Scaffolds the debian/ control structure inside the unpacked source
/// directory. `dh_make` takes the package name and version from the
/// directory name.
pub fn scaffold_source(source_dir: &Path, author: &(String, String)) -> Result<()> {
    util::run_cmd(
        "dh_make",
        &["-n", "-s", "-y"],
        source_dir,
        &[
            ("DEBFULLNAME", author.0.as_str()),
            ("DEBEMAIL", author.1.as_str()),
        ],
    )
}

/// Runs the package build over the prepared scaffold. Binary-only, no
/// signing; the resulting `.deb` lands next to the source directory.
pub fn build_package(source_dir: &Path, author: &(String, String)) -> Result<()> {
    util::run_cmd(
        "debuild",
        &["-b", "-uc", "-us"],
        source_dir,
        &[
            ("DEBFULLNAME", author.0.as_str()),
            ("DEBEMAIL", author.1.as_str()),
        ],
    )
}

fn list_tools(exploded_image: &Path) -> Result<Vec<String>> {
    let bin_dir = exploded_image.join("bin");
    let mut tools = Vec::new();
    for entry in fs::read_dir(&bin_dir)
        .with_context(|| format!("Could not list {}", bin_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            tools.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    tools.sort();
    Ok(tools)
}

fn render(src: &Path, dest: &Path, vars: &HashMap<&str, String>) -> Result<()> {
    let raw = fs::read_to_string(src)
        .with_context(|| format!("Could not read template {}", src.display()))?;
    let rendered = template::substitute(&raw, vars)
        .with_context(|| format!("Could not render template {}", src.display()))?;
    fs::write(dest, rendered).with_context(|| format!("Could not write {}", dest.display()))?;
    Ok(())
}

/// Fills the dh_make scaffold from the template set: control, install and
/// postinst come from the per-flavour directory, copyright from one level
/// above it, compat is a literal.
pub fn prepare_debian_folder(
    templates_dir: &Path,
    target_dir: &Path,
    tag: &ReleaseTag,
    exploded_image: &Path,
    src_dir: &Path,
    download_url: &str,
) -> Result<()> {
    let major = tag.major().to_string();
    let tools = list_tools(exploded_image)?;
    let image_basename = match exploded_image.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => debjdk_bail!("Invalid exploded image path {}", exploded_image.display()),
    };

    render(
        &templates_dir.join("control"),
        &target_dir.join("control"),
        &HashMap::from([("major", major.clone())]),
    )?;

    render(
        &templates_dir.join("install"),
        &target_dir.join("install"),
        &HashMap::from([("exploded_image", image_basename), ("major", major.clone())]),
    )?;

    render(
        &templates_dir.join("postinst"),
        &target_dir.join("postinst"),
        &HashMap::from([
            ("tools", tools.iter().join(" ")),
            ("major", major.clone()),
        ]),
    )?;

    render(
        &templates_dir.join("..").join("copyright"),
        &target_dir.join("copyright"),
        &HashMap::from([
            ("date_and_time", Utc::now().to_rfc2822()),
            ("download_url", download_url.to_string()),
            ("license", copyright::gather_licenses(src_dir)?),
        ]),
    )?;

    fs::write(target_dir.join("compat"), COMPAT_LEVEL)
        .with_context(|| format!("Could not write {}", target_dir.join("compat").display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();

        let templates = tmp.path().join("templates");
        touch(
            &templates.join("jdk/control"),
            "Source: sapmachine-$major\nDepends: $${misc:Depends}\n",
        );
        touch(
            &templates.join("jdk/install"),
            "$exploded_image/bin usr/lib/jvm/sapmachine-$major\n",
        );
        touch(
            &templates.join("jdk/postinst"),
            "for tool in $tools; do echo $$tool sapmachine-$major; done\n",
        );
        touch(
            &templates.join("copyright"),
            "Generated on $date_and_time\nFrom $download_url\n\n$license\n",
        );

        let image = tmp.path().join("jdk/sapmachine-jdk-21.0.2");
        touch(&image.join("bin/javac"), "");
        touch(&image.join("bin/java"), "");
        touch(&image.join("bin/jar"), "");
        fs::create_dir_all(image.join("bin/subdir")).unwrap();

        let src = tmp.path().join("upstream");
        touch(&src.join("LICENSE"), "GPLv2");
        touch(&src.join("ASSEMBLY_EXCEPTION"), "ASSEMBLY");
        touch(&src.join("src/java.base/legal/zlib.md"), "zlib notice");

        (tmp, templates, image, src)
    }

    #[test]
    fn fills_every_template_without_leftover_placeholders() {
        let (tmp, templates, image, src) = fixture();
        let target = tmp.path().join("debian");
        fs::create_dir(&target).unwrap();
        let tag = ReleaseTag::parse("sapmachine-21.0.2").unwrap();

        prepare_debian_folder(
            &templates.join("jdk"),
            &target,
            &tag,
            &image,
            &src,
            "https://example.org/jdk.tar.gz",
        )
        .unwrap();

        let control = fs::read_to_string(target.join("control")).unwrap();
        assert_eq!(control, "Source: sapmachine-21\nDepends: ${misc:Depends}\n");

        let install = fs::read_to_string(target.join("install")).unwrap();
        assert_eq!(
            install,
            "sapmachine-jdk-21.0.2/bin usr/lib/jvm/sapmachine-21\n"
        );

        let postinst = fs::read_to_string(target.join("postinst")).unwrap();
        assert_eq!(
            postinst,
            "for tool in jar java javac; do echo $tool sapmachine-21; done\n"
        );

        let copyright = fs::read_to_string(target.join("copyright")).unwrap();
        assert!(copyright.contains("From https://example.org/jdk.tar.gz"));
        assert!(copyright.contains("GPLv2"));
        assert!(copyright.contains("zlib notice"));
        assert!(!copyright.contains('$'));

        assert_eq!(fs::read_to_string(target.join("compat")).unwrap(), "10");
    }

    #[test]
    fn tools_are_sorted_and_directories_skipped() {
        let (_tmp, _templates, image, _src) = fixture();
        assert_eq!(list_tools(&image).unwrap(), ["jar", "java", "javac"]);
    }

    #[test]
    fn deb_author_prefers_the_config_file() {
        let config = Config {
            maintainer_name: Some("Packager".to_string()),
            maintainer_email: Some("packager@example.org".to_string()),
            ..Config::default()
        };
        let (name, email) = deb_author(&config).unwrap();
        assert_eq!(name, "Packager");
        assert_eq!(email, "packager@example.org");
    }
}
