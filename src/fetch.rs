use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use reqwest::blocking::{Client, ClientBuilder};
use tar::Archive;
use tempfile;

use crate::config::Config;
use crate::errors::*;
use crate::tag::ReleaseTag;

/// Resolves the release asset for (tag, architecture). The result is a
/// pure function of the inputs and the configured release base.
pub fn asset_url(tag: &ReleaseTag, arch: &str, config: &Config) -> String {
    format!(
        "{}/{}/sapmachine-jdk-{}_{}_bin.tar.gz",
        config.release_base,
        tag.name(),
        tag.version(),
        arch
    )
}

pub fn asset_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Obtain an HTTP client, taking proxy environment variables into account.
fn http_client() -> Result<Client> {
    let mut builder = ClientBuilder::new();

    for (key, value) in env::vars() {
        let key = key.to_lowercase();
        if key.ends_with("_proxy") {
            let end = key.len() - "_proxy".len();
            let proxy = match &key[..end] {
                "http" => Some(reqwest::Proxy::http(&value)),
                "https" => Some(reqwest::Proxy::https(&value)),
                _ => None,
            };
            if let Some(Ok(proxy)) = proxy {
                builder = builder.proxy(proxy);
            }
        }
    }

    Ok(builder.build()?)
}

/// Downloads `url` to `dest`, streaming the body to disk.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    debjdk_info!("Downloading {}", url);
    let client = http_client()?;
    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("Could not fetch {}", url))?;
    if !response.status().is_success() {
        debjdk_bail!("Download of {} failed: HTTP {}", url, response.status());
    }

    let mut out = fs::File::create(dest)
        .with_context(|| format!("Could not create {}", dest.display()))?;
    io::copy(&mut response, &mut out)?;
    Ok(())
}

/// Unpacks a `.tar.gz` archive into `dest` and returns the path of the
/// exploded image. The archive must contain exactly one top-level
/// directory; entries escaping via `..` are rejected.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("Could not open {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let tempdir = tempfile::Builder::new().prefix("debjdk").tempdir_in(dest)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.unpack_in(tempdir.path())? {
            debjdk_bail!("Archive contained path traversals via '..'");
        }
    }

    let entries = tempdir.path().read_dir()?.collect::<io::Result<Vec<_>>>()?;
    if entries.len() != 1 || !entries[0].file_type()?.is_dir() {
        debjdk_bail!(
            "{} did not unpack to a single top-level directory",
            archive_path.display()
        );
    }

    let image = dest.join(entries[0].file_name());
    fs::rename(entries[0].path(), &image)?;
    Ok(image)
}
