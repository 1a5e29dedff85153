use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::*;

const SEPARATOR: &str =
    "------------------------------------------------------------------------------";

/// Collects the license material shipped in the upstream source tree into
/// a single text block for debian/copyright.
///
/// The list always starts with the top-level LICENSE and ASSEMBLY_EXCEPTION
/// files, followed by every file inside a directory named `legal` under
/// `src/`, in traversal order. Only the literal `<pre>` markers the
/// upstream files wrap their text in are stripped; each file's content is
/// followed by a separator line.
pub fn gather_licenses(src_dir: &Path) -> Result<String> {
    let mut license_files: Vec<PathBuf> = vec![
        src_dir.join("LICENSE"),
        src_dir.join("ASSEMBLY_EXCEPTION"),
    ];

    for entry in WalkDir::new(src_dir.join("src"))
        .contents_first(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let in_legal_dir = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map_or(false, |name| name == OsStr::new("legal"));
        if entry.file_type().is_file() && in_legal_dir {
            license_files.push(entry.path().to_path_buf());
        }
    }

    let mut licenses = Vec::new();
    for license_file in &license_files {
        let content = fs::read_to_string(license_file)
            .with_context(|| format!("Could not read {}", license_file.display()))?;
        licenses.push(content.replace("<pre>", "").replace("</pre>", ""));
        licenses.push(SEPARATOR.to_string());
    }

    Ok(licenses.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn upstream_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("LICENSE"), "<pre>GPLv2 text</pre>");
        touch(&tmp.path().join("ASSEMBLY_EXCEPTION"), "ASSEMBLY text");
        touch(
            &tmp.path().join("src/java.base/legal/aes.md"),
            "aes notice",
        );
        touch(
            &tmp.path().join("src/java.base/legal/zlib.md"),
            "<pre>zlib notice</pre>",
        );
        touch(&tmp.path().join("src/java.base/share/Object.java"), "code");
        tmp
    }

    #[test]
    fn head_files_come_first_and_order_is_stable() {
        let tmp = upstream_tree();
        let bundle = gather_licenses(tmp.path()).unwrap();

        let gpl = bundle.find("GPLv2 text").unwrap();
        let assembly = bundle.find("ASSEMBLY text").unwrap();
        let aes = bundle.find("aes notice").unwrap();
        let zlib = bundle.find("zlib notice").unwrap();
        assert!(gpl < assembly && assembly < aes && aes < zlib);

        assert_eq!(bundle, gather_licenses(tmp.path()).unwrap());
    }

    #[test]
    fn strips_only_the_pre_markers() {
        let tmp = upstream_tree();
        let bundle = gather_licenses(tmp.path()).unwrap();
        assert!(!bundle.contains("<pre>"));
        assert!(!bundle.contains("</pre>"));
        assert!(bundle.contains("GPLv2 text"));
        assert!(bundle.contains("zlib notice"));
    }

    #[test]
    fn every_file_is_followed_by_the_separator() {
        let tmp = upstream_tree();
        let bundle = gather_licenses(tmp.path()).unwrap();
        // LICENSE, ASSEMBLY_EXCEPTION and two legal files
        assert_eq!(bundle.matches(SEPARATOR).count(), 4);
        assert!(bundle.ends_with(SEPARATOR));
    }

    #[test]
    fn files_outside_legal_directories_are_ignored() {
        let tmp = upstream_tree();
        let bundle = gather_licenses(tmp.path()).unwrap();
        assert!(!bundle.contains("code"));
    }
}
