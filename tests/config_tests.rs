use std::path::Path;

use debjdk::config::{parse_config, Config};

#[test]
fn maintainer_override() {
    let filepath = Path::new("tests/maintainer_override.toml");

    let config = parse_config(filepath);
    assert!(config.is_ok());

    let config = config.unwrap();

    assert_eq!(config.maintainer_name.as_deref(), Some("Custom Packager"));
    assert_eq!(
        config.maintainer_email.as_deref(),
        Some("packager@example.org")
    );
    assert_eq!(config.upstream_branch, "sapmachine17");

    // keys absent from the file keep their defaults
    assert_eq!(config.upstream_repo, "https://github.com/SAP/SapMachine.git");
    assert_eq!(
        config.release_base,
        "https://github.com/SAP/SapMachine/releases/download"
    );
}

#[test]
fn defaults_carry_the_project_maintainer() {
    let config = Config::default();
    assert!(config.maintainer_name.is_none());
    assert_eq!(config.default_maintainer_name(), "SapMachine");
    assert_eq!(config.default_maintainer_email(), "sapmachine@sap.com");
}

#[test]
fn missing_config_file_is_an_error() {
    assert!(parse_config(Path::new("tests/absent.toml")).is_err());
}
