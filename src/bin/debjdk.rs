use std::env;
use std::fs;
use std::path::Path;

use clap::{crate_authors, crate_version, App, AppSettings, Arg, ArgMatches};
use glob::glob;

use debjdk::config::{parse_config, Config};
use debjdk::debian;
use debjdk::errors::*;
use debjdk::fetch;
use debjdk::tag::ReleaseTag;
use debjdk::upstream;
use debjdk::util;
use debjdk::{debjdk_bail, debjdk_info, debjdk_warn};

const WORK_DIR: &str = "deb_work";
const ARCHITECTURES: &[&str] = &["linux-x64", "linux-aarch64"];

fn do_package(matches: &ArgMatches) -> Result<()> {
    let tag = ReleaseTag::parse(matches.value_of("tag").unwrap())?;
    let templates_dir = fs::canonicalize(matches.value_of("templates-directory").unwrap())
        .context("Could not resolve the templates directory")?;
    let arch = matches.value_of("architecture").unwrap();
    if !ARCHITECTURES.contains(&arch) {
        debjdk_warn!("Unknown architecture '{}', trying anyway", arch);
    }
    let config = match matches.value_of("config") {
        Some(path) => parse_config(Path::new(path))?,
        None => Config::default(),
    };

    let cwd = env::current_dir()?;
    let work_dir = cwd.join(WORK_DIR);
    util::recreate_dir(&work_dir)?;

    let url = fetch::asset_url(&tag, arch, &config);
    let archive = work_dir.join(fetch::asset_filename(&url));
    fetch::download(&url, &archive)?;

    let jdk_dir = work_dir.join(tag.image_dir_name());
    fs::create_dir(&jdk_dir)?;
    let exploded_image = fetch::extract_archive(&archive, &jdk_dir)?;

    let src_dir = work_dir.join("sapmachine_master");
    upstream::clone_upstream(&config.upstream_repo, &config.upstream_branch, &src_dir)?;

    let author = debian::deb_author(&config)?;
    debian::scaffold_source(&jdk_dir, &author)?;

    debian::prepare_debian_folder(
        &templates_dir.join("jdk"),
        &jdk_dir.join("debian"),
        &tag,
        &exploded_image,
        &src_dir,
        &url,
    )?;

    debian::build_package(&jdk_dir, &author)?;

    let mut produced = 0;
    for entry in glob(&format!("{}/*.deb", work_dir.display()))? {
        let deb = entry?;
        let name = match deb.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        fs::copy(&deb, cwd.join(&name))?;
        fs::remove_file(&deb)?;
        debjdk_info!("Created {}", name.to_string_lossy());
        produced += 1;
    }
    if produced == 0 {
        debjdk_bail!("debuild did not produce any .deb file");
    }

    Ok(())
}

fn do_name(matches: &ArgMatches) -> Result<()> {
    let tag = ReleaseTag::parse(matches.value_of("tag").unwrap())?;
    println!("{}", tag.image_dir_name());
    Ok(())
}

fn real_main() -> Result<()> {
    let m = App::new("debjdk")
        .author(crate_authors!())
        .version(crate_version!())
        .about("Create a Debian package from a pre-built SapMachine JDK release")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            App::new("package")
                .about("Download a release by tag and build the Debian package")
                .arg(
                    Arg::new("tag")
                        .short('t')
                        .long("tag")
                        .value_name("TAG")
                        .help("The tag to create the debian packages from")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("templates-directory")
                        .short('d')
                        .long("templates-directory")
                        .value_name("DIR")
                        .help("The templates directory")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("architecture")
                        .short('a')
                        .long("architecture")
                        .value_name("ARCH")
                        .help("The architecture (linux-aarch64, linux-x64)")
                        .takes_value(true)
                        .default_value("linux-x64"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("TOML file providing packaging overrides")
                        .takes_value(true),
                ),
        )
        .subcommand(
            App::new("name")
                .about("Prints the source directory name derived from a tag")
                .arg(
                    Arg::new("tag")
                        .value_name("TAG")
                        .help("The release tag")
                        .required(true),
                ),
        )
        .get_matches();

    match m.subcommand() {
        Some(("package", sm)) => do_package(sm),
        Some(("name", sm)) => do_name(sm),
        _ => unreachable!(),
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = real_main() {
        println!("Something failed: {:?}", e);
        std::process::exit(1);
    }
}
