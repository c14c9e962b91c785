use std::fs;
use std::path::Path;
use std::process::Command;

use black_anvil::install::{binary_file_name, file_sha256};
use black_anvil::{install, BuildType, InstallRequest};
use tempfile::tempdir;

fn cargo_available() -> bool {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".into());
    Command::new(cargo)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn write_fixture(dir: &Path) {
    fs::create_dir_all(dir.join("src")).expect("create fixture src");
    fs::write(
        dir.join("Cargo.toml"),
        "[package]\nname = \"anvil-fixture\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[workspace]\n",
    )
    .expect("write fixture manifest");
    fs::write(
        dir.join("src").join("main.rs"),
        "fn main() { println!(\"forged\"); }\n",
    )
    .expect("write fixture main");
}

#[tokio::test]
async fn debug_build_is_installed_with_checksum() {
    if !cargo_available() {
        eprintln!("skipping install roundtrip (cargo not found)");
        return;
    }
    let project = tempdir().expect("project dir");
    let install_root = tempdir().expect("install dir");
    write_fixture(project.path());

    let request = InstallRequest {
        project_path: project.path().to_path_buf(),
        build_type: BuildType::Debug,
        install_dir: install_root.path().join("bin"),
        vendor: false,
    };
    let report = install(&request).await.expect("install fixture");

    let expected = install_root
        .path()
        .join("bin")
        .join(binary_file_name("anvil-fixture"));
    assert_eq!(report.binary, expected);
    assert!(expected.is_file());
    assert_eq!(report.sha256, file_sha256(&expected).unwrap());
    assert_eq!(report.vendored_crates, None);

    let run = Command::new(&expected).output().expect("run installed binary");
    assert_eq!(String::from_utf8_lossy(&run.stdout).trim(), "forged");
}

#[tokio::test]
async fn failing_build_surfaces_cargo_error() {
    if !cargo_available() {
        eprintln!("skipping failing build test (cargo not found)");
        return;
    }
    let project = tempdir().expect("project dir");
    write_fixture(project.path());
    fs::write(project.path().join("src").join("main.rs"), "fn main( {}\n").unwrap();

    let err = black_anvil::build_project(project.path(), BuildType::Debug)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("E-ANVIL-1502"), "{err}");
}

#[tokio::test]
async fn vendoring_writes_source_replacement_snippet() {
    if !cargo_available() {
        eprintln!("skipping vendoring test (cargo not found)");
        return;
    }
    let project = tempdir().expect("project dir");
    let install_root = tempdir().expect("install dir");
    write_fixture(project.path());

    let request = InstallRequest {
        project_path: project.path().to_path_buf(),
        build_type: BuildType::Debug,
        install_dir: install_root.path().to_path_buf(),
        vendor: true,
    };
    let report = install(&request).await.expect("install with vendoring");
    assert_eq!(report.vendored_crates, Some(0));

    let snippet_path = install_root.path().join("vendor-config.toml");
    assert!(snippet_path.is_file());
    let snippet = fs::read_to_string(&snippet_path).expect("read snippet");
    // Without dependencies cargo only emits the merged directory source.
    assert!(snippet.contains("[source.vendored-sources]"), "{snippet}");
}
