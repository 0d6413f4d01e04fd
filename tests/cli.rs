//! Exit codes of the packaging binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_package").unwrap();
    cmd.env("RUST_LOG", "info")
        .env_remove("TARGET_ARCH")
        .env_remove("GITHUB_ACTIONS")
        .env_remove("WINDOWS_CERT_PASSWORD");
    cmd
}

#[test]
fn help_mentions_the_config_file() {
    packager()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("distribution.toml"));
}

#[test]
fn missing_config_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();

    packager()
        .arg("--config")
        .arg(dir.path().join("distribution.toml"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn malformed_config_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("distribution.toml");
    std::fs::write(&config, "[product]\nname = \"App\"\n").unwrap();

    packager()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1);
}

#[test]
fn unavailable_packaging_tools_exit_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("distribution.toml");
    std::fs::write(
        &config,
        r#"
[product]
name = "App"
company = "Example"
version = "1.0.0"
icon = "icon"

[paths]
bundle = "dist/App-{arch}"
output = "dist"

[linux]
appimage_builder = "missing/electron-builder"
debian_builder = "missing/electron-installer-debian"
redhat_builder = "missing/electron-installer-redhat"
"#,
    )
    .unwrap();

    packager()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1);
}
