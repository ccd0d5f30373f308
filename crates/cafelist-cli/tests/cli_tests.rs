use std::io::Write;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../cafelist-lib/tests/fixtures/catalog.csv")
        .canonicalize()
        .expect("fixture catalog present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("cafelist-cli");
    cmd.env_remove("CAFELIST_CATALOG_PATH").env("RUST_LOG", "error");
    cmd
}

#[test]
fn lists_full_city() {
    cli()
        .args(["list", "--city", "tula"])
        .assert()
        .success()
        .stdout("Кофе с собой,Лучше дома,Горячий хлеб\n");
}

#[test]
fn list_applies_search_then_count() {
    cli()
        .args(["list", "--city", "moscow", "--search", "КОФЕ", "--count", "1"])
        .assert()
        .success()
        .stdout("Мир кофе\n");
}

#[test]
fn zero_count_prints_empty_line() {
    cli()
        .args(["list", "--city", "moscow", "--count", "0"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn unknown_city_fails() {
    cli()
        .args(["list", "--city", "omsk", "--count", "na"])
        .assert()
        .failure()
        .stderr("unknown city\n");
}

#[test]
fn missing_city_fails() {
    cli()
        .arg("list")
        .assert()
        .failure()
        .stderr("unknown city\n");
}

#[test]
fn bad_count_fails() {
    cli()
        .args(["list", "--city", "tula", "--count", "na"])
        .assert()
        .failure()
        .code(1)
        .stderr("incorrect count\n");
}

#[test]
fn lists_builtin_cities() {
    cli()
        .arg("cities")
        .assert()
        .success()
        .stdout("moscow (5 cafés)\ntula (3 cafés)\n");
}

#[test]
fn uses_catalog_flag() {
    cli()
        .arg("--catalog")
        .arg(fixture_catalog())
        .arg("cities")
        .assert()
        .success()
        .stdout(contains("kazan (3 cafés)"))
        .stdout(contains("omsk (2 cafés)"));
}

#[test]
fn uses_catalog_env_var() {
    cli()
        .env("CAFELIST_CATALOG_PATH", fixture_catalog())
        .args(["list", "--city", "omsk", "--search", "кофе"])
        .assert()
        .success()
        .stdout("Сибирский кофе\n");
}

#[test]
fn reports_invalid_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "town,cafe").unwrap();
    writeln!(file, "omsk,X").unwrap();
    file.flush().unwrap();

    cli()
        .arg("--catalog")
        .arg(file.path())
        .arg("cities")
        .assert()
        .failure()
        .stderr(contains("failed to load catalog"));
}
