//! CLI integration tests for aim.
//!
//! These tests drive the `aim` binary against target files laid out in
//! temporary project directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the aim binary command.
fn aim() -> Command {
    Command::cargo_bin("aim").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const TARGET_FILE: &str = r#"
projectRoot = "../.."
compilerFrontend = "gcc"
compiler = "g++"
archiver = "ar"
flags = ["-std=c++17"]
defines = ["EnableFeature"]

[[builds]]
name = "b"
buildRule = "staticLibrary"
outputName = "b"
sourceFiles = ["b/src"]
includePaths = ["b/include"]

[[builds]]
name = "c"
buildRule = "dynamicLib"
outputName = "c"
sourceFiles = ["c/src/*.cpp"]
includePaths = ["c/include"]

[[builds]]
name = "i"
buildRule = "headerOnly"
includePaths = ["i/include"]

[[builds]]
name = "a"
buildRule = "exe"
outputName = "a"
requires = ["b", "c", "i"]
srcDirs = ["a/src"]
includePaths = ["a/include"]
"#;

/// Lay out a project with the given target file, returning the build dir.
fn write_project(root: &Path, target_file: &str) -> PathBuf {
    for file in ["a/src/main.cpp", "b/src/b.cpp", "c/src/c.cpp"] {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "int f() { return 0; }\n").unwrap();
    }
    let build_dir = root.join("builds").join("linux-gcc-debug");
    fs::create_dir_all(&build_dir).unwrap();
    fs::write(build_dir.join("target.toml"), target_file).unwrap();
    build_dir
}

// ============================================================================
// aim target <dir> generate
// ============================================================================

#[test]
fn test_generate_writes_build_file() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("generate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"));

    let ninja = fs::read_to_string(build_dir.join("build.ninja")).unwrap();
    assert!(ninja.contains("rule compile"));
    assert!(ninja.contains("build b/libb.a: archive b/b.o"));
    assert!(ninja.contains("build c/libc.so: shared c/c.o"));
    assert!(ninja.contains("build a/a: exe a/main.o | libb.a libc.so"));
    assert!(ninja.contains("-Wl,-rpath='$$ORIGIN$:$$ORIGIN/../c'"));
    assert!(ninja.contains("-I../../i/include"));
    assert!(!build_dir.join("compile_commands.json").exists());
}

#[test]
fn test_generate_compile_commands() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim()
        .arg("target")
        .arg(&build_dir)
        .args(["generate", "--compile-commands"])
        .assert()
        .success();

    let json = fs::read_to_string(build_dir.join("compile_commands.json")).unwrap();
    assert!(json.contains("\"file\": \"../../a/src/main.cpp\""));
}

#[test]
fn test_generate_is_deterministic() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim().arg("target").arg(&build_dir).arg("generate").assert().success();
    let first = fs::read_to_string(build_dir.join("build.ninja")).unwrap();
    aim().arg("target").arg(&build_dir).arg("generate").assert().success();
    let second = fs::read_to_string(build_dir.join("build.ninja")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unknown_build_kind_leaves_no_build_file() {
    let tmp = temp_dir();
    let content = TARGET_FILE.replace("\"headerOnly\"", "\"mystery\"");
    let build_dir = write_project(tmp.path(), &content);

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mystery"));

    assert!(!build_dir.join("build.ninja").exists());
}

#[test]
fn test_osx_frontend_is_rejected() {
    let tmp = temp_dir();
    let content = TARGET_FILE.replace("\"gcc\"", "\"osx\"");
    let build_dir = write_project(tmp.path(), &content);

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("osx"));
}

#[test]
fn test_missing_sources_reported() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);
    fs::remove_file(tmp.path().join("b/src/b.cpp")).unwrap();

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("b/src"));

    assert!(!build_dir.join("build.ninja").exists());
}

// ============================================================================
// aim target <dir> list
// ============================================================================

#[test]
fn test_list_shows_targets() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("libb.a"))
        .stdout(predicate::str::contains("libc.so"))
        .stdout(predicate::str::contains("headerOnly"))
        .stdout(predicate::str::contains("n.a."));
}

// ============================================================================
// aim target <dir> clobber
// ============================================================================

#[test]
fn test_clobber_keeps_target_file() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim().arg("target").arg(&build_dir).arg("generate").assert().success();
    assert!(build_dir.join("build.ninja").exists());

    aim()
        .arg("target")
        .arg(&build_dir)
        .arg("clobber")
        .assert()
        .success();

    assert!(!build_dir.join("build.ninja").exists());
    assert!(build_dir.join("target.toml").exists());
}

#[test]
fn test_clobber_refuses_outside_build_dir() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("keep.txt"), "").unwrap();

    aim()
        .arg("target")
        .arg(tmp.path())
        .arg("clobber")
        .assert()
        .failure()
        .stderr(predicate::str::contains("target.toml"));

    assert!(tmp.path().join("keep.txt").exists());
}

// ============================================================================
// aim target <dir> build
// ============================================================================

#[test]
fn test_build_skip_regen_without_build_file() {
    let tmp = temp_dir();
    let build_dir = write_project(tmp.path(), TARGET_FILE);

    aim()
        .arg("target")
        .arg(&build_dir)
        .args(["build", "a", "--skip-regen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("build.ninja"));
}
